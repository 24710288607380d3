//! Bar chart of the 24 hourly min/max/avg records.
//!
//! Each hour gets one column of width `canvas_w / 24`:
//!
//! ```text
//!   ┌──┐  <- current hour: 2px warning outline, 2px taller than the bar
//!   │▒▒│  <- translucent min-max bar (primary at 25% opacity)
//!   │██│  <- average marker, 2px tall
//!   │▒▒│
//!   └──┘
//!   12h   <- hour label every 4 hours
//! ```
//!
//! All records share one vertical scale spanning the lowest `min` to the
//! highest `max` of the day.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
    text::Text,
};
use heapless::String;

use super::geometry::{BarGeometry, ValueScale, px};
use crate::colors::{Palette, blend};
use crate::history::{HOURS_PER_DAY, HourlyStat};
use crate::styles::{CENTERED, CHART_FONT};

// =============================================================================
// Layout Constants
// =============================================================================

/// Opacity of the min-max bar fill.
pub const BAR_ALPHA: f32 = 0x40 as f32 / 255.0;

/// Horizontal inset of the bar and average marker inside each column.
const BAR_INSET: f32 = 2.0;

/// Height of the average marker.
const AVG_MARKER_HEIGHT: u32 = 2;

/// Current-hour outline stroke width.
const HIGHLIGHT_STROKE: u32 = 2;

/// Horizontal inset of the current-hour outline.
const HIGHLIGHT_INSET: f32 = 1.0;

/// How far the outline extends above and below the bar.
const HIGHLIGHT_OVERHANG: f32 = 2.0;

/// Hours between axis labels.
pub const LABEL_EVERY_HOURS: usize = 4;

/// Baseline offset of the hour labels below the plot area.
const LABEL_OFFSET_Y: f32 = 15.0;

// =============================================================================
// Rendering
// =============================================================================

/// Horizontal pixel extent `[left, left + width)` of a column inset by `inset`.
fn column(
    geometry: &BarGeometry,
    index: usize,
    inset: f32,
) -> (i32, u32) {
    let left = px(geometry.x(index) + inset);
    let right = px(geometry.x(index) + geometry.bar_width - inset);
    (left, (right - left).max(0) as u32)
}

/// Render the hourly statistics onto `target`.
///
/// The canvas is cleared to `palette.card` first. An empty slice leaves it
/// blank. Records beyond the 24th are ignored.
///
/// # Parameters
/// - `target`: Raster surface (typically a cropped region of the panel)
/// - `stats`: Hourly records, index = hour of day
/// - `current_hour`: Hour to outline (0-23); other values outline nothing
/// - `palette`: Day or night palette
pub fn draw_bar_chart<D>(
    target: &mut D,
    stats: &[HourlyStat],
    current_hour: u8,
    palette: &Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    target.clear(palette.card).ok();

    let stats = &stats[..stats.len().min(HOURS_PER_DAY)];
    let Some(scale) = ValueScale::from_hourly(stats) else {
        return;
    };
    let geometry = BarGeometry::for_canvas(target.bounding_box().size);

    let bar_style = PrimitiveStyle::with_fill(blend(palette.card, palette.primary, BAR_ALPHA));
    let avg_style = PrimitiveStyle::with_fill(palette.secondary);
    let highlight_style = PrimitiveStyleBuilder::new()
        .stroke_color(palette.warning)
        .stroke_width(HIGHLIGHT_STROKE)
        .build();

    for (index, stat) in stats.iter().enumerate() {
        let span = geometry.span(stat, &scale);
        let (left, width) = column(&geometry, index, BAR_INSET);

        let top = px(span.top);
        let bottom = px(span.top + span.height);
        Rectangle::new(Point::new(left, top), Size::new(width, (bottom - top).max(0) as u32))
            .into_styled(bar_style)
            .draw(target)
            .ok();

        Rectangle::new(Point::new(left, px(span.avg_y - 1.0)), Size::new(width, AVG_MARKER_HEIGHT))
            .into_styled(avg_style)
            .draw(target)
            .ok();

        if index == usize::from(current_hour) {
            let (left, width) = column(&geometry, index, HIGHLIGHT_INSET);
            let top = px(span.top - HIGHLIGHT_OVERHANG);
            let bottom = px(span.top + span.height + HIGHLIGHT_OVERHANG);
            Rectangle::new(Point::new(left, top), Size::new(width, (bottom - top).max(0) as u32))
                .into_styled(highlight_style)
                .draw(target)
                .ok();
        }
    }

    let label_style = MonoTextStyle::new(CHART_FONT, palette.text_secondary);
    let label_y = px(geometry.plot_height + LABEL_OFFSET_Y);
    for hour in (0..HOURS_PER_DAY).step_by(LABEL_EVERY_HOURS) {
        let mut label: String<4> = String::new();
        let _ = write!(label, "{hour}h");
        let x = px(geometry.x(hour) + geometry.bar_width / 2.0);
        Text::with_text_style(&label, Point::new(x, label_y), label_style, CENTERED)
            .draw(target)
            .ok();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::colors::{DAY, NIGHT};
    use crate::history::generate_hourly_stats;

    fn canvas() -> SimulatorDisplay<Rgb565> { SimulatorDisplay::new(Size::new(308, 65)) }

    fn count_in(
        display: &SimulatorDisplay<Rgb565>,
        area: Rectangle,
        color: Rgb565,
    ) -> usize {
        area.points().filter(|p| display.get_pixel(*p) == color).count()
    }

    fn flat(value: f32) -> [HourlyStat; 24] {
        core::array::from_fn(|h| HourlyStat {
            hour: h as u8,
            min: value,
            max: value,
            avg: value,
        })
    }

    #[test]
    fn test_empty_stats_blank_canvas() {
        let mut display = canvas();
        draw_bar_chart(&mut display, &[], 12, &NIGHT);
        let all = display.bounding_box();
        assert_eq!(count_in(&display, all, NIGHT.card), 308 * 65);
    }

    #[test]
    fn test_identical_records_draw_flat_markers() {
        let mut display = canvas();
        draw_bar_chart(&mut display, &flat(15.0), 99, &DAY);

        // Every bar has zero height: no translucent fill anywhere
        let bar_color = blend(DAY.card, DAY.primary, BAR_ALPHA);
        let all = display.bounding_box();
        assert_eq!(count_in(&display, all, bar_color), 0, "Zero-height bars draw nothing");

        // Average markers all sit on the same rows at the bottom of the plot
        let marker_row = Rectangle::new(Point::new(0, 44), Size::new(308, 2));
        assert!(count_in(&display, marker_row, DAY.secondary) > 24 * 6);
    }

    #[test]
    fn test_current_hour_outline() {
        let mut rng = StdRng::seed_from_u64(5);
        let stats = generate_hourly_stats(&mut rng);

        let mut display = canvas();
        draw_bar_chart(&mut display, &stats, 12, &NIGHT);

        let bar_w = 308.0 / 24.0;
        let column_12 = Rectangle::new(Point::new((12.0 * bar_w) as i32, 0), Size::new(bar_w as u32, 45));
        let column_3 = Rectangle::new(Point::new((3.0 * bar_w) as i32 + 1, 0), Size::new(bar_w as u32 - 1, 45));
        assert!(count_in(&display, column_12, NIGHT.warning) > 10, "Current hour is outlined");
        assert_eq!(count_in(&display, column_3, NIGHT.warning), 0, "Other hours are not");
    }

    #[test]
    fn test_hour_labels_below_plot() {
        let mut display = canvas();
        draw_bar_chart(&mut display, &flat(10.0), 0, &NIGHT);

        let label_band = Rectangle::new(Point::new(0, 50), Size::new(308, 15));
        assert!(count_in(&display, label_band, NIGHT.text_secondary) > 20, "Hour labels are drawn");
    }

    #[test]
    fn test_bars_use_translucent_primary() {
        let stats = [
            HourlyStat {
                hour: 0,
                min: 10.0,
                max: 20.0,
                avg: 15.0,
            },
            HourlyStat {
                hour: 1,
                min: 12.0,
                max: 18.0,
                avg: 14.0,
            },
        ];
        let mut display = canvas();
        draw_bar_chart(&mut display, &stats, 23, &NIGHT);

        // Column 0 spans the full plot height; y = 5 is well inside the bar
        let fill = blend(NIGHT.card, NIGHT.primary, BAR_ALPHA);
        assert_eq!(display.get_pixel(Point::new(6, 5)), fill);
        assert_ne!(fill, NIGHT.primary);
    }

    #[test]
    fn test_redraw_does_not_accumulate() {
        let pixels = |display: &SimulatorDisplay<Rgb565>| -> Vec<Rgb565> {
            display.bounding_box().points().map(|p| display.get_pixel(p)).collect()
        };
        let stats = generate_hourly_stats(&mut StdRng::seed_from_u64(3));

        let mut first = canvas();
        draw_bar_chart(&mut first, &stats, 14, &NIGHT);

        let mut second = canvas();
        draw_bar_chart(&mut second, &generate_hourly_stats(&mut StdRng::seed_from_u64(8)), 2, &DAY);
        draw_bar_chart(&mut second, &stats, 14, &NIGHT);

        assert_eq!(pixels(&first), pixels(&second), "Each draw fully overwrites the canvas");
    }
}
