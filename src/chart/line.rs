//! Line chart of the rolling exterior temperature history.
//!
//! # Layers
//!
//! Drawn back to front onto a cleared canvas:
//!
//! 1. Area fill under the polyline with a vertical opacity gradient
//! 2. Three horizontal gridlines at quarter heights
//! 3. The polyline through every sample (2px primary)
//! 4. Small dots on every 4th sample
//! 5. A larger marker on the most recent sample
//! 6. Max/min labels with indicator dots, and the current-value label
//!
//! The fill is drawn first because the panel has no alpha channel: each fill
//! pixel is the primary color pre-blended with the canvas background, so later
//! layers must overwrite it rather than the other way round.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, Line, Polyline, PrimitiveStyle},
    text::Text,
};
use heapless::String;

use super::geometry::{LineGeometry, ValueScale, px};
use crate::colors::{Palette, blend, grid_color};
use crate::styles::{CHART_FONT, LEFT_ALIGNED, RIGHT_ALIGNED};

// =============================================================================
// Layout Constants
// =============================================================================

/// Opacity of the fill at the top edge of the canvas.
pub const FILL_ALPHA_TOP: f32 = 0x60 as f32 / 255.0;

/// Opacity of the fill at the bottom edge of the canvas.
pub const FILL_ALPHA_BOTTOM: f32 = 0x10 as f32 / 255.0;

/// Every n-th sample gets a dot marker.
pub const DOT_EVERY: usize = 4;

/// Dot marker diameter (radius 1.5px).
const DOT_DIAMETER: u32 = 3;

/// Current-value marker diameter (radius 3px).
const CURRENT_DIAMETER: u32 = 6;

/// Max/min indicator dot diameter (radius 2px).
const INDICATOR_DIAMETER: u32 = 4;

/// Right edge of the max/min labels.
const LABEL_RIGHT_X: i32 = 30;

/// x of the max/min indicator dots.
const INDICATOR_X: i32 = 5;

/// Polyline stroke width.
const LINE_WIDTH: u32 = 2;

// =============================================================================
// Rendering
// =============================================================================

/// Render the temperature history onto `target`.
///
/// The canvas size is taken from the target's bounding box. The canvas is
/// cleared to `palette.card` first; an empty history leaves it blank.
///
/// # Parameters
/// - `target`: Raster surface (typically a cropped region of the panel)
/// - `history`: Samples, oldest first
/// - `palette`: Day or night palette
/// - `night_mode`: Selects the gridline tint
pub fn draw_line_chart<D>(
    target: &mut D,
    history: &[f32],
    palette: &Palette,
    night_mode: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    target.clear(palette.card).ok();

    let Some(scale) = ValueScale::from_values(history.iter().copied()) else {
        return;
    };
    let size = target.bounding_box().size;
    let geometry = LineGeometry::for_canvas(size);
    let count = history.len();

    let points: Vec<Point> = history
        .iter()
        .enumerate()
        .map(|(i, v)| Point::new(px(geometry.x(i, count)), px(geometry.y(*v, &scale))))
        .collect();

    draw_fill(target, &geometry, history, &scale, palette);
    draw_grid(target, &geometry, palette, night_mode);

    if points.len() > 1 {
        Polyline::new(&points)
            .into_styled(PrimitiveStyle::with_stroke(palette.primary, LINE_WIDTH))
            .draw(target)
            .ok();
    }

    let dot_style = PrimitiveStyle::with_fill(palette.primary);
    for point in points.iter().step_by(DOT_EVERY) {
        Circle::with_center(*point, DOT_DIAMETER).into_styled(dot_style).draw(target).ok();
    }

    if let Some(current) = points.last() {
        Circle::with_center(*current, CURRENT_DIAMETER)
            .into_styled(PrimitiveStyle::with_fill(palette.secondary))
            .draw(target)
            .ok();
    }

    draw_labels(target, &geometry, history, &scale, palette, size);
}

/// Gradient area between the polyline and the bottom edge.
fn draw_fill<D>(
    target: &mut D,
    geometry: &LineGeometry,
    history: &[f32],
    scale: &ValueScale,
    palette: &Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let height = geometry.height.max(1.0);
    let bottom = geometry.height as i32;
    let row_colors: Vec<Rgb565> = (0..bottom.max(0))
        .map(|y| {
            let t = y as f32 / height;
            let alpha = (FILL_ALPHA_BOTTOM - FILL_ALPHA_TOP).mul_add(t, FILL_ALPHA_TOP);
            blend(palette.card, palette.primary, alpha)
        })
        .collect();

    let first_x = px(geometry.left);
    let last_x = px(geometry.x(history.len().saturating_sub(1), history.len()));

    let pixels = (first_x..=last_x).flat_map(|x| {
        let top = geometry
            .y_at(x as f32, history, scale)
            .map_or(bottom, |y| y.round() as i32)
            .clamp(0, bottom);
        let colors = &row_colors;
        (top..bottom).map(move |y| Pixel(Point::new(x, y), colors[y as usize]))
    });
    target.draw_iter(pixels).ok();
}

/// Horizontal gridlines at one, two and three quarters of the height.
fn draw_grid<D>(
    target: &mut D,
    geometry: &LineGeometry,
    palette: &Palette,
    night_mode: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let style = PrimitiveStyle::with_stroke(grid_color(palette, night_mode), 1);
    let start_x = px(geometry.left);
    let end_x = px(geometry.left + geometry.width);
    for k in 1..4 {
        let y = px(geometry.height / 4.0 * k as f32);
        Line::new(Point::new(start_x, y), Point::new(end_x, y)).into_styled(style).draw(target).ok();
    }
}

fn degrees(value: f32) -> String<12> {
    let mut text = String::new();
    let _ = write!(text, "{value:.1}°");
    text
}

/// Max/min labels on the left, current value next to the last sample.
fn draw_labels<D>(
    target: &mut D,
    geometry: &LineGeometry,
    history: &[f32],
    scale: &ValueScale,
    palette: &Palette,
    size: Size,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let max_y = px(geometry.y(scale.max, scale));
    let min_y = px(geometry.y(scale.min, scale));

    for (value, y, color) in [(scale.max, max_y, palette.warning), (scale.min, min_y, palette.primary)] {
        Text::with_text_style(
            &degrees(value),
            Point::new(LABEL_RIGHT_X, y + 3),
            MonoTextStyle::new(CHART_FONT, color),
            RIGHT_ALIGNED,
        )
        .draw(target)
        .ok();
        Circle::with_center(Point::new(INDICATOR_X, y), INDICATOR_DIAMETER)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(target)
            .ok();
    }

    let Some(&current) = history.last() else {
        return;
    };
    let count = history.len();
    let x = px(geometry.x(count - 1, count));
    let y = px(geometry.y(current, scale));
    let text = degrees(current);
    let style = MonoTextStyle::new(CHART_FONT, palette.secondary);

    // Keep the label on the canvas: flip to the left of the marker near the edge
    let text_width = (text.chars().count() as u32 * CHART_FONT.character_size.width) as i32;
    let label = if x + 6 + text_width <= size.width as i32 {
        Text::with_text_style(&text, Point::new(x + 6, y - 2), style, LEFT_ALIGNED)
    } else {
        Text::with_text_style(&text, Point::new(x - 6, y - 2), style, RIGHT_ALIGNED)
    };
    label.draw(target).ok();
}

// =============================================================================
// Unit Tests
// =============================================================================
