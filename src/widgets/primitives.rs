//! Low-level drawing primitives shared across widgets.
//!
//! # Card Background
//!
//! Every panel sits on a card: a filled rectangle in `palette.card` with a 1px
//! `palette.border` outline. Cards are redrawn every frame so stale text from
//! the previous frame is always covered.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
    text::Text,
};
use heapless::String;

use crate::colors::Palette;
use crate::state::Trend;
use crate::styles::{LABEL_FONT, LEFT_ALIGNED};

/// Draw a panel card filling `area`.
pub fn draw_card<D>(
    display: &mut D,
    area: Rectangle,
    palette: &Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let style = PrimitiveStyleBuilder::new()
        .fill_color(palette.card)
        .stroke_color(palette.border)
        .stroke_width(1)
        .build();
    area.into_styled(style).draw(display).ok();
}

/// Draw a trend arrow centered on `center`.
///
/// `Up` and `Down` are a vertical shaft with a two-segment head; `Stable` is
/// the same arrow turned to point right.
///
/// # Arrow Dimensions
/// - Length: 8px (center ± 4)
/// - Head width: 6px (center ± 3)
pub fn draw_trend_arrow<D>(
    display: &mut D,
    center: Point,
    trend: Trend,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let style = PrimitiveStyle::with_stroke(color, 1);
    let Point { x, y } = center;
    let segments = match trend {
        Trend::Up => [
            (Point::new(x, y + 4), Point::new(x, y - 4)),
            (Point::new(x - 3, y - 1), Point::new(x, y - 4)),
            (Point::new(x + 3, y - 1), Point::new(x, y - 4)),
        ],
        Trend::Down => [
            (Point::new(x, y - 4), Point::new(x, y + 4)),
            (Point::new(x - 3, y + 1), Point::new(x, y + 4)),
            (Point::new(x + 3, y + 1), Point::new(x, y + 4)),
        ],
        Trend::Stable => [
            (Point::new(x - 4, y), Point::new(x + 4, y)),
            (Point::new(x + 1, y - 3), Point::new(x + 4, y)),
            (Point::new(x + 1, y + 3), Point::new(x + 4, y)),
        ],
    };
    for (start, end) in segments {
        Line::new(start, end).into_styled(style).draw(display).ok();
    }
}

/// Palette role for a trend: rising warm, falling cool, stable neutral.
pub const fn trend_color(
    trend: Trend,
    palette: &Palette,
) -> Rgb565 {
    match trend {
        Trend::Up => palette.warning,
        Trend::Down => palette.primary,
        Trend::Stable => palette.text_secondary,
    }
}

/// Draw a large value followed by a small unit on the same baseline.
///
/// # Returns
/// x just past the unit, for placing further inline content.
pub fn draw_value_with_unit<D>(
    display: &mut D,
    position: Point,
    value: &str,
    value_font: &MonoFont<'_>,
    unit: &str,
    color: Rgb565,
    unit_color: Rgb565,
) -> i32
where
    D: DrawTarget<Color = Rgb565>,
{
    let value_end = Text::with_text_style(value, position, MonoTextStyle::new(value_font, color), LEFT_ALIGNED)
        .draw(display)
        .unwrap_or(position);
    let unit_start = Point::new(value_end.x + 2, position.y);
    Text::with_text_style(unit, unit_start, MonoTextStyle::new(LABEL_FONT, unit_color), LEFT_ALIGNED)
        .draw(display)
        .map_or(unit_start.x, |end| end.x)
}

/// Format a temperature with one decimal, without unit.
pub fn format_temp(value: f32) -> String<12> {
    let mut text = String::new();
    let _ = write!(text, "{value:.1}");
    text
}

/// Format `"{label}{value}{suffix}"` into a short buffer, e.g. `"HUM 58%"`.
pub fn format_labeled<V: core::fmt::Display>(
    label: &str,
    value: V,
    suffix: &str,
) -> String<24> {
    let mut text = String::new();
    let _ = write!(text, "{label}{value}{suffix}");
    text
}

// =============================================================================
// Unit Tests
// =============================================================================
