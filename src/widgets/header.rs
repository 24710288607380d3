//! Header bar: clock, page name, date and battery.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ 14:32          LIVE            19/10/26  [███ ]  87%     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! All positions are `const`; only the strings and colors change per frame.
//! The clock colon is hidden on the "off" half of the blink cycle.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::Text,
};
use heapless::String;

use crate::{
    colors::Palette,
    config::{HEADER_HEIGHT, SCREEN_WIDTH},
    station::StationSnapshot,
    styles::{CENTERED, LABEL_FONT, LEFT_ALIGNED, RIGHT_ALIGNED, TITLE_FONT},
    thresholds::battery_level,
};

// =============================================================================
// Header Layout Constants
// =============================================================================

/// Full-width header rectangle.
const HEADER_RECT: Rectangle = Rectangle::new(Point::new(0, 0), Size::new(SCREEN_WIDTH, HEADER_HEIGHT));

/// Baseline-left of the clock.
const CLOCK_POS: Point = Point::new(6, 18);

/// Baseline-center of the page name.
const PAGE_POS: Point = Point::new((SCREEN_WIDTH / 2) as i32, 17);

/// Baseline-right of the date.
const DATE_POS: Point = Point::new(250, 17);

/// Battery outline (body only, the terminal nub sits on its right).
const BATTERY_BODY: Rectangle = Rectangle::new(Point::new(258, 8), Size::new(18, 10));

/// Battery terminal nub.
const BATTERY_NUB: Rectangle = Rectangle::new(Point::new(276, 11), Size::new(2, 4));

/// Baseline-right of the battery percentage.
const BATTERY_TEXT_POS: Point = Point::new((SCREEN_WIDTH - 6) as i32, 17);

/// Bottom border of the header.
const BORDER_START: Point = Point::new(0, HEADER_HEIGHT as i32 - 1);
const BORDER_END: Point = Point::new(SCREEN_WIDTH as i32 - 1, HEADER_HEIGHT as i32 - 1);

/// Clock text with the colon hidden on the off phase of the blink.
fn clock_text(snapshot: &StationSnapshot) -> String<8> {
    let time = snapshot.time_text();
    if snapshot.blink_on {
        return time;
    }
    let mut text = String::new();
    for c in time.chars() {
        let _ = text.push(if c == ':' { ' ' } else { c });
    }
    text
}

/// Width of the battery fill for a charge percentage.
pub const fn battery_fill_width(pct: u8) -> u32 {
    let inner = BATTERY_BODY.size.width - 4;
    let pct = if pct > 100 { 100 } else { pct as u32 };
    inner * pct / 100
}

/// Draw the header bar.
///
/// Redrawn every frame: it holds the clock, which changes every second.
pub fn draw_header<D>(
    display: &mut D,
    snapshot: &StationSnapshot,
    palette: &Palette,
) where
    D: DrawTarget<Color = Rgb565>,
{
    HEADER_RECT.into_styled(PrimitiveStyle::with_fill(palette.card)).draw(display).ok();
    Line::new(BORDER_START, BORDER_END)
        .into_styled(PrimitiveStyle::with_stroke(palette.border, 1))
        .draw(display)
        .ok();

    Text::with_text_style(
        &clock_text(snapshot),
        CLOCK_POS,
        MonoTextStyle::new(TITLE_FONT, palette.text),
        LEFT_ALIGNED,
    )
    .draw(display)
    .ok();

    Text::with_text_style(
        snapshot.page.title(),
        PAGE_POS,
        MonoTextStyle::new(LABEL_FONT, palette.accent),
        CENTERED,
    )
    .draw(display)
    .ok();

    Text::with_text_style(
        &snapshot.date_text(),
        DATE_POS,
        MonoTextStyle::new(LABEL_FONT, palette.text_secondary),
        RIGHT_ALIGNED,
    )
    .draw(display)
    .ok();

    let battery = snapshot.state.battery_pct;
    let color = palette.level(battery_level(battery));

    BATTERY_BODY.into_styled(PrimitiveStyle::with_stroke(color, 1)).draw(display).ok();
    BATTERY_NUB.into_styled(PrimitiveStyle::with_fill(color)).draw(display).ok();
    let fill = Rectangle::new(
        BATTERY_BODY.top_left + Point::new(2, 2),
        Size::new(battery_fill_width(battery), BATTERY_BODY.size.height - 4),
    );
    fill.into_styled(PrimitiveStyle::with_fill(color)).draw(display).ok();

    let mut text: String<8> = String::new();
    let _ = write!(text, "{battery}%");
    Text::with_text_style(&text, BATTERY_TEXT_POS, MonoTextStyle::new(LABEL_FONT, color), RIGHT_ALIGNED)
        .draw(display)
        .ok();
}

// =============================================================================
// Unit Tests
// =============================================================================
