//! Color palettes for the weather panel.
//!
//! The panel has two palettes: a day palette and a brighter night palette,
//! selected from the wall-clock hour (night is 20:00 to 06:59). Both are
//! expressed in RGB565, the native format of the target display.
//!
//! # Opacity Without Alpha
//!
//! RGB565 has no alpha channel. Translucent fills (chart gradient, min-max
//! bars) are produced by [`blend`], which interpolates a foreground color
//! toward the canvas background. `blend(bg, fg, 0.25)` is what a 25% opaque
//! `fg` looks like when drawn over `bg`.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black. Used for the panel border and clears.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Used for emphasized values.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Convert an 8-bit-per-channel color to RGB565 by truncating low bits.
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgb565 { Rgb565::new(r >> 3, g >> 2, b >> 3) }

// =============================================================================
// Palette
// =============================================================================

/// Named color roles shared by every panel and chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Main accent: chart line, gradient fill, range bars.
    pub primary: Rgb565,
    /// Current-value marker and average markers.
    pub secondary: Rgb565,
    /// Section titles on the history page.
    pub accent: Rgb565,
    /// Healthy status values.
    pub success: Rgb565,
    /// Maximum label, current-hour outline, warning status.
    pub warning: Rgb565,
    /// Alarm and danger status.
    pub danger: Rgb565,
    /// Primary text.
    pub text: Rgb565,
    /// Labels and axis text.
    pub text_secondary: Rgb565,
    /// Panel background.
    pub background: Rgb565,
    /// Card and chart-canvas background.
    pub card: Rgb565,
    /// Card border lines.
    pub border: Rgb565,
}

/// Day palette (07:00 to 19:59).
pub const DAY: Palette = Palette {
    primary: rgb(0x08, 0x91, 0xb2),
    secondary: rgb(0xd9, 0x77, 0x06),
    accent: rgb(0x7c, 0x3a, 0xed),
    success: rgb(0x05, 0x96, 0x69),
    warning: rgb(0xea, 0x58, 0x0c),
    danger: rgb(0xdc, 0x26, 0x26),
    text: rgb(0xe2, 0xe8, 0xf0),
    text_secondary: rgb(0x94, 0xa3, 0xb8),
    background: rgb(0x33, 0x41, 0x55),
    card: rgb(0x1e, 0x29, 0x3b),
    border: rgb(0x47, 0x55, 0x69),
};

/// Night palette (20:00 to 06:59). Brighter accents on a darker base.
pub const NIGHT: Palette = Palette {
    primary: rgb(0x06, 0xb6, 0xd4),
    secondary: rgb(0xf5, 0x9e, 0x0b),
    accent: rgb(0x8b, 0x5c, 0xf6),
    success: rgb(0x10, 0xb9, 0x81),
    warning: rgb(0xf9, 0x73, 0x16),
    danger: rgb(0xef, 0x44, 0x44),
    text: rgb(0xf1, 0xf5, 0xf9),
    text_secondary: rgb(0xcb, 0xd5, 0xe1),
    background: rgb(0x1e, 0x29, 0x3b),
    card: rgb(0x0f, 0x17, 0x2a),
    border: rgb(0x33, 0x41, 0x55),
};

impl Palette {
    /// Select the palette for the current display mode.
    #[inline]
    pub const fn for_mode(night_mode: bool) -> &'static Self { if night_mode { &NIGHT } else { &DAY } }

    /// Palette color for a status level.
    #[inline]
    pub const fn level(&self, level: crate::thresholds::Level) -> Rgb565 {
        match level {
            crate::thresholds::Level::Good => self.success,
            crate::thresholds::Level::Warning => self.warning,
            crate::thresholds::Level::Danger => self.danger,
        }
    }
}

/// Gridline color for the line chart. Slate at 10% (night) or 15% (day)
/// opacity over the canvas background.
pub fn grid_color(palette: &Palette, night_mode: bool) -> Rgb565 {
    if night_mode {
        blend(palette.card, rgb(0x94, 0xa3, 0xb8), 0.10)
    } else {
        blend(palette.card, rgb(0xcb, 0xd5, 0xe1), 0.15)
    }
}

// =============================================================================
// Blending
// =============================================================================

/// Interpolate from `base` toward `overlay` by `alpha` (0.0 = base, 1.0 = overlay).
///
/// Operates per channel on the raw 5-6-5 components with rounding, so
/// `alpha = 0.0` and `alpha = 1.0` return the inputs exactly.
pub fn blend(base: Rgb565, overlay: Rgb565, alpha: f32) -> Rgb565 {
    let alpha = alpha.clamp(0.0, 1.0);
    let mix = |from: u8, to: u8| -> u8 {
        let from = f32::from(from);
        let to = f32::from(to);
        (to - from).mul_add(alpha, from).round() as u8
    };
    Rgb565::new(
        mix(base.r(), overlay.r()),
        mix(base.g(), overlay.g()),
        mix(base.b(), overlay.b()),
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
