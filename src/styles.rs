//! Shared fonts and text alignments.
//!
//! Alignments are `const` so draw functions reference them directly instead
//! of rebuilding a `TextStyle` every frame. Colors depend on the active
//! palette, so fonts are exposed as references and callers build
//! `MonoTextStyle::new(FONT, palette.role)` at the call site.
//!
//! # Fonts
//!
//! The small fonts come from the ISO 8859-1 set so the degree sign renders.
//! `ProFont` only covers ASCII; values drawn with it carry units as a separate
//! small-font label.

use embedded_graphics::{
    mono_font::{
        MonoFont,
        iso_8859_1::{FONT_5X8, FONT_6X10, FONT_7X13_BOLD},
    },
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_14_POINT, PROFONT_18_POINT};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered text. Used for hour labels and panel values.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Left-aligned text. Used for panel labels and the current chart value.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).build();

/// Right-aligned text. Used for chart min/max labels and the header date.
pub const RIGHT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Right).build();

/// Left-aligned text positioned by its top edge. Used for multi-row panels.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

// =============================================================================
// Font References
// =============================================================================

/// Chart axis and value labels (5x8).
pub const CHART_FONT: &MonoFont = &FONT_5X8;

/// Panel labels and secondary readouts (6x10).
pub const LABEL_FONT: &MonoFont = &FONT_6X10;

/// Section titles and the header clock (7x13 bold).
pub const TITLE_FONT: &MonoFont = &FONT_7X13_BOLD;

/// Large temperature readouts (`ProFont` 18pt).
pub const VALUE_FONT: &MonoFont = &PROFONT_18_POINT;

/// Medium readouts that share a row with other values (`ProFont` 14pt).
pub const VALUE_FONT_MEDIUM: &MonoFont = &PROFONT_14_POINT;
