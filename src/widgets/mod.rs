//! Widget components for the weather panel.
//!
//! - [`header`]: Clock, page name, date and battery
//! - [`panels`]: Reading panels for both pages and the chart caption
//! - [`primitives`]: Cards, trend arrows and text helpers shared by the above
//!
//! # Architecture
//!
//! Each panel draws, in order:
//! 1. Card background with border
//! 2. Title at the top-left
//! 3. Main value in the large font
//! 4. Secondary lines (humidity, status, class)
//!
//! All widgets are generic over `DrawTarget<Color = Rgb565>`, take their
//! colors from a [`Palette`](crate::colors::Palette) and format text into
//! `heapless::String` buffers.

mod header;
mod panels;
mod primitives;

pub use header::{battery_fill_width, draw_header};
pub use panels::{
    CAPTION_AREA,
    CHART_AREA,
    DAILY_AREA,
    EXTERIOR_AREA,
    INTERIOR_AREA,
    PRESSURE_AREA,
    SYSTEM_AREA,
    band_color,
    draw_chart_caption,
    draw_daily_panel,
    draw_exterior_panel,
    draw_interior_panel,
    draw_pressure_panel,
    draw_system_panel,
    exterior_temp_color,
    pressure_color,
};
pub use primitives::{draw_card, draw_trend_arrow, trend_color};
