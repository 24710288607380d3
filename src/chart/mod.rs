//! Chart renderers for the bottom strip of the panel.
//!
//! Both renderers are generic over any `DrawTarget<Color = Rgb565>` and take
//! their canvas size from the target's bounding box, so the caller decides
//! where the chart lands by handing in a cropped view of the display.
//!
//! - [`draw_line_chart`]: rolling exterior temperature history (main page)
//! - [`draw_bar_chart`]: hourly min/max/avg records (history page)
//!
//! Each call clears its canvas first; redrawing never accumulates pixels from
//! the previous frame.

mod bars;
pub mod geometry;
mod line;

pub use bars::{BAR_ALPHA, LABEL_EVERY_HOURS, draw_bar_chart};
pub use geometry::{BarGeometry, BarSpan, LineGeometry, ValueScale};
pub use line::{DOT_EVERY, FILL_ALPHA_BOTTOM, FILL_ALPHA_TOP, draw_line_chart};
