// Crate-level lints: Allow common graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional f32->i32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // usize/i32->f32 in chart scaling
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for our value ranges
#![allow(clippy::cast_sign_loss)] // f32->u32 where we know the value is positive

//! Simulated weather-station display.
//!
//! A fixed-size 320×240 panel showing interior/exterior climate readings, a
//! system-health panel and two charts drawn into a 308×65 canvas. All data is
//! synthesized in-process by random walks; there is no sensor or network I/O.
//!
//! # Modules
//!
//! - [`thresholds`]: Value ranges, clamping and trend/alarm thresholds
//! - [`state`]: Climate readings, system health and the alarm dwell timer
//! - [`history`]: 24-sample rolling temperature window and hourly statistics
//! - [`analytics`]: Overall trend and daily min/max/avg
//! - [`simulation`]: Pure random-walk transition `tick(state) -> state'`
//! - [`scheduler`]: Cooperative timer loop emitting typed tick events
//! - [`station`]: Single state owner reducing tick events into snapshots
//! - [`chart`]: Line chart and bar chart renderers
//! - [`render`], [`widgets`], [`styles`], [`colors`], [`pages`]: Panel presentation
//! - [`app`]: Scheduler + station + display wired together
//! - [`config`], [`error`], [`cli`]: Configuration, errors and command line
//!
//! # Timing
//!
//! ```text
//! ClockTick    every 1s   clock text, night mode, uptime
//! BlinkTick    every 1s   header colon / alarm blink
//! SimTick      every 5s   random-walk all metrics, alarm detection
//! HistoryTick  every 30s  shift + append the chart history
//! AlarmExpired one-shot   3s after the most recent alarm
//! ```

pub mod analytics;
pub mod app;
pub mod chart;
pub mod cli;
pub mod colors;
pub mod config;
pub mod error;
pub mod history;
pub mod pages;
pub mod render;
pub mod scheduler;
pub mod simulation;
pub mod state;
pub mod station;
pub mod styles;
pub mod thresholds;
pub mod widgets;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
pub use pages::Page;
pub use scheduler::{Scheduler, TickEvent};
pub use state::{ClimateReading, ExteriorReading, StationState, SystemHealth, Trend};
pub use station::{Effects, Station, StationSnapshot};
