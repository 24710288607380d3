//! Derived analytics over the history window and the hourly snapshot.
//!
//! Both functions are total: short or empty input yields a defined default
//! (`Trend::Stable`, zeroed stats) instead of a division by zero or an
//! out-of-range index.

use crate::history::HourlyStat;
use crate::state::Trend;
use crate::thresholds::OVERALL_TREND_THRESHOLD;

/// Samples averaged on each side of the overall-trend comparison.
pub const TREND_WINDOW: usize = 6;

// =============================================================================
// Overall Trend
// =============================================================================

/// Compare the mean of the last 6 samples against the mean of the 6 before.
///
/// # Returns
/// `Stable` if the means differ by less than 0.3°C or fewer than 12 samples
/// are available, otherwise `Up` or `Down` by sign.
pub fn overall_trend(history: &[f32]) -> Trend {
    let len = history.len();
    if len < TREND_WINDOW * 2 {
        return Trend::Stable;
    }

    let recent = mean(&history[len - TREND_WINDOW..]);
    let older = mean(&history[len - TREND_WINDOW * 2..len - TREND_WINDOW]);
    Trend::classify(recent - older, OVERALL_TREND_THRESHOLD)
}

fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

// =============================================================================
// Daily Statistics
// =============================================================================

/// Summary of the hourly snapshot shown on the history page.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DailyStats {
    /// Lowest hourly minimum.
    pub min: f32,
    /// Highest hourly maximum.
    pub max: f32,
    /// Mean of the hourly averages.
    pub avg: f32,
    /// `max - min`.
    pub variation: f32,
}

/// Reduce the hourly records to day-level min/max/avg/variation.
///
/// Returns all zeros for an empty slice.
pub fn daily_stats(hourly: &[HourlyStat]) -> DailyStats {
    if hourly.is_empty() {
        return DailyStats::default();
    }

    let min = hourly.iter().map(|s| s.min).fold(f32::INFINITY, f32::min);
    let max = hourly.iter().map(|s| s.max).fold(f32::NEG_INFINITY, f32::max);
    let avg = hourly.iter().map(|s| s.avg).sum::<f32>() / hourly.len() as f32;

    DailyStats {
        min,
        max,
        avg,
        variation: max - min,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
