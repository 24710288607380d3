//! Rolling temperature history and the hourly statistics snapshot.
//!
//! # Temperature History
//!
//! [`TemperatureHistory`] is a fixed window of [`HISTORY_LEN`] exterior
//! temperature samples, oldest first. Every [`advance`](TemperatureHistory::advance)
//! drops exactly one sample from the front and appends exactly one at the back,
//! so the length never changes. The new sample is a random step of up to ±1°C
//! from the previous last sample, clamped to the exterior range.
//!
//! # Hourly Statistics
//!
//! [`generate_hourly_stats`] synthesizes 24 `{min, max, avg}` records from a
//! smooth daily curve peaking at noon:
//!
//! ```text
//! base(h) = 15 + 8 * sin((h - 6) * PI / 12) + U(0, 3)
//! min     = base - U(0, 2)
//! max     = base + U(0, 3)
//! avg     = base
//! ```
//!
//! The snapshot is generated once per session and never mutated. Note that
//! `min <= avg <= max` holds by construction but is not re-checked.

use core::f32::consts::PI;

use rand::Rng;

use crate::thresholds::HISTORY_TEMP_C;

// =============================================================================
// Temperature History
// =============================================================================

/// Number of samples in the line-chart window.
pub const HISTORY_LEN: usize = 24;

/// Maximum step between consecutive history samples (°C).
pub const HISTORY_STEP_C: f32 = 1.0;

/// Reference day used to seed the window (exterior °C, oldest first).
const INITIAL_HISTORY: [f32; HISTORY_LEN] = [
    15.2, 14.8, 14.5, 14.1, 13.9, 13.7, 14.2, 15.8, 17.3, 19.1, 20.8, 22.1, //
    23.4, 24.2, 23.8, 23.1, 22.5, 21.3, 20.1, 19.4, 18.9, 18.5, 18.2, 18.7,
];

/// Fixed-length FIFO window of exterior temperature samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemperatureHistory {
    samples: [f32; HISTORY_LEN],
}

impl Default for TemperatureHistory {
    fn default() -> Self { Self { samples: INITIAL_HISTORY } }
}

impl TemperatureHistory {
    /// Build a window from explicit samples, oldest first. Values are clamped.
    pub fn from_samples(samples: [f32; HISTORY_LEN]) -> Self {
        Self {
            samples: samples.map(|v| HISTORY_TEMP_C.clamp(v)),
        }
    }

    /// Shift out the oldest sample and append `last + U(-1, 1)`, clamped.
    ///
    /// # Returns
    /// The advanced window; `self` is left untouched.
    pub fn advance<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Self {
        let step = rng.random_range(-HISTORY_STEP_C..=HISTORY_STEP_C);
        self.push(self.latest() + step)
    }

    /// Shift out the oldest sample and append `value` (clamped).
    pub fn push(
        &self,
        value: f32,
    ) -> Self {
        let mut samples = self.samples;
        samples.rotate_left(1);
        samples[HISTORY_LEN - 1] = HISTORY_TEMP_C.clamp(value);
        Self { samples }
    }

    /// Most recent sample.
    #[inline]
    pub const fn latest(&self) -> f32 { self.samples[HISTORY_LEN - 1] }

    /// All samples, oldest first.
    #[inline]
    pub const fn as_slice(&self) -> &[f32] { &self.samples }

    /// Always [`HISTORY_LEN`].
    #[inline]
    #[allow(clippy::len_without_is_empty)] // Fixed-size window, never empty
    pub const fn len(&self) -> usize { HISTORY_LEN }
}

// =============================================================================
// Hourly Statistics
// =============================================================================

/// Number of hourly records (one per hour of the day).
pub const HOURS_PER_DAY: usize = 24;

/// One hour of the daily statistics snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HourlyStat {
    /// Hour of day, 0..=23.
    pub hour: u8,
    pub min: f32,
    pub max: f32,
    pub avg: f32,
}

/// Smooth daily temperature curve without noise: 15°C mean, 8°C amplitude,
/// crossing the mean at 06:00 and peaking at 12:00.
#[inline]
pub fn daily_curve(hour: u8) -> f32 { 8.0f32.mul_add(((f32::from(hour) - 6.0) * PI / 12.0).sin(), 15.0) }

/// Generate the 24 hourly records for this session.
pub fn generate_hourly_stats<R: Rng>(rng: &mut R) -> [HourlyStat; HOURS_PER_DAY] {
    core::array::from_fn(|index| {
        let hour = index as u8;
        let base = daily_curve(hour) + rng.random_range(0.0..3.0);
        let min = base - rng.random_range(0.0..2.0);
        let max = base + rng.random_range(0.0..3.0);
        HourlyStat {
            hour,
            min,
            max,
            avg: base,
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
