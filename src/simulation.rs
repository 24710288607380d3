//! Random-walk simulator for the station readings.
//!
//! [`tick`] is a pure transition: it takes the current [`StationState`] and a
//! random source and returns the next state. It never touches the clock, the
//! alarm timer or the chart history; those belong to the station reducer and
//! run on their own cadences.
//!
//! # One Tick
//!
//! ```text
//! 1. Battery       P(drain) = 10%      -> -1%, floor 0
//! 2. Connectivity  P(flip)  = 5%       -> toggle is_online
//! 3. Exterior      (online only)       temp ±0.15, humidity ±1, pressure ±1,
//!                                      feels-like = temp ±1.5, trend
//! 4. Interior                          temp ±0.1, humidity ±1, trend
//! 5. System health                     cpu temp ±1.0, cpu ±5, ram ±2, wifi ±5
//! ```
//!
//! Every value is clamped to its range in [`crate::thresholds`] after the
//! step. Temperatures are rounded to one decimal after clamping.
//!
//! # Offline Exterior
//!
//! The exterior readings only evolve when the module is online both before and
//! after the connectivity draw. A module that drops out keeps its last reading,
//! and a module that reconnects reports fresh values from the next tick on.
//!
//! # Integer Noise
//!
//! Integer metrics move by a symmetric uniform step in `[-step, +step]`, so a
//! long run has no drift toward either bound.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::state::{ClimateReading, ExteriorReading, StationState, SystemHealth, Trend};
use crate::thresholds::{
    BATTERY_PCT, CPU_TEMP_C, CPU_USAGE_PCT, EXTERIOR_HUMIDITY_PCT, EXTERIOR_TEMP_C, INTERIOR_HUMIDITY_PCT,
    INTERIOR_TEMP_C, PRESSURE_HPA, RAM_USAGE_PCT, WIFI_SIGNAL_PCT, round_tenth,
};

// =============================================================================
// Parameters
// =============================================================================

/// Tunable probabilities and random-walk spans (`[simulation]` config section).
///
/// Float spans are full widths: a span of 0.3 draws from `[-0.15, +0.15]`.
/// Integer steps are half widths: a step of 1 draws from `{-1, 0, +1}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Probability of losing 1% battery per tick.
    pub battery_drain_probability: f64,
    /// Probability of the exterior module toggling online/offline per tick.
    pub connectivity_flip_probability: f64,
    pub exterior_temp_span: f32,
    /// Feels-like offset span around the exterior temperature.
    pub feels_like_span: f32,
    pub interior_temp_span: f32,
    pub cpu_temp_span: f32,
    pub exterior_humidity_step: i32,
    pub pressure_step: i32,
    pub interior_humidity_step: i32,
    pub cpu_usage_step: i32,
    pub ram_usage_step: i32,
    pub wifi_signal_step: i32,
    /// Fixed RNG seed for reproducible sessions. Random when unset.
    pub seed: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            battery_drain_probability: 0.10,
            connectivity_flip_probability: 0.05,
            exterior_temp_span: 0.3,
            feels_like_span: 3.0,
            interior_temp_span: 0.2,
            cpu_temp_span: 2.0,
            exterior_humidity_step: 1,
            pressure_step: 1,
            interior_humidity_step: 1,
            cpu_usage_step: 5,
            ram_usage_step: 2,
            wifi_signal_step: 5,
            seed: None,
        }
    }
}

impl SimulationParams {
    /// Parameters that never change anything: no events, zero spans.
    /// Useful as a baseline when testing one effect at a time.
    pub const fn frozen() -> Self {
        Self {
            battery_drain_probability: 0.0,
            connectivity_flip_probability: 0.0,
            exterior_temp_span: 0.0,
            feels_like_span: 0.0,
            interior_temp_span: 0.0,
            cpu_temp_span: 0.0,
            exterior_humidity_step: 0,
            pressure_step: 0,
            interior_humidity_step: 0,
            cpu_usage_step: 0,
            ram_usage_step: 0,
            wifi_signal_step: 0,
            seed: None,
        }
    }
}

// =============================================================================
// Random Helpers
// =============================================================================

/// Bernoulli draw. `p <= 0` (or NaN) never fires, `p >= 1` always fires.
#[inline]
fn chance<R: Rng>(
    rng: &mut R,
    p: f64,
) -> bool {
    rng.random::<f64>() < p
}

/// Uniform float in `[-span/2, +span/2]`. Zero for a zero or invalid span.
#[inline]
fn jitter<R: Rng>(
    rng: &mut R,
    span: f32,
) -> f32 {
    let half = span.abs() / 2.0;
    if half > 0.0 && half.is_finite() { rng.random_range(-half..=half) } else { 0.0 }
}

/// Uniform integer in `[-step, +step]`.
#[inline]
fn step<R: Rng>(
    rng: &mut R,
    step: i32,
) -> i32 {
    let step = step.saturating_abs();
    if step == 0 { 0 } else { rng.random_range(-step..=step) }
}

// =============================================================================
// Transition
// =============================================================================

/// Advance every simulated metric by one tick.
///
/// # Parameters
/// - `state`: Current station state (not modified)
/// - `params`: Probabilities and spans
/// - `rng`: Random source; a seeded `StdRng` makes the run reproducible
///
/// # Returns
/// The next state. The chart history is carried over unchanged.
pub fn tick<R: Rng>(
    state: &StationState,
    params: &SimulationParams,
    rng: &mut R,
) -> StationState {
    let mut battery_pct = state.battery_pct;
    if chance(rng, params.battery_drain_probability) {
        battery_pct = BATTERY_PCT.clamp(battery_pct.saturating_sub(1));
    }

    let was_online = state.exterior.is_online;
    let is_online = if chance(rng, params.connectivity_flip_probability) { !was_online } else { was_online };

    let exterior = if was_online && is_online {
        step_exterior(&state.exterior, params, rng)
    } else {
        ExteriorReading {
            is_online,
            ..state.exterior
        }
    };

    StationState {
        interior: step_interior(&state.interior, params, rng),
        exterior,
        system: step_system(&state.system, params, rng),
        battery_pct,
        history: state.history,
    }
}

fn step_exterior<R: Rng>(
    previous: &ExteriorReading,
    params: &SimulationParams,
    rng: &mut R,
) -> ExteriorReading {
    let prev_temp = previous.climate.temperature;
    let temperature = round_tenth(EXTERIOR_TEMP_C.clamp(prev_temp + jitter(rng, params.exterior_temp_span)));
    let humidity = EXTERIOR_HUMIDITY_PCT.clamp(previous.climate.humidity + step(rng, params.exterior_humidity_step));
    let pressure = PRESSURE_HPA.clamp(previous.pressure + step(rng, params.pressure_step));
    let feels_like = round_tenth(temperature + jitter(rng, params.feels_like_span));

    ExteriorReading {
        climate: ClimateReading {
            temperature,
            humidity,
            trend: Trend::between(prev_temp, temperature),
        },
        pressure,
        feels_like,
        is_online: true,
    }
}

fn step_interior<R: Rng>(
    previous: &ClimateReading,
    params: &SimulationParams,
    rng: &mut R,
) -> ClimateReading {
    let temperature =
        round_tenth(INTERIOR_TEMP_C.clamp(previous.temperature + jitter(rng, params.interior_temp_span)));
    let humidity = INTERIOR_HUMIDITY_PCT.clamp(previous.humidity + step(rng, params.interior_humidity_step));

    ClimateReading {
        temperature,
        humidity,
        trend: Trend::between(previous.temperature, temperature),
    }
}

fn step_system<R: Rng>(
    previous: &SystemHealth,
    params: &SimulationParams,
    rng: &mut R,
) -> SystemHealth {
    SystemHealth {
        cpu_temp_c: CPU_TEMP_C.clamp(previous.cpu_temp_c + jitter(rng, params.cpu_temp_span)),
        cpu_usage_pct: CPU_USAGE_PCT.clamp(previous.cpu_usage_pct + step(rng, params.cpu_usage_step)),
        ram_usage_pct: RAM_USAGE_PCT.clamp(previous.ram_usage_pct + step(rng, params.ram_usage_step)),
        wifi_signal_pct: WIFI_SIGNAL_PCT.clamp(previous.wifi_signal_pct + step(rng, params.wifi_signal_step)),
        uptime: previous.uptime,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
