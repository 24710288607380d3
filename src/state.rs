//! Station data model: climate readings, system health and the alarm timer.
//!
//! [`StationState`] is the complete mutable state of the simulated station. It
//! is a plain value: the simulator consumes one and returns the next
//! (`tick(&state) -> state'`), so every transition can be replayed from a seed.
//!
//! # Initial Values
//!
//! Each session starts from the same reference readings:
//!
//! | Quantity            | Value        |
//! |---------------------|--------------|
//! | Interior            | 23.2°C, 58%  |
//! | Exterior            | 18.7°C, 72%  |
//! | Pressure            | 1013 hPa     |
//! | Feels like          | 16.3°C       |
//! | Battery             | 87%          |
//! | CPU temp / usage    | 45.2°C, 23%  |
//! | RAM / Wi-Fi         | 67%, 85%     |
//! | Uptime              | 2d 14h 32m   |
//!
//! # Alarm Dwell
//!
//! [`AlarmState`] is a transient, not a latch. Raising it records a deadline;
//! the alarm clears itself once the clock passes that deadline. Raising it
//! again while active moves the deadline forward instead of stacking.

use core::fmt::Write;
use core::time::Duration;

use heapless::String;

use crate::history::TemperatureHistory;
use crate::thresholds::TICK_TREND_THRESHOLD;

// =============================================================================
// Trend
// =============================================================================

/// Short-term direction of a reading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

impl Trend {
    /// Classify a change: `Stable` if `|delta| < threshold`, otherwise by sign.
    #[inline]
    pub fn classify(delta: f32, threshold: f32) -> Self {
        if delta.abs() < threshold {
            Self::Stable
        } else if delta > 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }

    /// Per-tick trend between two consecutive readings.
    ///
    /// The difference is snapped to 0.01°C first: readings are rounded to
    /// tenths, and in `f32` a one-tenth step (18.7 -> 18.8) comes out as
    /// 0.0999985, just under the threshold.
    #[inline]
    pub fn between(previous: f32, current: f32) -> Self {
        let delta = ((current - previous) * 100.0).round() / 100.0;
        Self::classify(delta, TICK_TREND_THRESHOLD)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Up => "RISING",
            Self::Down => "FALLING",
            Self::Stable => "STABLE",
        }
    }
}

// =============================================================================
// Readings
// =============================================================================

/// Temperature, humidity and trend of one climate sensor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClimateReading {
    /// Temperature in °C, one decimal.
    pub temperature: f32,
    /// Relative humidity in %.
    pub humidity: i32,
    pub trend: Trend,
}

/// Exterior module reading. Frozen while the module is offline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExteriorReading {
    pub climate: ClimateReading,
    /// Barometric pressure in hPa.
    pub pressure: i32,
    /// Apparent temperature in °C. Not clamped.
    pub feels_like: f32,
    /// Radio link state of the exterior module.
    pub is_online: bool,
}

/// Board health of the station itself. Independent of the climate readings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SystemHealth {
    pub cpu_temp_c: f32,
    pub cpu_usage_pct: i32,
    pub ram_usage_pct: i32,
    pub wifi_signal_pct: i32,
    /// Time since the station booted.
    pub uptime: Duration,
}

/// Uptime of the station when the session starts (2d 14h 32m).
pub const INITIAL_UPTIME: Duration = Duration::from_secs(2 * 86_400 + 14 * 3_600 + 32 * 60);

/// Format an uptime as `"{d}d {h}h {m}m"`. Seconds are dropped.
pub fn format_uptime(uptime: Duration) -> String<16> {
    let total_minutes = uptime.as_secs() / 60;
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;

    let mut text: String<16> = String::new();
    let _ = write!(text, "{days}d {hours}h {minutes}m");
    text
}

impl SystemHealth {
    /// Uptime formatted for display.
    pub fn uptime_label(&self) -> String<16> { format_uptime(self.uptime) }
}

// =============================================================================
// Station State
// =============================================================================

/// Everything the simulator evolves.
#[derive(Clone, Debug, PartialEq)]
pub struct StationState {
    pub interior: ClimateReading,
    pub exterior: ExteriorReading,
    pub system: SystemHealth,
    /// Battery charge in %. Only ever decreases.
    pub battery_pct: u8,
    /// Rolling window of exterior temperatures for the line chart.
    pub history: TemperatureHistory,
}

impl Default for StationState {
    fn default() -> Self {
        Self {
            interior: ClimateReading {
                temperature: 23.2,
                humidity: 58,
                trend: Trend::Stable,
            },
            exterior: ExteriorReading {
                climate: ClimateReading {
                    temperature: 18.7,
                    humidity: 72,
                    trend: Trend::Up,
                },
                pressure: 1013,
                feels_like: 16.3,
                is_online: true,
            },
            system: SystemHealth {
                cpu_temp_c: 45.2,
                cpu_usage_pct: 23,
                ram_usage_pct: 67,
                wifi_signal_pct: 85,
                uptime: INITIAL_UPTIME,
            },
            battery_pct: 87,
            history: TemperatureHistory::default(),
        }
    }
}

// =============================================================================
// Alarm State
// =============================================================================

/// Temperature-swing alarm with a self-clearing dwell window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlarmState {
    active: bool,
    clears_at: Option<Duration>,
}

impl AlarmState {
    /// Raise (or re-raise) the alarm at `now` for `dwell`.
    ///
    /// # Returns
    /// The new deadline, to be scheduled as a one-shot expiry.
    pub fn raise(
        &mut self,
        now: Duration,
        dwell: Duration,
    ) -> Duration {
        let deadline = now + dwell;
        self.active = true;
        self.clears_at = Some(deadline);
        deadline
    }

    /// Clear the alarm if its deadline has passed.
    ///
    /// A stale expiry from an earlier raise is ignored because the deadline
    /// was moved forward. Returns `true` if the alarm was cleared.
    pub fn expire(
        &mut self,
        now: Duration,
    ) -> bool {
        if let Some(deadline) = self.clears_at
            && now >= deadline
        {
            self.active = false;
            self.clears_at = None;
            return true;
        }
        false
    }

    #[inline]
    pub const fn is_active(&self) -> bool { self.active }

    /// Deadline of the current dwell window, if raised.
    #[inline]
    pub const fn clears_at(&self) -> Option<Duration> { self.clears_at }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thresholds::round_tenth;

    // -------------------------------------------------------------------------
    // Trend Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_trend_classify() {
        assert_eq!(Trend::between(18.7, 18.9), Trend::Up, "+0.2 should be rising");
        assert_eq!(Trend::between(18.7, 18.5), Trend::Down, "-0.2 should be falling");
        assert_eq!(Trend::between(18.7, 18.75), Trend::Stable, "Below 0.1 is stable");
        assert_eq!(Trend::between(18.7, 18.7), Trend::Stable);
    }

    #[test]
    fn test_trend_one_tenth_step_is_movement() {
        assert_eq!(Trend::between(18.7, 18.8), Trend::Up, "+0.1 should be rising");
        assert_eq!(Trend::between(23.2, 23.3), Trend::Up, "+0.1 should be rising");
        assert_eq!(Trend::between(23.3, 23.2), Trend::Down, "-0.1 should be falling");
        assert_eq!(Trend::between(18.7, 18.79), Trend::Stable, "0.09 is still stable");

        for tenths in 150..350 {
            let previous = round_tenth(tenths as f32 / 10.0);
            let up = round_tenth(previous + 0.1);
            let down = round_tenth(previous - 0.1);
            assert_eq!(Trend::between(previous, up), Trend::Up, "{previous} -> {up}");
            assert_eq!(Trend::between(previous, down), Trend::Down, "{previous} -> {down}");
        }
    }

    #[test]
    fn test_trend_threshold_is_inclusive_for_change() {
        // |delta| < threshold is stable, so exactly the threshold counts as movement
        assert_eq!(Trend::classify(0.3, 0.3), Trend::Up);
        assert_eq!(Trend::classify(-0.3, 0.3), Trend::Down);
        assert_eq!(Trend::classify(0.29, 0.3), Trend::Stable);
    }

    #[test]
    fn test_trend_default_is_stable() {
        assert_eq!(Trend::default(), Trend::Stable);
        assert_eq!(Trend::Stable.label(), "STABLE");
    }

    // -------------------------------------------------------------------------
    // Default State Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_default_state_reference_values() {
        let state = StationState::default();
        assert_eq!(state.interior.temperature, 23.2);
        assert_eq!(state.interior.humidity, 58);
        assert_eq!(state.exterior.climate.temperature, 18.7);
        assert_eq!(state.exterior.climate.trend, Trend::Up);
        assert_eq!(state.exterior.pressure, 1013);
        assert!(state.exterior.is_online, "Exterior module starts online");
        assert_eq!(state.battery_pct, 87);
        assert_eq!(state.system.wifi_signal_pct, 85);
        assert_eq!(state.history.latest(), 18.7, "History ends at the current reading");
    }

    // -------------------------------------------------------------------------
    // Uptime Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_format_initial_uptime() {
        assert_eq!(format_uptime(INITIAL_UPTIME).as_str(), "2d 14h 32m");
    }

    #[test]
    fn test_format_uptime_rollover() {
        let one_minute_short = INITIAL_UPTIME + Duration::from_secs(59);
        assert_eq!(format_uptime(one_minute_short).as_str(), "2d 14h 32m", "Seconds are dropped");

        let next_day = Duration::from_secs(3 * 86_400);
        assert_eq!(format_uptime(next_day).as_str(), "3d 0h 0m");

        assert_eq!(format_uptime(Duration::ZERO).as_str(), "0d 0h 0m");
    }

    // -------------------------------------------------------------------------
    // Alarm Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_alarm_raise_and_expire() {
        let mut alarm = AlarmState::default();
        assert!(!alarm.is_active());

        let deadline = alarm.raise(Duration::from_secs(5), Duration::from_secs(3));
        assert_eq!(deadline, Duration::from_secs(8));
        assert!(alarm.is_active(), "Alarm should be active right after raise");

        assert!(!alarm.expire(Duration::from_secs(7)), "Too early to clear");
        assert!(alarm.is_active());

        assert!(alarm.expire(Duration::from_secs(8)), "Clears at the deadline");
        assert!(!alarm.is_active());
        assert_eq!(alarm.clears_at(), None);
    }

    #[test]
    fn test_alarm_retrigger_extends_window() {
        let mut alarm = AlarmState::default();
        alarm.raise(Duration::from_secs(5), Duration::from_secs(3));
        alarm.raise(Duration::from_secs(7), Duration::from_secs(3));

        // The first window's expiry time is now stale
        assert!(!alarm.expire(Duration::from_secs(8)), "Stale expiry must be ignored");
        assert!(alarm.is_active());
        assert!(alarm.expire(Duration::from_secs(10)));
    }

    #[test]
    fn test_alarm_expire_when_idle_is_noop() {
        let mut alarm = AlarmState::default();
        assert!(!alarm.expire(Duration::from_secs(100)));
        assert!(!alarm.is_active());
    }
}
