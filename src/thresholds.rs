//! Centralized metric ranges and threshold configuration.
//!
//! Every tracked quantity has a hard `[min, max]` range. Clamping is
//! saturating: a value that leaves its range is pinned to the nearest bound,
//! never reflected and never reported as an error.
//!
//! # Compile-Time Validation
//!
//! Each range and threshold group includes `const` assertions that verify
//! ordering at compile time, so a misconfigured bound fails the build.
//!
//! # Contents
//!
//! - Clamping ranges for climate, battery and system-health metrics
//! - Trend thresholds (per-tick and overall chart trend)
//! - Alarm threshold for sudden exterior temperature swings
//! - Extreme temperature alert thresholds
//! - Display classification (pressure class, weather band, status levels)

// =============================================================================
// Metric Range
// =============================================================================

/// Inclusive `[min, max]` range with saturating clamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetricRange<T> {
    /// Lower bound (inclusive).
    pub min: T,
    /// Upper bound (inclusive).
    pub max: T,
}

impl<T: PartialOrd + Copy> MetricRange<T> {
    /// Create a new range. `min` must not exceed `max`.
    pub const fn new(min: T, max: T) -> Self { Self { min, max } }

    /// Pin `value` to the nearest bound if it lies outside the range.
    #[inline]
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Check whether `value` lies within the range (bounds included).
    #[inline]
    pub fn contains(&self, value: T) -> bool { value >= self.min && value <= self.max }
}

// =============================================================================
// Climate Ranges
// =============================================================================

/// Exterior temperature range (°C).
pub const EXTERIOR_TEMP_C: MetricRange<f32> = MetricRange::new(-10.0, 40.0);

/// Exterior relative humidity range (%).
pub const EXTERIOR_HUMIDITY_PCT: MetricRange<i32> = MetricRange::new(20, 95);

/// Exterior barometric pressure range (hPa).
pub const PRESSURE_HPA: MetricRange<i32> = MetricRange::new(980, 1040);

/// Interior temperature range (°C).
pub const INTERIOR_TEMP_C: MetricRange<f32> = MetricRange::new(15.0, 35.0);

/// Interior relative humidity range (%).
pub const INTERIOR_HUMIDITY_PCT: MetricRange<i32> = MetricRange::new(30, 80);

/// Range of the samples held in the chart history (°C).
/// Same bounds as the exterior sensor.
pub const HISTORY_TEMP_C: MetricRange<f32> = EXTERIOR_TEMP_C;

const _: () = assert!(EXTERIOR_TEMP_C.min < EXTERIOR_TEMP_C.max);
const _: () = assert!(EXTERIOR_HUMIDITY_PCT.min < EXTERIOR_HUMIDITY_PCT.max);
const _: () = assert!(PRESSURE_HPA.min < PRESSURE_HPA.max);
const _: () = assert!(INTERIOR_TEMP_C.min < INTERIOR_TEMP_C.max);
const _: () = assert!(INTERIOR_HUMIDITY_PCT.min < INTERIOR_HUMIDITY_PCT.max);

// =============================================================================
// Battery and System Health Ranges
// =============================================================================

/// Battery level range (%). The model only ever drains.
pub const BATTERY_PCT: MetricRange<u8> = MetricRange::new(0, 100);

/// Board CPU temperature range (°C).
pub const CPU_TEMP_C: MetricRange<f32> = MetricRange::new(35.0, 80.0);

/// CPU usage range (%).
pub const CPU_USAGE_PCT: MetricRange<i32> = MetricRange::new(5, 95);

/// RAM usage range (%).
pub const RAM_USAGE_PCT: MetricRange<i32> = MetricRange::new(30, 90);

/// Wi-Fi signal strength range (%).
pub const WIFI_SIGNAL_PCT: MetricRange<i32> = MetricRange::new(20, 100);

const _: () = assert!(CPU_TEMP_C.min < CPU_TEMP_C.max);
const _: () = assert!(CPU_USAGE_PCT.min < CPU_USAGE_PCT.max);
const _: () = assert!(RAM_USAGE_PCT.min < RAM_USAGE_PCT.max);
const _: () = assert!(WIFI_SIGNAL_PCT.min < WIFI_SIGNAL_PCT.max);

// =============================================================================
// Trend and Alarm Thresholds
// =============================================================================

/// Per-tick change below which a reading's trend is `Stable` (°C).
pub const TICK_TREND_THRESHOLD: f32 = 0.1;

/// Difference between the recent and older chart averages below which the
/// overall trend is `Stable` (°C).
pub const OVERALL_TREND_THRESHOLD: f32 = 0.3;

/// Exterior temperature change between consecutive ticks that raises the
/// alarm (°C). The comparison is strict: exactly 0.5 does not trigger.
pub const ALARM_DELTA_C: f32 = 0.5;

const _: () = assert!(TICK_TREND_THRESHOLD < ALARM_DELTA_C);

/// Check whether an exterior temperature swing should raise the alarm.
#[inline]
pub fn is_alarm_swing(previous: f32, current: f32) -> bool { (current - previous).abs() > ALARM_DELTA_C }

/// Round to one decimal place, as shown on the panel.
#[inline]
pub fn round_tenth(value: f32) -> f32 { (value * 10.0).round() / 10.0 }

// =============================================================================
// Extreme Temperature Alerts
// =============================================================================

/// Exterior temperature at or above which a heat alert is logged (°C).
pub const HEAT_WARNING_C: f32 = 35.0;

/// Exterior temperature at or below which a freeze alert is logged (°C).
pub const FREEZE_WARNING_C: f32 = 2.0;

/// Minimum simulated time between two extreme-temperature alerts (seconds).
pub const EXTREME_ALERT_COOLDOWN_SECS: u64 = 300;

const _: () = assert!(FREEZE_WARNING_C < HEAT_WARNING_C);

// =============================================================================
// Pressure Classification
// =============================================================================

/// Pressure above which the panel reports `HIGH` (hPa).
pub const PRESSURE_HIGH_HPA: i32 = 1020;

/// Pressure below which the panel reports `LOW` (hPa).
pub const PRESSURE_LOW_HPA: i32 = 1000;

const _: () = assert!(PRESSURE_LOW_HPA < PRESSURE_HIGH_HPA);

/// Coarse barometric class shown under the pressure value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressureClass {
    High,
    Normal,
    Low,
}

impl PressureClass {
    /// Classify a pressure reading in hPa.
    pub const fn classify(pressure_hpa: i32) -> Self {
        if pressure_hpa > PRESSURE_HIGH_HPA {
            Self::High
        } else if pressure_hpa < PRESSURE_LOW_HPA {
            Self::Low
        } else {
            Self::Normal
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Normal => "NORMAL",
            Self::Low => "LOW",
        }
    }
}

// =============================================================================
// Weather Band (exterior temperature description)
// =============================================================================

/// Descriptive band for the exterior temperature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeatherBand {
    Extreme,
    Hot,
    Warm,
    Optimal,
    Mild,
    Cold,
    VeryCold,
    Frost,
    SevereFrost,
}

impl WeatherBand {
    /// Classify an exterior temperature in °C.
    pub fn classify(temp_c: f32) -> Self {
        if temp_c >= 35.0 {
            Self::Extreme
        } else if temp_c >= 30.0 {
            Self::Hot
        } else if temp_c >= 26.0 {
            Self::Warm
        } else if temp_c >= 23.0 {
            Self::Optimal
        } else if temp_c >= 18.0 {
            Self::Mild
        } else if temp_c >= 10.0 {
            Self::Cold
        } else if temp_c >= 0.0 {
            Self::VeryCold
        } else if temp_c >= -5.0 {
            Self::Frost
        } else {
            Self::SevereFrost
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Extreme => "EXTREME",
            Self::Hot => "HOT",
            Self::Warm => "WARM",
            Self::Optimal => "OPTIMAL",
            Self::Mild => "MILD",
            Self::Cold => "COLD",
            Self::VeryCold => "VERY COLD",
            Self::Frost => "FROST",
            Self::SevereFrost => "SEV. FROST",
        }
    }
}

// =============================================================================
// Status Levels (battery and system health coloring)
// =============================================================================

/// Three-step health level used to pick a palette role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Good,
    Warning,
    Danger,
}

/// Battery: >50 good, >20 warning, otherwise danger.
pub const fn battery_level(pct: u8) -> Level {
    if pct > 50 {
        Level::Good
    } else if pct > 20 {
        Level::Warning
    } else {
        Level::Danger
    }
}

/// CPU or RAM usage: >80 danger, >60 warning.
pub const fn usage_level(pct: i32) -> Level {
    if pct > 80 {
        Level::Danger
    } else if pct > 60 {
        Level::Warning
    } else {
        Level::Good
    }
}

/// CPU temperature: >70 danger, >60 warning.
pub fn cpu_temp_level(temp_c: f32) -> Level {
    if temp_c > 70.0 {
        Level::Danger
    } else if temp_c > 60.0 {
        Level::Warning
    } else {
        Level::Good
    }
}

/// Wi-Fi signal: >70 good, >40 warning, otherwise danger.
pub const fn wifi_level(pct: i32) -> Level {
    if pct > 70 {
        Level::Good
    } else if pct > 40 {
        Level::Warning
    } else {
        Level::Danger
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
#[allow(clippy::assertions_on_constants)] // Intentional validation of threshold ordering
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // MetricRange Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_clamp_saturates_at_bounds() {
        assert_eq!(EXTERIOR_TEMP_C.clamp(55.0), 40.0, "Above max should pin to max");
        assert_eq!(EXTERIOR_TEMP_C.clamp(-30.0), -10.0, "Below min should pin to min");
        assert_eq!(EXTERIOR_TEMP_C.clamp(12.3), 12.3, "Inside range is unchanged");
        assert_eq!(PRESSURE_HPA.clamp(1100), 1040);
        assert_eq!(BATTERY_PCT.clamp(0), 0);
    }

    #[test]
    fn test_contains_includes_bounds() {
        assert!(INTERIOR_HUMIDITY_PCT.contains(30));
        assert!(INTERIOR_HUMIDITY_PCT.contains(80));
        assert!(!INTERIOR_HUMIDITY_PCT.contains(81));
    }

    #[test]
    fn test_range_ordering() {
        assert!(EXTERIOR_TEMP_C.min < EXTERIOR_TEMP_C.max);
        assert!(INTERIOR_TEMP_C.min < INTERIOR_TEMP_C.max);
        assert!(WIFI_SIGNAL_PCT.min < WIFI_SIGNAL_PCT.max);
    }

    // -------------------------------------------------------------------------
    // Alarm Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_alarm_swing_strictly_greater() {
        assert!(is_alarm_swing(18.7, 19.4), "0.7°C jump should raise the alarm");
        assert!(is_alarm_swing(19.4, 18.7), "Drops count as well");
        assert!(!is_alarm_swing(18.7, 18.9), "0.2°C is a normal drift");
        assert!(!is_alarm_swing(10.0, 10.5), "Exactly 0.5°C must not trigger");
    }

    #[test]
    fn test_round_tenth() {
        assert_eq!(round_tenth(18.74), 18.7);
        assert_eq!(round_tenth(18.76), 18.8);
        assert_eq!(round_tenth(-3.21), -3.2);
    }

    // -------------------------------------------------------------------------
    // Classification Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_pressure_class() {
        assert_eq!(PressureClass::classify(1021), PressureClass::High);
        assert_eq!(PressureClass::classify(1020), PressureClass::Normal);
        assert_eq!(PressureClass::classify(1000), PressureClass::Normal);
        assert_eq!(PressureClass::classify(999), PressureClass::Low);
    }

    #[test]
    fn test_weather_band_boundaries() {
        assert_eq!(WeatherBand::classify(35.0), WeatherBand::Extreme);
        assert_eq!(WeatherBand::classify(29.9), WeatherBand::Warm);
        assert_eq!(WeatherBand::classify(23.0), WeatherBand::Optimal);
        assert_eq!(WeatherBand::classify(18.7), WeatherBand::Mild);
        assert_eq!(WeatherBand::classify(0.0), WeatherBand::VeryCold);
        assert_eq!(WeatherBand::classify(-5.0), WeatherBand::Frost);
        assert_eq!(WeatherBand::classify(-5.1), WeatherBand::SevereFrost);
    }

    #[test]
    fn test_status_levels() {
        assert_eq!(battery_level(87), Level::Good);
        assert_eq!(battery_level(50), Level::Warning);
        assert_eq!(battery_level(20), Level::Danger);
        assert_eq!(usage_level(81), Level::Danger);
        assert_eq!(usage_level(61), Level::Warning);
        assert_eq!(usage_level(23), Level::Good);
        assert_eq!(cpu_temp_level(45.2), Level::Good);
        assert_eq!(cpu_temp_level(65.0), Level::Warning);
        assert_eq!(wifi_level(85), Level::Good);
        assert_eq!(wifi_level(40), Level::Danger);
    }
}
