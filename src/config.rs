//! Application configuration: compile-time layout constants and the runtime
//! TOML configuration.
//!
//! # Layout Constants
//!
//! Panel geometry is fixed at compile time as `const`, so drawing code never
//! recomputes positions per frame:
//!
//! ```ignore
//! pub const CHART_ORIGIN: Point = Point::new(CHART_X, CHART_Y);
//! ```
//!
//! # Runtime Configuration
//!
//! [`Config`] is loaded from TOML. Every field has a default, so an empty file
//! (or no file) yields the reference station:
//!
//! ```toml
//! [simulation]
//! battery_drain_probability = 0.10
//! connectivity_flip_probability = 0.05
//! seed = 42
//!
//! [timing]
//! clock_ms = 1000
//! blink_ms = 1000
//! sim_ms = 5000
//! history_ms = 30000
//! alarm_dwell_ms = 3000
//! page_debounce_ms = 500
//! speed = 1.0
//!
//! [display]
//! scale = 2
//! night_start_hour = 20
//! night_end_hour = 7
//! ```
//!
//! [`Config::validate`] collects every problem into a single
//! [`ConfigError::Validation`] instead of stopping at the first one.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::simulation::SimulationParams;

// =============================================================================
// Display Configuration
// =============================================================================

/// Panel width in pixels.
pub const SCREEN_WIDTH: u32 = 320;

/// Panel height in pixels.
pub const SCREEN_HEIGHT: u32 = 240;

/// Header bar height in pixels.
pub const HEADER_HEIGHT: u32 = 26;

// =============================================================================
// Chart Canvas Layout
// =============================================================================

/// Chart canvas width in pixels.
pub const CHART_WIDTH: u32 = 308;

/// Chart canvas height in pixels.
pub const CHART_HEIGHT: u32 = 65;

/// Chart canvas left edge (centered horizontally).
pub const CHART_X: i32 = ((SCREEN_WIDTH - CHART_WIDTH) / 2) as i32;

/// Chart canvas top edge (6px above the bottom of the panel).
pub const CHART_Y: i32 = (SCREEN_HEIGHT - CHART_HEIGHT - 6) as i32;

/// Top of the content area between the header and the chart.
pub const CONTENT_Y: i32 = HEADER_HEIGHT as i32 + 4;

/// Height available to the reading panels above the chart.
pub const CONTENT_HEIGHT: u32 = (CHART_Y - CONTENT_Y - 14) as u32;

const _: () = assert!(CHART_WIDTH <= SCREEN_WIDTH);
const _: () = assert!(CHART_Y > CONTENT_Y);

// =============================================================================
// Default Timing
// =============================================================================

/// Clock and night-mode refresh cadence.
pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// Colon and alarm blink cadence.
pub const BLINK_PERIOD: Duration = Duration::from_secs(1);

/// Random-walk simulation cadence.
pub const SIM_PERIOD: Duration = Duration::from_secs(5);

/// History window advance cadence.
pub const HISTORY_PERIOD: Duration = Duration::from_secs(30);

/// How long the temperature-swing alarm stays raised.
pub const ALARM_DWELL: Duration = Duration::from_secs(3);

/// Minimum time between two accepted page switches.
pub const PAGE_DEBOUNCE: Duration = Duration::from_millis(500);

/// First hour of night mode (inclusive).
pub const NIGHT_START_HOUR: u32 = 20;

/// First hour of day mode (night ends before this hour).
pub const NIGHT_END_HOUR: u32 = 7;

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Station configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Random-walk probabilities, spans and seed.
    pub simulation: SimulationParams,
    /// Event cadences.
    pub timing: TimingConfig,
    /// Output and day/night settings.
    pub display: DisplayConfig,
}

/// Event cadences in milliseconds (`[timing]` section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub clock_ms: u64,
    pub blink_ms: u64,
    pub sim_ms: u64,
    pub history_ms: u64,
    pub alarm_dwell_ms: u64,
    pub page_debounce_ms: u64,
    /// Simulated seconds per real second. 60.0 runs an hour per minute.
    pub speed: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            clock_ms: CLOCK_PERIOD.as_millis() as u64,
            blink_ms: BLINK_PERIOD.as_millis() as u64,
            sim_ms: SIM_PERIOD.as_millis() as u64,
            history_ms: HISTORY_PERIOD.as_millis() as u64,
            alarm_dwell_ms: ALARM_DWELL.as_millis() as u64,
            page_debounce_ms: PAGE_DEBOUNCE.as_millis() as u64,
            speed: 1.0,
        }
    }
}

impl TimingConfig {
    pub const fn clock(&self) -> Duration { Duration::from_millis(self.clock_ms) }

    pub const fn blink(&self) -> Duration { Duration::from_millis(self.blink_ms) }

    pub const fn sim(&self) -> Duration { Duration::from_millis(self.sim_ms) }

    pub const fn history(&self) -> Duration { Duration::from_millis(self.history_ms) }

    pub const fn alarm_dwell(&self) -> Duration { Duration::from_millis(self.alarm_dwell_ms) }

    pub const fn page_debounce(&self) -> Duration { Duration::from_millis(self.page_debounce_ms) }

    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("timing.clock_ms", self.clock_ms),
            ("timing.blink_ms", self.blink_ms),
            ("timing.sim_ms", self.sim_ms),
            ("timing.history_ms", self.history_ms),
            ("timing.alarm_dwell_ms", self.alarm_dwell_ms),
        ] {
            if value == 0 {
                errors.push(ValidationError::new(field, "cadence must be greater than 0"));
            }
        }

        if !(self.speed.is_finite() && self.speed > 0.0) {
            errors.push(ValidationError::new("timing.speed", format!("speed {} must be positive", self.speed)));
        }

        errors
    }
}

/// Output and day/night settings (`[display]` section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Pixel scale of the window and exported PNG frames.
    pub scale: u32,
    /// Hour (0-23) at which night mode starts.
    pub night_start_hour: u32,
    /// Hour (0-23) at which night mode ends.
    pub night_end_hour: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            scale: 2,
            night_start_hour: NIGHT_START_HOUR,
            night_end_hour: NIGHT_END_HOUR,
        }
    }
}

impl DisplayConfig {
    /// Check whether `hour` falls in the night window.
    ///
    /// The window wraps midnight when `start > end` (20..7 covers 20:00-06:59).
    /// Equal start and end disable night mode.
    pub const fn is_night(
        &self,
        hour: u32,
    ) -> bool {
        if self.night_start_hour > self.night_end_hour {
            hour >= self.night_start_hour || hour < self.night_end_hour
        } else {
            hour >= self.night_start_hour && hour < self.night_end_hour
        }
    }

    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.scale == 0 || self.scale > 8 {
            errors.push(ValidationError::new("display.scale", format!("scale {} must be 1-8", self.scale)));
        }
        for (field, hour) in [
            ("display.night_start_hour", self.night_start_hour),
            ("display.night_end_hour", self.night_end_hour),
        ] {
            if hour > 23 {
                errors.push(ValidationError::new(field, format!("hour {hour} must be 0-23")));
            }
        }

        errors
    }
}

fn validate_simulation(params: &SimulationParams) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (field, p) in [
        ("simulation.battery_drain_probability", params.battery_drain_probability),
        ("simulation.connectivity_flip_probability", params.connectivity_flip_probability),
    ] {
        if !(0.0..=1.0).contains(&p) {
            errors.push(ValidationError::new(field, format!("probability {p} must be within 0.0-1.0")));
        }
    }

    for (field, span) in [
        ("simulation.exterior_temp_span", params.exterior_temp_span),
        ("simulation.feels_like_span", params.feels_like_span),
        ("simulation.interior_temp_span", params.interior_temp_span),
        ("simulation.cpu_temp_span", params.cpu_temp_span),
    ] {
        if !(span.is_finite() && span >= 0.0) {
            errors.push(ValidationError::new(field, format!("span {span} must be a non-negative number")));
        }
    }

    for (field, step) in [
        ("simulation.exterior_humidity_step", params.exterior_humidity_step),
        ("simulation.pressure_step", params.pressure_step),
        ("simulation.interior_humidity_step", params.interior_humidity_step),
        ("simulation.cpu_usage_step", params.cpu_usage_step),
        ("simulation.ram_usage_step", params.ram_usage_step),
        ("simulation.wifi_signal_step", params.wifi_signal_step),
    ] {
        if !(0..=100).contains(&step) {
            errors.push(ValidationError::new(field, format!("step {step} must be within 0-100")));
        }
    }

    errors
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Load and validate `path` if given, otherwise validate the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return every error found.
    ///
    /// This checks:
    /// - Probabilities are within 0.0-1.0
    /// - Random-walk spans are finite and non-negative, integer steps 0-100
    /// - Cadences are non-zero and speed is positive
    /// - Night window hours are 0-23 and the scale is 1-8
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = validate_simulation(&self.simulation);
        errors.extend(self.timing.validate());
        errors.extend(self.display.validate());

        if errors.is_empty() { Ok(()) } else { Err(ConfigError::Validation(errors)) }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// A single validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field path (e.g., `timing.sim_ms`).
    pub field: String,
    /// Description of the validation failure.
    pub message: String,
}

impl ValidationError {
    fn new(
        field: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| format!("  - {e}")).collect::<Vec<_>>().join("\n")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_constants() {
        assert_eq!(CHART_X, 6, "Chart canvas is centered");
        assert_eq!(CHART_Y + CHART_HEIGHT as i32, 234);
        assert!(CONTENT_HEIGHT > 100, "Panels need room above the chart");
    }

    #[test]
    fn test_config_default_is_valid() {
        let config = Config::default();
        config.validate().expect("Default config should be valid");
        assert_eq!(config.timing.sim(), SIM_PERIOD);
        assert_eq!(config.timing.history(), HISTORY_PERIOD);
        assert_eq!(config.simulation.battery_drain_probability, 0.10);
    }

    #[test]
    fn test_config_partial_toml() {
        let toml = r#"
            [simulation]
            seed = 42

            [timing]
            speed = 60.0
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.simulation.connectivity_flip_probability, 0.05, "Unset fields keep defaults");
        assert_eq!(config.timing.speed, 60.0);
        assert_eq!(config.timing.clock_ms, 1000);
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = Config::default();
        config.simulation.battery_drain_probability = 1.5;
        config.timing.sim_ms = 0;
        config.timing.speed = -1.0;
        config.display.night_start_hour = 24;

        let Err(ConfigError::Validation(errors)) = config.validate() else {
            panic!("Expected validation errors");
        };
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, [
            "simulation.battery_drain_probability",
            "timing.sim_ms",
            "timing.speed",
            "display.night_start_hour",
        ]);
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec![ValidationError::new("timing.sim_ms", "cadence must be greater than 0")]);
        assert_eq!(
            err.to_string(),
            "Configuration validation failed:\n  - timing.sim_ms: cadence must be greater than 0"
        );
    }

    #[test]
    fn test_night_window_wraps_midnight() {
        let display = DisplayConfig::default();
        assert!(display.is_night(20), "20:00 is night");
        assert!(display.is_night(23));
        assert!(display.is_night(0));
        assert!(display.is_night(6), "06:59 is still night");
        assert!(!display.is_night(7), "07:00 is day");
        assert!(!display.is_night(19));
    }

    #[test]
    fn test_night_window_non_wrapping() {
        let display = DisplayConfig {
            night_start_hour: 1,
            night_end_hour: 5,
            ..DisplayConfig::default()
        };
        assert!(display.is_night(1));
        assert!(!display.is_night(5));
        assert!(!display.is_night(23));
    }

    #[test]
    fn test_config_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("station.toml");
        std::fs::write(&path, "[display]\nscale = 3\n").unwrap();

        let config = Config::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.display.scale, 3);
    }

    #[test]
    fn test_config_load_nonexistent() {
        let result = Config::load("/nonexistent/path/station.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("broken.toml");
        std::fs::write(&path, "[timing\nspeed = ").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = Config::load_or_default(None::<&Path>).unwrap();
        assert_eq!(config, Config::default());
    }
}
