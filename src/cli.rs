//! Command-line interface.
//!
//! Flags override the matching configuration fields after the TOML file is
//! loaded, so `--seed 7` wins over `seed = 42` in the file.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::pages::Page;

/// Simulated weather-station panel.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "weather-station")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for the random walk (overrides config).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Simulated seconds per real second (overrides config).
    #[arg(long)]
    pub speed: Option<f64>,

    /// Stop after this many simulation ticks (0 = run until interrupted).
    #[arg(long, default_value_t = 0)]
    pub sim_ticks: u64,

    /// Write a PNG of the panel into this directory after each chart redraw.
    #[arg(long)]
    pub snapshot_dir: Option<PathBuf>,

    /// Page shown at start-up.
    #[arg(long, value_enum, default_value_t = Page::Main)]
    pub page: Page,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Apply command-line overrides to a loaded configuration.
    pub fn apply(
        &self,
        config: &mut Config,
    ) {
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        if let Some(speed) = self.speed {
            config.timing.speed = speed;
        }
    }

    /// Log filter directive, or `None` to defer to `RUST_LOG`.
    pub const fn log_directive(&self) -> Option<&'static str> {
        if self.quiet {
            Some("warn")
        } else if self.verbose {
            Some("debug")
        } else {
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
