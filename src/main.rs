//! Weather-station panel simulator.
//!
//! Runs the station in real time scaled by `--speed`. Without the `window`
//! feature it is headless: frames go to `--snapshot-dir` as PNG files (or
//! nowhere) and the run ends after `--sim-ticks` simulation ticks. With the
//! `window` feature an SDL window shows the panel; Space flips the page.
//!
//! Run with: `cargo run -- --speed 60 --sim-ticks 100 --snapshot-dir frames`
//!
//! # Logging
//!
//! `--quiet` logs warnings only, `--verbose` enables debug, otherwise
//! `RUST_LOG` applies (default `info`).

use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use weather_station::{App, Config, cli::Cli};

/// Real time between loop iterations.
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.log_directive() {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = Config::load_or_default(cli.config.as_ref()).context("Failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("Invalid command-line override")?;

    let mut app = App::new(&config, Local::now().naive_local());
    app.set_page(cli.page);
    if let Some(dir) = &cli.snapshot_dir {
        app = app.with_snapshot_dir(dir)?;
    }

    info!(
        speed = config.timing.speed,
        sim_ticks = cli.sim_ticks,
        page = cli.page.name(),
        "Running station"
    );
    run(&mut app, &config, cli.sim_ticks)?;
    app.shutdown();
    Ok(())
}

/// Whether the tick limit has been reached (`0` = no limit).
fn finished(
    app: &App,
    sim_ticks: u64,
) -> bool {
    sim_ticks > 0 && app.station().sim_ticks() >= sim_ticks
}

#[cfg(not(feature = "window"))]
fn run(
    app: &mut App,
    config: &Config,
    sim_ticks: u64,
) -> anyhow::Result<()> {
    let started = Instant::now();
    while !finished(app, sim_ticks) {
        let now = started.elapsed().mul_f64(config.timing.speed);
        app.step(now)?;
        std::thread::sleep(FRAME_INTERVAL);
    }
    Ok(())
}

#[cfg(feature = "window")]
fn run(
    app: &mut App,
    config: &Config,
    sim_ticks: u64,
) -> anyhow::Result<()> {
    use embedded_graphics_simulator::sdl2::Keycode;
    use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorEvent, Window};

    let output_settings = OutputSettingsBuilder::new().scale(config.display.scale).build();
    let mut window = Window::new("Weather Station", &output_settings);

    let started = Instant::now();
    while !finished(app, sim_ticks) {
        let now = started.elapsed().mul_f64(config.timing.speed);
        app.step(now)?;
        window.update(app.display());

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => return Ok(()),
                SimulatorEvent::KeyDown {
                    keycode: Keycode::Space,
                    repeat: false,
                    ..
                } => {
                    if app.advance_page() {
                        app.step(app.now())?;
                    }
                }
                _ => {}
            }
        }
        std::thread::sleep(FRAME_INTERVAL);
    }
    Ok(())
}
