//! Scheduler, station and display wired together.
//!
//! [`App::step`] is the whole event loop body: drain every timer due up to a
//! point in simulated time, reduce each event in the station, apply the
//! returned [`Effects`], and compose one frame if anything changed. The
//! binary only decides how fast simulated time advances and where the frame
//! goes (window, PNG files, or nowhere).

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDateTime;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use embedded_graphics_simulator::{OutputSettings, OutputSettingsBuilder, SimulatorDisplay};
use tracing::{debug, info};

use crate::{
    config::{Config, SCREEN_HEIGHT, SCREEN_WIDTH},
    error::{Error, Result},
    pages::Page,
    render::{FrameReport, RenderState, draw_frame},
    scheduler::{Cadence, Scheduler, TickEvent},
    station::{Effects, Station},
};

/// Outcome of one [`App::step`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Events dispatched during the step.
    pub events: usize,
    /// Frame composed at the end of the step, if any.
    pub frame: Option<FrameReport>,
}

/// The running station panel.
pub struct App {
    station: Station,
    scheduler: Scheduler,
    render_state: RenderState,
    display: SimulatorDisplay<Rgb565>,
    output_settings: OutputSettings,
    snapshot_dir: Option<PathBuf>,
    frames_written: u64,
    frame_pending: bool,
}

impl App {
    /// Build the app from configuration, starting the wall clock at `session_start`.
    pub fn new(
        config: &Config,
        session_start: NaiveDateTime,
    ) -> Self {
        Self::with_station(config, Station::new(config, session_start))
    }

    /// Build the app around an existing station (e.g. one with a fixed RNG).
    pub fn with_station(
        config: &Config,
        station: Station,
    ) -> Self {
        Self {
            station,
            scheduler: Scheduler::new(Cadence::from(&config.timing)),
            render_state: RenderState::new(),
            display: SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)),
            output_settings: OutputSettingsBuilder::new().scale(config.display.scale).build(),
            snapshot_dir: None,
            frames_written: 0,
            frame_pending: true,
        }
    }

    /// Write a PNG into `dir` after every chart redraw.
    ///
    /// # Errors
    /// [`Error::SnapshotDir`] if the directory cannot be created.
    pub fn with_snapshot_dir<P: AsRef<Path>>(
        mut self,
        dir: P,
    ) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|source| Error::SnapshotDir {
            path: dir.clone(),
            source,
        })?;
        info!(dir = %dir.display(), "Writing panel snapshots");
        self.snapshot_dir = Some(dir);
        Ok(self)
    }

    /// Select the start page before the first frame.
    pub fn set_page(
        &mut self,
        page: Page,
    ) {
        self.station.set_page(page);
        self.render_state.mark_chart_dirty();
        self.frame_pending = true;
    }

    /// Dispatch every event due up to `until` and compose a frame if needed.
    ///
    /// # Errors
    /// [`Error::Export`] if a snapshot PNG cannot be written.
    pub fn step(
        &mut self,
        until: Duration,
    ) -> Result<StepReport> {
        let mut events = 0;
        while let Some((at, event)) = self.scheduler.pop_due(until) {
            let effects = self.station.handle(event, at);
            self.apply(effects);
            events += 1;
        }
        self.scheduler.advance_to(until);

        if events > 0 {
            self.frame_pending = true;
        }
        let frame = if self.frame_pending { Some(self.render()?) } else { None };
        Ok(StepReport { events, frame })
    }

    /// Flip the page (debounced) at the current simulated time.
    ///
    /// # Returns
    /// `true` if the page changed.
    pub fn advance_page(&mut self) -> bool {
        let effects = self.station.advance_page(self.scheduler.now());
        let changed = effects.redraw_chart;
        self.apply(effects);
        if changed {
            self.frame_pending = true;
        }
        changed
    }

    /// Stop all timers. Later steps dispatch nothing.
    pub fn shutdown(&mut self) {
        self.scheduler.cancel_all();
        info!(
            sim_ticks = self.station.sim_ticks(),
            frames_written = self.frames_written,
            "Station stopped"
        );
    }

    fn apply(
        &mut self,
        effects: Effects,
    ) {
        if effects.redraw_chart {
            self.render_state.mark_chart_dirty();
        }
        if let Some(deadline) = effects.alarm_deadline {
            self.scheduler.schedule_once(TickEvent::AlarmExpired, deadline);
        }
    }

    fn render(&mut self) -> Result<FrameReport> {
        let snapshot = self.station.snapshot();
        let report = draw_frame(&mut self.display, &snapshot, &mut self.render_state);
        self.frame_pending = false;

        if report.chart_drawn
            && let Some(dir) = &self.snapshot_dir
        {
            let path = dir.join(format!("frame-{:06}.png", self.frames_written));
            self.display
                .to_rgb_output_image(&self.output_settings)
                .save_png(&path)
                .map_err(|e| Error::Export {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
            self.frames_written += 1;
            debug!(path = %path.display(), "Snapshot written");
        }
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub const fn station(&self) -> &Station { &self.station }

    #[inline]
    pub const fn scheduler(&self) -> &Scheduler { &self.scheduler }

    #[inline]
    pub const fn display(&self) -> &SimulatorDisplay<Rgb565> { &self.display }

    /// Current simulated time.
    #[inline]
    pub const fn now(&self) -> Duration { self.scheduler.now() }

    /// Number of PNG snapshots written so far.
    #[inline]
    pub const fn frames_written(&self) -> u64 { self.frames_written }
}

// =============================================================================
// Unit Tests
// =============================================================================
