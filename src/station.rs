//! The station: single owner of all mutable state.
//!
//! [`Station::handle`] is the only place state changes in response to time.
//! Each [`TickEvent`] is reduced synchronously and the caller gets back
//! [`Effects`] describing what must happen next (redraw the chart, schedule an
//! alarm expiry). The presentation layer only ever sees a
//! [`StationSnapshot`], a read-only copy of everything it displays.
//!
//! # Event Handling
//!
//! | Event          | Effect on state                                       |
//! |----------------|-------------------------------------------------------|
//! | `Clock`        | wall clock, night mode, uptime, current hour          |
//! | `Blink`        | toggle blink phase                                    |
//! | `Sim`          | `simulation::tick`, alarm detection, extreme alerts   |
//! | `History`      | shift the line-chart window                           |
//! | `AlarmExpired` | clear the alarm once its dwell window has passed      |
//!
//! # Chart Redraws
//!
//! The chart is re-rendered when its inputs change: the history window, the
//! palette (night mode), the active page, or the highlighted hour of the bar
//! chart. Clock and blink ticks otherwise only touch text.

use core::time::Duration;

use chrono::{Datelike, NaiveDateTime, Timelike};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::analytics::{DailyStats, daily_stats, overall_trend};
use crate::config::{Config, DisplayConfig};
use crate::history::{HOURS_PER_DAY, HourlyStat, generate_hourly_stats};
use crate::pages::Page;
use crate::scheduler::TickEvent;
use crate::simulation::{self, SimulationParams};
use crate::state::{AlarmState, INITIAL_UPTIME, StationState, Trend};
use crate::thresholds::{EXTREME_ALERT_COOLDOWN_SECS, FREEZE_WARNING_C, HEAT_WARNING_C, is_alarm_swing};

// =============================================================================
// Effects and Snapshots
// =============================================================================

/// Follow-up actions requested by [`Station::handle`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Effects {
    /// Chart inputs changed; the canvas must be re-rendered.
    pub redraw_chart: bool,
    /// An alarm was raised; schedule `AlarmExpired` at this time.
    pub alarm_deadline: Option<Duration>,
}

/// Kind of extreme exterior temperature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Heat,
    Freeze,
}

impl AlertKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Heat => "HEAT ALERT",
            Self::Freeze => "FREEZE ALERT",
        }
    }
}

/// Most recent extreme-temperature alert.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtremeAlert {
    pub kind: AlertKind,
    /// Exterior temperature that triggered the alert (°C).
    pub temperature: f32,
    /// Session time of the alert.
    pub at: Duration,
}

/// Read-only copy of everything the panel displays.
#[derive(Clone, Debug, PartialEq)]
pub struct StationSnapshot {
    pub state: StationState,
    pub hourly: [HourlyStat; HOURS_PER_DAY],
    pub daily: DailyStats,
    /// Direction of the line-chart history (last 6 vs previous 6 samples).
    pub overall_trend: Trend,
    pub alarm_active: bool,
    pub last_alert: Option<ExtremeAlert>,
    pub page: Page,
    pub night_mode: bool,
    /// Blink phase: colon visible, alarm highlighted.
    pub blink_on: bool,
    pub wall_clock: NaiveDateTime,
}

impl StationSnapshot {
    /// Hour of day highlighted on the bar chart.
    pub fn current_hour(&self) -> u8 { self.wall_clock.hour() as u8 }

    /// `HH:MM` clock text.
    pub fn time_text(&self) -> heapless::String<8> {
        let mut text = heapless::String::new();
        let _ = core::fmt::write(
            &mut text,
            format_args!("{:02}:{:02}", self.wall_clock.hour(), self.wall_clock.minute()),
        );
        text
    }

    /// `dd/mm/yy` date text.
    pub fn date_text(&self) -> heapless::String<8> {
        let mut text = heapless::String::new();
        let _ = core::fmt::write(
            &mut text,
            format_args!(
                "{:02}/{:02}/{:02}",
                self.wall_clock.day(),
                self.wall_clock.month(),
                self.wall_clock.year().rem_euclid(100)
            ),
        );
        text
    }
}

// =============================================================================
// Station
// =============================================================================

/// Owner of the simulated station state and its timers' effects.
pub struct Station {
    state: StationState,
    params: SimulationParams,
    rng: StdRng,
    hourly: [HourlyStat; HOURS_PER_DAY],
    alarm: AlarmState,
    alarm_dwell: Duration,
    last_alert: Option<ExtremeAlert>,
    page: Page,
    last_page_switch: Option<Duration>,
    page_debounce: Duration,
    display: DisplayConfig,
    session_start: NaiveDateTime,
    wall_clock: NaiveDateTime,
    night_mode: bool,
    blink_on: bool,
    sim_ticks: u64,
}

impl Station {
    /// Create a station from the configuration.
    ///
    /// The RNG is seeded from `config.simulation.seed` when set, otherwise
    /// from the operating system.
    pub fn new(
        config: &Config,
        session_start: NaiveDateTime,
    ) -> Self {
        let rng = match config.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, session_start, rng)
    }

    /// Create a station with an explicit random source.
    pub fn with_rng(
        config: &Config,
        session_start: NaiveDateTime,
        mut rng: StdRng,
    ) -> Self {
        let hourly = generate_hourly_stats(&mut rng);
        let night_mode = config.display.is_night(session_start.hour());
        info!(
            seed = ?config.simulation.seed,
            night_mode,
            start = %session_start.format("%Y-%m-%d %H:%M:%S"),
            "Station started"
        );

        Self {
            state: StationState::default(),
            params: config.simulation.clone(),
            rng,
            hourly,
            alarm: AlarmState::default(),
            alarm_dwell: config.timing.alarm_dwell(),
            last_alert: None,
            page: Page::default(),
            last_page_switch: None,
            page_debounce: config.timing.page_debounce(),
            display: config.display.clone(),
            session_start,
            wall_clock: session_start,
            night_mode,
            blink_on: true,
            sim_ticks: 0,
        }
    }

    /// Reduce one scheduler event at session time `now`.
    pub fn handle(
        &mut self,
        event: TickEvent,
        now: Duration,
    ) -> Effects {
        match event {
            TickEvent::Clock => self.on_clock(now),
            TickEvent::Blink => {
                self.blink_on = !self.blink_on;
                Effects::default()
            }
            TickEvent::Sim => self.on_sim(now),
            TickEvent::History => {
                self.state.history = self.state.history.advance(&mut self.rng);
                debug!(latest = self.state.history.latest(), "History advanced");
                Effects {
                    redraw_chart: true,
                    ..Effects::default()
                }
            }
            TickEvent::AlarmExpired => {
                if self.alarm.expire(now) {
                    info!("Temperature alarm cleared");
                }
                Effects::default()
            }
        }
    }

    /// Flip to the next page unless the previous switch was too recent.
    ///
    /// # Returns
    /// Chart redraw effect when the page changed, default effects when the
    /// press was ignored by the debounce.
    pub fn advance_page(
        &mut self,
        now: Duration,
    ) -> Effects {
        if let Some(last) = self.last_page_switch
            && now.saturating_sub(last) < self.page_debounce
        {
            debug!("Page switch ignored (debounce)");
            return Effects::default();
        }

        self.page = self.page.advance();
        self.last_page_switch = Some(now);
        info!(page = self.page.name(), "Page changed");
        Effects {
            redraw_chart: true,
            ..Effects::default()
        }
    }

    /// Jump directly to `page` (start-up selection, no debounce).
    pub fn set_page(
        &mut self,
        page: Page,
    ) {
        self.page = page;
    }

    fn on_clock(
        &mut self,
        now: Duration,
    ) -> Effects {
        let previous_hour = self.wall_clock.hour();
        let elapsed = chrono::Duration::from_std(now).unwrap_or(chrono::Duration::zero());
        self.wall_clock = self.session_start + elapsed;
        self.state.system.uptime = INITIAL_UPTIME + now;

        let night_mode = self.display.is_night(self.wall_clock.hour());
        let palette_changed = night_mode != self.night_mode;
        if palette_changed {
            self.night_mode = night_mode;
            info!(night_mode, "Display mode changed");
        }

        Effects {
            redraw_chart: palette_changed || previous_hour != self.wall_clock.hour(),
            ..Effects::default()
        }
    }

    fn on_sim(
        &mut self,
        now: Duration,
    ) -> Effects {
        let next = simulation::tick(&self.state, &self.params, &mut self.rng);
        self.commit_tick(next, now)
    }

    /// Commit the outcome of one simulation tick.
    ///
    /// Compares `next` with the current state to log connectivity changes,
    /// raise the swing alarm and check for extreme temperatures, then makes
    /// `next` the current state.
    pub fn commit_tick(
        &mut self,
        next: StationState,
        now: Duration,
    ) -> Effects {
        let previous = core::mem::replace(&mut self.state, next);
        self.sim_ticks += 1;

        let was_online = previous.exterior.is_online;
        let is_online = self.state.exterior.is_online;
        if was_online && !is_online {
            warn!("Exterior module offline");
        } else if !was_online && is_online {
            info!("Exterior module back online");
        }

        if self.state.battery_pct < previous.battery_pct {
            debug!(battery = self.state.battery_pct, "Battery drained");
        }

        let prev_temp = previous.exterior.climate.temperature;
        let temp = self.state.exterior.climate.temperature;
        let mut effects = Effects::default();
        if is_alarm_swing(prev_temp, temp) {
            let deadline = self.alarm.raise(now, self.alarm_dwell);
            warn!(from = prev_temp, to = temp, "Temperature swing alarm");
            effects.alarm_deadline = Some(deadline);
        }

        if is_online {
            self.check_extreme(temp, now);
        }

        debug!(
            tick = self.sim_ticks,
            exterior = temp,
            interior = self.state.interior.temperature,
            online = is_online,
            "Simulation tick"
        );
        effects
    }

    fn check_extreme(
        &mut self,
        temperature: f32,
        now: Duration,
    ) {
        let kind = if temperature >= HEAT_WARNING_C {
            AlertKind::Heat
        } else if temperature <= FREEZE_WARNING_C {
            AlertKind::Freeze
        } else {
            return;
        };

        let cooldown = Duration::from_secs(EXTREME_ALERT_COOLDOWN_SECS);
        if let Some(last) = self.last_alert
            && now.saturating_sub(last.at) < cooldown
        {
            return;
        }

        warn!(alert = kind.label(), temperature, "Extreme exterior temperature");
        self.last_alert = Some(ExtremeAlert { kind, temperature, at: now });
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Copy of everything the panel displays.
    pub fn snapshot(&self) -> StationSnapshot {
        StationSnapshot {
            state: self.state.clone(),
            hourly: self.hourly,
            daily: daily_stats(&self.hourly),
            overall_trend: overall_trend(self.state.history.as_slice()),
            alarm_active: self.alarm.is_active(),
            last_alert: self.last_alert,
            page: self.page,
            night_mode: self.night_mode,
            blink_on: self.blink_on,
            wall_clock: self.wall_clock,
        }
    }

    #[inline]
    pub const fn state(&self) -> &StationState { &self.state }

    /// Replace the station state, e.g. to start from a specific reading.
    pub fn set_state(
        &mut self,
        state: StationState,
    ) {
        self.state = state;
    }

    #[inline]
    pub const fn hourly(&self) -> &[HourlyStat; HOURS_PER_DAY] { &self.hourly }

    #[inline]
    pub const fn alarm(&self) -> &AlarmState { &self.alarm }

    #[inline]
    pub const fn page(&self) -> Page { self.page }

    #[inline]
    pub const fn night_mode(&self) -> bool { self.night_mode }

    /// Number of simulation ticks handled so far.
    #[inline]
    pub const fn sim_ticks(&self) -> u64 { self.sim_ticks }

    #[inline]
    pub const fn last_alert(&self) -> Option<ExtremeAlert> { self.last_alert }
}

// =============================================================================
// Unit Tests
// =============================================================================
