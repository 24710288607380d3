//! Cooperative scheduler dispatching typed tick events.
//!
//! All periodic work runs on one logical thread. Instead of independent timer
//! callbacks racing over shared state, the scheduler owns a simulated clock
//! and hands out one [`TickEvent`] at a time, in due-time order, to a single
//! reducer ([`crate::station::Station::handle`]).
//!
//! # Tasks
//!
//! | Event          | Kind      | Default period |
//! |----------------|-----------|----------------|
//! | `Clock`        | periodic  | 1s             |
//! | `Blink`        | periodic  | 1s             |
//! | `Sim`          | periodic  | 5s             |
//! | `History`      | periodic  | 30s            |
//! | `AlarmExpired` | one-shot  | scheduled      |
//!
//! Periodic tasks first fire one period after start. Events due at the same
//! instant are dispatched in the order listed above.
//!
//! # One-Shots
//!
//! Scheduling a one-shot that is already pending replaces its deadline. A
//! second alarm within the dwell window therefore extends the window instead
//! of queuing a second expiry.
//!
//! # Driving the Clock
//!
//! ```ignore
//! while let Some((at, event)) = scheduler.pop_due(target) {
//!     let effects = station.handle(event, at);
//!     if let Some(deadline) = effects.alarm_deadline {
//!         scheduler.schedule_once(TickEvent::AlarmExpired, deadline);
//!     }
//! }
//! scheduler.advance_to(target);
//! ```

use core::time::Duration;

use tracing::debug;

use crate::config::TimingConfig;

/// Shortest accepted period. Guards against a zero period spinning forever.
const MIN_PERIOD: Duration = Duration::from_millis(1);

// =============================================================================
// Events
// =============================================================================

/// Typed events dispatched to the station reducer.
///
/// The derived ordering is the dispatch order for simultaneous events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TickEvent {
    /// Refresh clock text, night mode and uptime.
    Clock,
    /// Toggle the header colon and alarm blink phase.
    Blink,
    /// Advance the random-walk simulation.
    Sim,
    /// Shift the chart history window.
    History,
    /// Clear the temperature-swing alarm.
    AlarmExpired,
}

/// Periods of the four periodic tasks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cadence {
    pub clock: Duration,
    pub blink: Duration,
    pub sim: Duration,
    pub history: Duration,
}

impl Default for Cadence {
    fn default() -> Self { Self::from(&TimingConfig::default()) }
}

impl From<&TimingConfig> for Cadence {
    fn from(timing: &TimingConfig) -> Self {
        Self {
            clock: timing.clock(),
            blink: timing.blink(),
            sim: timing.sim(),
            history: timing.history(),
        }
    }
}

// =============================================================================
// Scheduler
// =============================================================================

#[derive(Clone, Copy, Debug)]
struct PeriodicTask {
    event: TickEvent,
    period: Duration,
    next_due: Duration,
}

/// Single-threaded timer queue over a simulated monotonic clock.
#[derive(Debug)]
pub struct Scheduler {
    now: Duration,
    periodic: [PeriodicTask; 4],
    one_shots: Vec<(TickEvent, Duration)>,
    cancelled: bool,
}

impl Scheduler {
    /// Create a scheduler at time zero.
    pub fn new(cadence: Cadence) -> Self {
        let task = |event, period: Duration| {
            let period = period.max(MIN_PERIOD);
            PeriodicTask {
                event,
                period,
                next_due: period,
            }
        };
        Self {
            now: Duration::ZERO,
            periodic: [
                task(TickEvent::Clock, cadence.clock),
                task(TickEvent::Blink, cadence.blink),
                task(TickEvent::Sim, cadence.sim),
                task(TickEvent::History, cadence.history),
            ],
            one_shots: Vec::new(),
            cancelled: false,
        }
    }

    /// Current simulated time since start.
    #[inline]
    pub const fn now(&self) -> Duration { self.now }

    /// Schedule (or reschedule) a one-shot event at `deadline`.
    ///
    /// A pending one-shot of the same kind is replaced, never duplicated.
    pub fn schedule_once(
        &mut self,
        event: TickEvent,
        deadline: Duration,
    ) {
        if self.cancelled {
            return;
        }
        if let Some(slot) = self.one_shots.iter_mut().find(|(e, _)| *e == event) {
            debug!(?event, from = ?slot.1, to = ?deadline, "One-shot rescheduled");
            slot.1 = deadline;
        } else {
            self.one_shots.push((event, deadline));
        }
    }

    /// Deadline of a pending one-shot, if any.
    pub fn pending(
        &self,
        event: TickEvent,
    ) -> Option<Duration> {
        self.one_shots.iter().find(|(e, _)| *e == event).map(|(_, at)| *at)
    }

    /// Due time of the next event, or `None` after [`cancel_all`](Self::cancel_all).
    pub fn next_due(&self) -> Option<Duration> { self.peek().map(|(at, _, _)| at) }

    /// Pop the next event due at or before `until`.
    ///
    /// The clock moves to the event's due time. Periodic tasks are re-armed
    /// one period later; one-shots are removed.
    pub fn pop_due(
        &mut self,
        until: Duration,
    ) -> Option<(Duration, TickEvent)> {
        let (at, event, slot) = self.peek()?;
        if at > until {
            return None;
        }

        match slot {
            Slot::Periodic(index) => {
                let task = &mut self.periodic[index];
                task.next_due += task.period;
            }
            Slot::OneShot(index) => {
                self.one_shots.swap_remove(index);
            }
        }
        self.now = self.now.max(at);
        Some((at, event))
    }

    /// Move the clock forward to `until` without dispatching anything.
    /// Call after draining [`pop_due`](Self::pop_due).
    pub fn advance_to(
        &mut self,
        until: Duration,
    ) {
        self.now = self.now.max(until);
    }

    /// Drop every pending timer. No further events are dispatched.
    pub fn cancel_all(&mut self) {
        self.one_shots.clear();
        self.cancelled = true;
        debug!("All timers cancelled");
    }

    fn peek(&self) -> Option<(Duration, TickEvent, Slot)> {
        if self.cancelled {
            return None;
        }
        let periodic = self
            .periodic
            .iter()
            .enumerate()
            .map(|(i, t)| (t.next_due, t.event, Slot::Periodic(i)));
        let one_shots = self
            .one_shots
            .iter()
            .enumerate()
            .map(|(i, (event, at))| (*at, *event, Slot::OneShot(i)));

        periodic.chain(one_shots).min_by_key(|(at, event, _)| (*at, *event))
    }
}

#[derive(Clone, Copy, Debug)]
enum Slot {
    Periodic(usize),
    OneShot(usize),
}

// =============================================================================
// Unit Tests
// =============================================================================
