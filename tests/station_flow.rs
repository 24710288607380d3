//! End-to-end tests: scheduler, station and app driven through simulated time.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use rand::SeedableRng;
use rand::rngs::StdRng;
use weather_station::analytics::daily_stats;
use weather_station::history::HISTORY_LEN;
use weather_station::scheduler::Cadence;
use weather_station::simulation::SimulationParams;
use weather_station::{App, Config, Page, Scheduler, Station, TickEvent};

// =============================================================================
// Helpers
// =============================================================================

fn at(
    hour: u32,
    minute: u32,
    second: u32,
) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .unwrap()
}

fn frozen_config() -> Config {
    Config {
        simulation: SimulationParams::frozen(),
        ..Config::default()
    }
}

/// Drain every event due up to `until`, applying effects the way the app does.
fn run_until(
    scheduler: &mut Scheduler,
    station: &mut Station,
    until: Duration,
) -> usize {
    let mut redraws = 0;
    while let Some((now, event)) = scheduler.pop_due(until) {
        let effects = station.handle(event, now);
        if effects.redraw_chart {
            redraws += 1;
        }
        if let Some(deadline) = effects.alarm_deadline {
            scheduler.schedule_once(TickEvent::AlarmExpired, deadline);
        }
    }
    scheduler.advance_to(until);
    redraws
}

fn with_exterior(
    station: &Station,
    temperature: f32,
) -> weather_station::StationState {
    let mut next = station.state().clone();
    next.exterior.climate.temperature = temperature;
    next
}

// =============================================================================
// Alarm Dwell
// =============================================================================

#[test]
fn test_alarm_raised_and_cleared_without_reset() {
    let config = frozen_config();
    let mut station = Station::with_rng(&config, at(10, 0, 0), StdRng::seed_from_u64(1));
    let mut scheduler = Scheduler::new(Cadence::from(&config.timing));

    run_until(&mut scheduler, &mut station, Duration::from_secs(5));
    assert_eq!(station.state().exterior.climate.temperature, 18.7);

    // 18.7 -> 19.4 is a 0.7°C swing
    let now = scheduler.now();
    let effects = station.commit_tick(with_exterior(&station, 19.4), now);
    let deadline = effects.alarm_deadline.expect("Swing above 0.5 raises the alarm");
    scheduler.schedule_once(TickEvent::AlarmExpired, deadline);
    assert!(station.snapshot().alarm_active, "Alarm is up right after the tick");

    run_until(&mut scheduler, &mut station, Duration::from_millis(7_999));
    assert!(station.snapshot().alarm_active, "Still inside the dwell window");

    run_until(&mut scheduler, &mut station, Duration::from_secs(8));
    assert!(!station.snapshot().alarm_active, "Cleared 3s after the swing");
}

#[test]
fn test_alarm_retrigger_extends_dwell() {
    let config = frozen_config();
    let mut station = Station::with_rng(&config, at(10, 0, 0), StdRng::seed_from_u64(2));
    let mut scheduler = Scheduler::new(Cadence::from(&config.timing));

    run_until(&mut scheduler, &mut station, Duration::from_secs(5));
    let first = station.commit_tick(with_exterior(&station, 19.4), Duration::from_secs(5));
    scheduler.schedule_once(TickEvent::AlarmExpired, first.alarm_deadline.unwrap());

    run_until(&mut scheduler, &mut station, Duration::from_secs(7));
    let second = station.commit_tick(with_exterior(&station, 18.6), Duration::from_secs(7));
    scheduler.schedule_once(TickEvent::AlarmExpired, second.alarm_deadline.unwrap());
    assert_eq!(scheduler.pending(TickEvent::AlarmExpired), Some(Duration::from_secs(10)));

    run_until(&mut scheduler, &mut station, Duration::from_millis(8_500));
    assert!(station.snapshot().alarm_active, "First deadline no longer applies");

    run_until(&mut scheduler, &mut station, Duration::from_secs(10));
    assert!(!station.snapshot().alarm_active);
    assert_eq!(scheduler.pending(TickEvent::AlarmExpired), None);
}

// =============================================================================
// Offline Exterior
// =============================================================================

#[test]
fn test_offline_exterior_frozen_through_scheduler() {
    let mut config = Config::default();
    config.simulation.connectivity_flip_probability = 0.0;
    config.simulation.exterior_temp_span = 5.0;
    config.simulation.pressure_step = 10;

    let mut station = Station::with_rng(&config, at(10, 0, 0), StdRng::seed_from_u64(3));
    let mut offline = station.state().clone();
    offline.exterior.is_online = false;
    station.set_state(offline);
    let before = station.state().exterior;

    let mut scheduler = Scheduler::new(Cadence::from(&config.timing));
    run_until(&mut scheduler, &mut station, Duration::from_secs(600));

    assert_eq!(station.sim_ticks(), 120);
    assert_eq!(station.state().exterior, before, "Nothing moves while offline");
    assert!(!station.snapshot().alarm_active, "A frozen reading cannot swing");
}

// =============================================================================
// Clock, Night Mode and History
// =============================================================================

#[test]
fn test_night_mode_switches_at_twenty() {
    let config = frozen_config();
    let mut station = Station::with_rng(&config, at(19, 59, 30), StdRng::seed_from_u64(4));
    let mut scheduler = Scheduler::new(Cadence::from(&config.timing));
    assert!(!station.night_mode());

    run_until(&mut scheduler, &mut station, Duration::from_secs(29));
    assert!(!station.night_mode(), "19:59:59 is still day");

    let redraws = run_until(&mut scheduler, &mut station, Duration::from_secs(31));
    assert!(station.night_mode(), "20:00 switches to night");
    assert!(redraws >= 1, "Palette change redraws the chart");
    assert_eq!(station.snapshot().time_text().as_str(), "20:00");
}

#[test]
fn test_history_shifts_every_thirty_seconds() {
    let config = Config::default();
    let mut station = Station::with_rng(&config, at(9, 0, 0), StdRng::seed_from_u64(5));
    let mut scheduler = Scheduler::new(Cadence::from(&config.timing));
    let initial: Vec<f32> = station.state().history.as_slice().to_vec();

    let redraws = run_until(&mut scheduler, &mut station, Duration::from_secs(90));
    let history = station.state().history.as_slice();

    assert_eq!(history.len(), HISTORY_LEN);
    assert_eq!(redraws, 3, "One chart redraw per history tick");
    assert_eq!(&history[..HISTORY_LEN - 3], &initial[3..], "Window shifted by three");
}

#[test]
fn test_uptime_follows_session() {
    let config = frozen_config();
    let mut station = Station::with_rng(&config, at(9, 0, 0), StdRng::seed_from_u64(6));
    let mut scheduler = Scheduler::new(Cadence::from(&config.timing));

    run_until(&mut scheduler, &mut station, Duration::from_secs(28 * 60));
    assert_eq!(station.state().system.uptime_label().as_str(), "2d 15h 0m");
}

// =============================================================================
// App
// =============================================================================

#[test]
fn test_app_hour_of_operation() {
    let config = Config::default();
    let station = Station::with_rng(&config, at(8, 0, 0), StdRng::seed_from_u64(7));
    let hourly_before = *station.hourly();
    let mut app = App::with_station(&config, station);

    for minute in 1..=60 {
        app.step(Duration::from_secs(minute * 60)).unwrap();
    }

    let snapshot = app.station().snapshot();
    assert_eq!(app.station().sim_ticks(), 720);
    assert_eq!(snapshot.state.history.len(), HISTORY_LEN);
    assert_eq!(snapshot.hourly, hourly_before, "Hourly statistics never change");
    assert_eq!(snapshot.daily, daily_stats(&hourly_before));
    assert!(snapshot.state.battery_pct <= 87, "Battery never charges");
    assert_eq!(snapshot.time_text().as_str(), "09:00");
}

#[test]
fn test_app_page_flip_redraws_chart() {
    let config = Config::default();
    let station = Station::with_rng(&config, at(8, 0, 0), StdRng::seed_from_u64(8));
    let mut app = App::with_station(&config, station);
    app.step(Duration::ZERO).unwrap();

    assert!(app.advance_page());
    let report = app.step(Duration::from_millis(100)).unwrap();
    let frame = report.frame.expect("Page flip produces a frame");
    assert!(frame.full_redraw && frame.chart_drawn);
    assert_eq!(app.station().page(), Page::History);
}
