//! Scenario tests for the tick driver.
//!
//! Each scenario builds a session from settings, drives it with a manual
//! clock and checks tank, history and panel state.

use tk_sim::{Clock, DriverSettings, ManualClock, Session, SessionSettings};

fn settings_with_max_dt(max_dt_s: f64) -> SessionSettings {
    SessionSettings {
        driver: DriverSettings {
            max_dt_s,
            ..DriverSettings::default()
        },
        ..SessionSettings::default()
    }
}

#[test]
fn fill_from_empty_one_second() {
    let mut clock = ManualClock::default();
    let mut session = Session::new(settings_with_max_dt(1.0), clock.now_s()).unwrap();
    session.set_inlet_open(true);
    session.set_inlet_flow(0.8);
    session.set_outlet_flow(0.35);

    clock.advance(1.0);
    let report = session.tick(clock.now_s());

    assert_eq!(report.dt_s, 1.0);
    assert!((session.volume_m3() - 0.45).abs() < 1e-12);
    assert!((session.level_pct() - 37.5).abs() < 1e-9);
    let sample = session.history().latest().unwrap();
    assert!((sample.level_pct - 37.5).abs() < 1e-9);
    assert_eq!(sample.inlet_flow, 0.8);
    assert_eq!(sample.outlet_flow, 0.35);
}

#[test]
fn drain_with_inlet_closed() {
    let settings = SessionSettings {
        initial_volume_m3: 1.1,
        ..settings_with_max_dt(1.0)
    };
    let mut session = Session::new(settings, 0.0).unwrap();
    session.tick(1.0);

    assert_eq!(session.inlet_flow_m3ps(), 0.0);
    assert!((session.volume_m3() - 0.75).abs() < 1e-12);
}

#[test]
fn overfill_clamps_and_flags_overflow() {
    let settings = SessionSettings {
        initial_volume_m3: 1.19999,
        inlet_flow_m3ps: 1.5,
        outlet_flow_m3ps: 0.0,
        ..settings_with_max_dt(1.0)
    };
    let mut session = Session::new(settings, 0.0).unwrap();
    session.set_inlet_open(true);
    session.tick(1.0);

    assert_eq!(session.volume_m3(), 1.2);
    assert!(session.is_overflow());
    assert_eq!(session.level_pct(), 100.0);
}

#[test]
fn large_wall_gap_is_bounded() {
    let mut session = Session::new(SessionSettings::default(), 0.0).unwrap();
    session.set_inlet_open(true);
    let report = session.tick(30.0);
    assert!((report.dt_s - 0.1).abs() < 1e-12);
    assert!(session.volume_m3() < 0.05);
}

#[test]
fn pause_freezes_volume_and_history() {
    let mut clock = ManualClock::default();
    let mut session = Session::new(SessionSettings::default(), clock.now_s()).unwrap();
    session.set_inlet_open(true);

    for _ in 0..10 {
        session.tick(clock.advance(0.05));
    }
    let volume = session.volume_m3();
    let samples = session.history().len();
    let last_update = session.last_update_s();

    session.toggle_pause();
    for _ in 0..10 {
        let report = session.tick(clock.advance(0.05));
        assert!(!report.advanced);
    }
    assert_eq!(session.volume_m3(), volume);
    assert_eq!(session.history().len(), samples);
    assert_eq!(session.last_update_s(), last_update);

    // Resume: the 0.5 s gap is clamped to one max_dt step
    session.toggle_pause();
    let report = session.tick(clock.advance(0.05));
    assert!(report.advanced);
    assert!((report.dt_s - 0.1).abs() < 1e-12);
    assert_eq!(session.history().len(), samples + 1);
}

#[test]
fn reset_works_in_either_run_state() {
    for paused in [false, true] {
        let mut session = Session::new(SessionSettings::default(), 0.0).unwrap();
        session.set_inlet_open(true);
        for i in 1..=5 {
            session.tick(i as f64 * 0.05);
        }
        if paused {
            session.toggle_pause();
        }
        session.set_inlet_flow(1.0);

        session.reset();

        assert_eq!(session.volume_m3(), 0.0);
        assert!(!session.is_inlet_open());
        assert!(session.history().is_empty());
        assert_eq!(session.is_paused(), paused);
        assert_eq!(session.inlet_setpoint().value(), 1.0);
    }
}

#[test]
fn history_window_slides_at_one_hundred() {
    let mut clock = ManualClock::default();
    let mut session = Session::new(SessionSettings::default(), clock.now_s()).unwrap();

    let first = clock.advance(0.05);
    session.tick(first);
    for _ in 0..100 {
        session.tick(clock.advance(0.05));
    }

    let series = session.history().to_series();
    assert_eq!(series.len(), 100);
    assert!(series.iter().all(|s| s.time_s > first));
    assert!(series.windows(2).all(|w| w[0].time_s < w[1].time_s));
}

#[test]
fn overlay_auto_dismiss_timing() {
    let mut session = Session::new(SessionSettings::default(), 0.0).unwrap();
    let t0 = 2.0;
    session.open_overlay(t0);

    let report = session.tick(t0 + 4.9);
    assert!(!report.overlay_dismissed);
    assert!(session.overlay().is_open());

    let report = session.tick(t0 + 5.1);
    assert!(report.overlay_dismissed);
    assert!(!session.overlay().is_open());
}

#[test]
fn overlay_times_out_while_paused() {
    let mut session = Session::new(SessionSettings::default(), 0.0).unwrap();
    session.toggle_pause();
    session.open_overlay(0.0);
    let report = session.tick(6.0);
    assert!(!report.advanced);
    assert!(report.overlay_dismissed);
}

#[test]
fn quick_actions_leave_overlay_state() {
    let mut session = Session::new(SessionSettings::default(), 0.0).unwrap();
    session.open_overlay(0.0);
    session.valve_fully_open();
    assert_eq!(session.valve().position(), 1.0);
    assert!((session.valve().flow_rate() - 0.8).abs() < 1e-12);
    assert!(session.overlay().is_open());

    session.valve_fully_close();
    assert_eq!(session.valve().position(), 0.0);
    assert!(session.overlay().is_open());

    session.close_overlay();
    session.valve_fully_open();
    assert!(!session.overlay().is_open());
}

#[test]
fn valve_position_does_not_feed_mass_balance() {
    let mut session = Session::new(settings_with_max_dt(1.0), 0.0).unwrap();
    session.valve_fully_open();
    session.tick(1.0);
    // Inlet gate closed: only the outlet acts, and the tank is empty
    assert_eq!(session.volume_m3(), 0.0);
    assert_eq!(session.inlet_flow_m3ps(), 0.0);
}

#[test]
fn shrinking_tank_clamps_on_next_tick() {
    let settings = SessionSettings {
        cross_section_area_m2: 3.0,
        initial_volume_m3: 2.5,
        outlet_flow_m3ps: 0.0,
        ..SessionSettings::default()
    };
    let mut session = Session::new(settings, 0.0).unwrap();
    session.set_cross_section_area(1.0);

    assert_eq!(session.max_volume_m3(), 1.0);
    assert_eq!(session.volume_m3(), 2.5);
    assert_eq!(session.level(), 1.0);

    session.tick(0.05);
    assert_eq!(session.volume_m3(), 1.0);
    assert!(session.is_overflow());
}
