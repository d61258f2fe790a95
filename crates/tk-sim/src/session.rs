//! Session state and the per-refresh tick driver.
//!
//! A [`Session`] owns everything one operator sees: tank, inlet valve,
//! history window, run state, overlay and slider setpoints. The owner (the
//! panel or the headless runner) calls [`Session::tick`] once per refresh
//! with the current session time.

use std::time::Duration;

use tk_controls::{
    BoundedSetpoint, DEFAULT_OVERLAY_TIMEOUT_S, RunState, SliderRange, ValveOverlay,
};

use crate::error::{SimError, SimResult};
use crate::history::{DEFAULT_HISTORY_CAPACITY, History, HistorySample};
use crate::tank::{DEFAULT_CROSS_SECTION_AREA_M2, DEFAULT_MAX_HEIGHT_M, Tank};
use crate::valve::{DEFAULT_FLOW_COEFFICIENT, Valve};

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;
/// Upper bound on simulated time injected by a single tick.
pub const DEFAULT_MAX_DT_S: f64 = 0.1;

/// Refresh cadence and per-tick limits.
#[derive(Clone, Debug, PartialEq)]
pub struct DriverSettings {
    pub tick_interval_ms: u64,
    pub max_dt_s: f64,
    pub history_capacity: usize,
    pub overlay_timeout_s: f64,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            max_dt_s: DEFAULT_MAX_DT_S,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            overlay_timeout_s: DEFAULT_OVERLAY_TIMEOUT_S,
        }
    }
}

impl DriverSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Everything needed to start a session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSettings {
    pub cross_section_area_m2: f64,
    pub max_height_m: f64,
    pub initial_volume_m3: f64,
    pub flow_coefficient: f64,
    pub initial_valve_position: f64,
    pub inlet_flow_range: SliderRange,
    pub inlet_flow_m3ps: f64,
    pub outlet_flow_range: SliderRange,
    pub outlet_flow_m3ps: f64,
    pub area_range: SliderRange,
    pub driver: DriverSettings,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cross_section_area_m2: DEFAULT_CROSS_SECTION_AREA_M2,
            max_height_m: DEFAULT_MAX_HEIGHT_M,
            initial_volume_m3: 0.0,
            flow_coefficient: DEFAULT_FLOW_COEFFICIENT,
            initial_valve_position: 0.0,
            inlet_flow_range: SliderRange {
                min: 0.0,
                max: 1.5,
                step: 0.01,
            },
            inlet_flow_m3ps: 0.8,
            outlet_flow_range: SliderRange {
                min: 0.0,
                max: 1.2,
                step: 0.01,
            },
            outlet_flow_m3ps: 0.35,
            area_range: SliderRange {
                min: 0.5,
                max: 3.0,
                step: 0.01,
            },
            driver: DriverSettings::default(),
        }
    }
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    /// False while paused.
    pub advanced: bool,
    /// Simulated seconds applied (after clamping).
    pub dt_s: f64,
    /// The overlay timed out on this tick.
    pub overlay_dismissed: bool,
}

#[derive(Clone, Debug)]
pub struct Session {
    tank: Tank,
    valve: Valve,
    history: History,
    run_state: RunState,
    overlay: ValveOverlay,
    inlet_flow: BoundedSetpoint,
    outlet_flow: BoundedSetpoint,
    cross_section_area: BoundedSetpoint,
    last_update_s: f64,
    max_dt_s: f64,
    tick_interval: Duration,
}

impl Session {
    /// Build a running session whose clock reads `now_s`.
    ///
    /// # Errors
    ///
    /// Rejects non-positive geometry, flow coefficient, history capacity,
    /// tick interval or `max_dt_s`, inverted or non-finite slider ranges,
    /// and an area range that admits values at or below zero.
    pub fn new(settings: SessionSettings, now_s: f64) -> SimResult<Self> {
        let driver = &settings.driver;
        if !(driver.max_dt_s.is_finite() && driver.max_dt_s > 0.0) {
            return Err(SimError::InvalidArg {
                what: "max_dt_s must be positive",
            });
        }
        if driver.tick_interval_ms == 0 {
            return Err(SimError::InvalidArg {
                what: "tick_interval_ms must be positive",
            });
        }
        if settings.area_range.min <= 0.0 {
            return Err(SimError::Config {
                message: format!(
                    "cross-section area range must stay above zero, got minimum {}",
                    settings.area_range.min
                ),
            });
        }

        let cross_section_area = BoundedSetpoint::new(
            "cross_section_area",
            settings.area_range,
            settings.cross_section_area_m2,
        )?;
        let tank = Tank::new(cross_section_area.value(), settings.max_height_m)?
            .with_volume(settings.initial_volume_m3);
        let valve =
            Valve::new(settings.flow_coefficient)?.with_position(settings.initial_valve_position);

        Ok(Self {
            tank,
            valve,
            history: History::new(driver.history_capacity)?,
            run_state: RunState::Running,
            overlay: ValveOverlay::new(driver.overlay_timeout_s)?,
            inlet_flow: BoundedSetpoint::new(
                "inlet_flow",
                settings.inlet_flow_range,
                settings.inlet_flow_m3ps,
            )?,
            outlet_flow: BoundedSetpoint::new(
                "outlet_flow",
                settings.outlet_flow_range,
                settings.outlet_flow_m3ps,
            )?,
            cross_section_area,
            last_update_s: now_s,
            max_dt_s: driver.max_dt_s,
            tick_interval: driver.tick_interval(),
        })
    }

    /// Advance the session to `now_s`.
    ///
    /// The overlay timeout is checked on every tick, paused or not. While
    /// paused nothing else changes, including the last update time, so the
    /// first tick after resume is bounded by `max_dt_s`.
    pub fn tick(&mut self, now_s: f64) -> TickReport {
        if !now_s.is_finite() {
            tracing::warn!(now_s, "skipped tick with non-finite clock reading");
            return TickReport {
                advanced: false,
                dt_s: 0.0,
                overlay_dismissed: false,
            };
        }

        let overlay_dismissed = self.overlay.poll(now_s);

        if self.run_state.is_paused() {
            return TickReport {
                advanced: false,
                dt_s: 0.0,
                overlay_dismissed,
            };
        }

        let dt_s = self.clamp_dt(now_s - self.last_update_s);
        let q_in = self.inlet_flow_m3ps();
        let q_out = self.outlet_flow_m3ps();

        let volume = self.tank.advance(dt_s, q_in, q_out);
        self.last_update_s = now_s;

        self.history.append(HistorySample {
            time_s: now_s,
            level_pct: self.tank.level(volume) * 100.0,
            inlet_flow: q_in,
            outlet_flow: q_out,
        });

        TickReport {
            advanced: true,
            dt_s,
            overlay_dismissed,
        }
    }

    fn clamp_dt(&self, raw_s: f64) -> f64 {
        if raw_s.is_nan() {
            return 0.0;
        }
        raw_s.clamp(0.0, self.max_dt_s)
    }

    // --- operator actions ---

    pub fn toggle_inlet(&mut self) -> bool {
        let open = self.valve.toggle();
        tracing::info!(open, "inlet valve toggled");
        open
    }

    pub fn set_inlet_open(&mut self, open: bool) {
        if self.valve.is_open() != open {
            tracing::info!(open, "inlet valve set");
        }
        self.valve.set_open(open);
    }

    pub fn toggle_pause(&mut self) -> RunState {
        self.run_state.toggle();
        self.run_state
    }

    /// Empty the tank, close the inlet and clear history. Works in any run
    /// state and leaves setpoints, geometry and the overlay alone.
    pub fn reset(&mut self) {
        self.tank.empty();
        self.valve.set_open(false);
        self.history.reset();
        tracing::info!(paused = self.run_state.is_paused(), "session reset");
    }

    /// Returns the stored (clamped) setpoint.
    pub fn set_inlet_flow(&mut self, q_m3ps: f64) -> f64 {
        write_setpoint(&mut self.inlet_flow, q_m3ps)
    }

    pub fn set_outlet_flow(&mut self, q_m3ps: f64) -> f64 {
        write_setpoint(&mut self.outlet_flow, q_m3ps)
    }

    /// Change the tank cross-section. The stored volume is clamped by the
    /// next tick if the tank shrank below it.
    pub fn set_cross_section_area(&mut self, area_m2: f64) -> f64 {
        let area = write_setpoint(&mut self.cross_section_area, area_m2);
        if let Err(e) = self.tank.set_cross_section_area(area) {
            tracing::warn!(error = %e, "cross-section update rejected");
        }
        self.tank.cross_section_area_m2()
    }

    pub fn set_valve_position(&mut self, position: f64) {
        if !position.is_finite() {
            tracing::warn!(position, "ignored non-finite valve position");
            return;
        }
        self.valve.set_position(position);
    }

    pub fn valve_fully_open(&mut self) {
        self.valve.fully_open();
    }

    pub fn valve_fully_close(&mut self) {
        self.valve.fully_close();
    }

    pub fn open_overlay(&mut self, now_s: f64) {
        self.overlay.open(now_s);
    }

    pub fn close_overlay(&mut self) {
        self.overlay.close();
    }

    // --- readouts ---

    pub fn tank(&self) -> &Tank {
        &self.tank
    }

    pub fn valve(&self) -> &Valve {
        &self.valve
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn overlay(&self) -> &ValveOverlay {
        &self.overlay
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_paused(&self) -> bool {
        self.run_state.is_paused()
    }

    pub fn is_inlet_open(&self) -> bool {
        self.valve.is_open()
    }

    pub fn volume_m3(&self) -> f64 {
        self.tank.volume_m3()
    }

    pub fn max_volume_m3(&self) -> f64 {
        self.tank.max_volume_m3()
    }

    /// Fill fraction in [0, 1].
    pub fn level(&self) -> f64 {
        self.tank.current_level()
    }

    pub fn level_pct(&self) -> f64 {
        self.level() * 100.0
    }

    pub fn is_overflow(&self) -> bool {
        self.tank.is_overflowing()
    }

    /// Inlet flow the tank receives right now (zero while the inlet is closed).
    pub fn inlet_flow_m3ps(&self) -> f64 {
        self.valve.gated_flow(self.inlet_flow.value())
    }

    pub fn outlet_flow_m3ps(&self) -> f64 {
        self.outlet_flow.value()
    }

    pub fn inlet_setpoint(&self) -> &BoundedSetpoint {
        &self.inlet_flow
    }

    pub fn outlet_setpoint(&self) -> &BoundedSetpoint {
        &self.outlet_flow
    }

    pub fn area_setpoint(&self) -> &BoundedSetpoint {
        &self.cross_section_area
    }

    pub fn last_update_s(&self) -> f64 {
        self.last_update_s
    }

    pub fn max_dt_s(&self) -> f64 {
        self.max_dt_s
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

fn write_setpoint(setpoint: &mut BoundedSetpoint, v: f64) -> f64 {
    match setpoint.set(v) {
        Ok(stored) => stored,
        Err(e) => {
            tracing::warn!(setpoint = setpoint.name(), error = %e, "ignored setpoint write");
            setpoint.value()
        }
    }
}
