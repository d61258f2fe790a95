//! Headless session runs.
//!
//! Drives a session on a manual clock, one tick per nominal refresh, the
//! same way the panel does on a wall clock.

use std::time::Instant;

use tk_project::SessionConfig;
use tk_sim::{Clock, ManualClock, Session};

use crate::config_service::start_session;
use crate::error::{AppError, AppResult};

/// What to run and with which operator inputs.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRequest {
    pub ticks: usize,
    /// Wall seconds between ticks; defaults to the configured tick interval.
    pub wall_step_s: Option<f64>,
    pub inlet_open: bool,
    pub inlet_flow_m3ps: Option<f64>,
    pub outlet_flow_m3ps: Option<f64>,
    pub cross_section_area_m2: Option<f64>,
}

/// Per-tick progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunProgressEvent {
    pub tick: usize,
    pub total: usize,
    pub time_s: f64,
    pub volume_m3: f64,
    pub level_pct: f64,
    pub overflow: bool,
}

#[derive(Debug)]
pub struct HeadlessResponse {
    pub session: Session,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub final_time_s: f64,
    pub ticks_run: usize,
    /// Session time of the first tick that reported overflow.
    pub first_overflow_s: Option<f64>,
    pub elapsed_wall_s: f64,
}

pub fn run_headless(
    config: &SessionConfig,
    request: &HeadlessRequest,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<HeadlessResponse> {
    let started = Instant::now();
    let started_at = chrono::Utc::now();

    let mut clock = ManualClock::default();
    let mut session = start_session(config, clock.now_s())?;

    let wall_step_s = match request.wall_step_s {
        Some(step) if step.is_finite() && step > 0.0 => step,
        Some(step) => {
            return Err(AppError::InvalidInput(format!(
                "wall step must be positive, got {step}"
            )));
        }
        None => session.tick_interval().as_secs_f64(),
    };

    if let Some(q) = request.inlet_flow_m3ps {
        session.set_inlet_flow(q);
    }
    if let Some(q) = request.outlet_flow_m3ps {
        session.set_outlet_flow(q);
    }
    if let Some(area) = request.cross_section_area_m2 {
        session.set_cross_section_area(area);
    }
    session.set_inlet_open(request.inlet_open);

    tracing::info!(
        ticks = request.ticks,
        wall_step_s,
        inlet_open = request.inlet_open,
        "headless run started"
    );

    let mut first_overflow_s = None;
    for tick in 1..=request.ticks {
        let now = clock.advance(wall_step_s);
        session.tick(now);

        let overflow = session.is_overflow();
        if overflow && first_overflow_s.is_none() {
            first_overflow_s = Some(now);
            tracing::warn!(time_s = now, "tank reached overflow");
        }

        if let Some(cb) = progress_cb.as_mut() {
            cb(RunProgressEvent {
                tick,
                total: request.ticks,
                time_s: now,
                volume_m3: session.volume_m3(),
                level_pct: session.level_pct(),
                overflow,
            });
        }
    }

    Ok(HeadlessResponse {
        final_time_s: clock.now_s(),
        session,
        started_at,
        ticks_run: request.ticks,
        first_overflow_s,
        elapsed_wall_s: started.elapsed().as_secs_f64(),
    })
}
