//! Config loading and session construction.

use std::path::Path;

use tk_controls::SliderRange;
use tk_core::units::{Volume, m, m2, to_m3};
use tk_project::{SessionConfig, SliderDef, validate_config};
use tk_sim::{DriverSettings, Session, SessionSettings};

use crate::error::{AppError, AppResult};

/// Load a config file, or the stock panel config when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> AppResult<SessionConfig> {
    match path {
        Some(path) => {
            let config = tk_project::load(path)?;
            tracing::info!(path = %path.display(), name = %config.name, "loaded session config");
            Ok(config)
        }
        None => Ok(SessionConfig::default()),
    }
}

pub fn save_config(path: &Path, config: &SessionConfig) -> AppResult<()> {
    tk_project::save(path, config)?;
    Ok(())
}

/// Translate a validated config into simulator settings.
pub fn session_settings(config: &SessionConfig) -> AppResult<SessionSettings> {
    validate_config(config).map_err(|e| AppError::Config(e.to_string()))?;

    let controls = &config.controls;
    let area = &controls.cross_section_area;
    Ok(SessionSettings {
        cross_section_area_m2: config.tank.cross_section_area_m2,
        max_height_m: config.tank.max_height_m,
        initial_volume_m3: config.tank.initial_volume_m3,
        flow_coefficient: config.valve.flow_coefficient,
        initial_valve_position: config.valve.initial_position,
        inlet_flow_range: slider_range("inlet_flow", &controls.inlet_flow)?,
        inlet_flow_m3ps: controls.inlet_flow.default,
        outlet_flow_range: slider_range("outlet_flow", &controls.outlet_flow)?,
        outlet_flow_m3ps: controls.outlet_flow.default,
        area_range: SliderRange::new("cross_section_area", area.min, area.max, area.step)?,
        driver: DriverSettings {
            tick_interval_ms: config.driver.tick_interval_ms,
            max_dt_s: config.driver.max_dt_s,
            history_capacity: config.driver.history_capacity,
            overlay_timeout_s: config.driver.overlay_timeout_s,
        },
    })
}

fn slider_range(what: &'static str, def: &SliderDef) -> AppResult<SliderRange> {
    Ok(SliderRange::new(what, def.min, def.max, def.step)?)
}

/// Build a running session whose clock currently reads `now_s`.
pub fn start_session(config: &SessionConfig, now_s: f64) -> AppResult<Session> {
    let session = Session::new(session_settings(config)?, now_s)?;
    tracing::debug!(
        name = %config.name,
        max_volume_m3 = session.max_volume_m3(),
        "session started"
    );
    Ok(session)
}

/// Derived quantities for display.
#[derive(Debug, Clone)]
pub struct ConfigSummary {
    pub name: String,
    pub max_volume: Volume,
    /// Max volume at the smallest and largest slider area.
    pub max_volume_span: (Volume, Volume),
    pub inlet_flow: SliderDef,
    pub outlet_flow: SliderDef,
    pub tick_interval_ms: u64,
    pub max_dt_s: f64,
    pub history_capacity: usize,
    /// Wall time covered by a full history window at the nominal cadence.
    pub history_window_s: f64,
    pub overlay_timeout_s: f64,
}

impl ConfigSummary {
    pub fn max_volume_m3(&self) -> f64 {
        to_m3(self.max_volume)
    }
}

pub fn summarize(config: &SessionConfig) -> ConfigSummary {
    let height = m(config.tank.max_height_m);
    let area = &config.controls.cross_section_area;
    ConfigSummary {
        name: config.name.clone(),
        max_volume: m2(config.tank.cross_section_area_m2) * height,
        max_volume_span: (m2(area.min) * height, m2(area.max) * height),
        inlet_flow: config.controls.inlet_flow,
        outlet_flow: config.controls.outlet_flow,
        tick_interval_ms: config.driver.tick_interval_ms,
        max_dt_s: config.driver.max_dt_s,
        history_capacity: config.driver.history_capacity,
        history_window_s: config.driver.history_capacity as f64
            * config.driver.tick_interval_ms as f64
            / 1000.0,
        overlay_timeout_s: config.driver.overlay_timeout_s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_starts_stock_session() {
        let session = start_session(&SessionConfig::default(), 0.0).unwrap();
        assert_eq!(session.max_volume_m3(), 1.2);
        assert_eq!(session.inlet_setpoint().value(), 0.8);
        assert_eq!(session.outlet_setpoint().value(), 0.35);
        assert_eq!(session.history().capacity(), 100);
        assert_eq!(session.overlay().timeout_s(), 5.0);
    }

    #[test]
    fn invalid_config_is_config_error() {
        let mut config = SessionConfig::default();
        config.tank.max_height_m = -2.0;
        assert!(matches!(
            start_session(&config, 0.0),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn summary_of_default_config() {
        let summary = summarize(&SessionConfig::default());
        assert!((summary.max_volume_m3() - 1.2).abs() < 1e-12);
        assert!((to_m3(summary.max_volume_span.0) - 0.5).abs() < 1e-12);
        assert!((to_m3(summary.max_volume_span.1) - 3.0).abs() < 1e-12);
        assert!((summary.history_window_s - 5.0).abs() < 1e-12);
    }

    #[test]
    fn missing_path_means_defaults() {
        assert_eq!(load_config(None).unwrap(), SessionConfig::default());
    }
}
