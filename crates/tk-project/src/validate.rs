//! Session configuration validation.

use crate::schema::{CONFIG_VERSION, RangeDef, SessionConfig, SliderDef};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid range: {field} = [{min}, {max}] ({reason})")]
    InvalidRange {
        field: String,
        min: f64,
        max: f64,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_config(config: &SessionConfig) -> Result<(), ValidationError> {
    if config.version == 0 || config.version > CONFIG_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    let tank = &config.tank;
    positive("tank.cross_section_area_m2", tank.cross_section_area_m2)?;
    positive("tank.max_height_m", tank.max_height_m)?;
    if !tank.initial_volume_m3.is_finite() || tank.initial_volume_m3 < 0.0 {
        return Err(invalid(
            "tank.initial_volume_m3",
            tank.initial_volume_m3,
            "must be finite and non-negative",
        ));
    }

    positive("valve.flow_coefficient", config.valve.flow_coefficient)?;
    let pos = config.valve.initial_position;
    if !(0.0..=1.0).contains(&pos) {
        return Err(invalid("valve.initial_position", pos, "must be within [0, 1]"));
    }

    let controls = &config.controls;
    slider("controls.inlet_flow", &controls.inlet_flow)?;
    slider("controls.outlet_flow", &controls.outlet_flow)?;
    if controls.inlet_flow.min < 0.0 {
        return Err(range_err(
            "controls.inlet_flow",
            controls.inlet_flow.min,
            controls.inlet_flow.max,
            "flows cannot be negative",
        ));
    }
    if controls.outlet_flow.min < 0.0 {
        return Err(range_err(
            "controls.outlet_flow",
            controls.outlet_flow.min,
            controls.outlet_flow.max,
            "flows cannot be negative",
        ));
    }

    let area = &controls.cross_section_area;
    range("controls.cross_section_area", area)?;
    if area.min <= 0.0 {
        return Err(range_err(
            "controls.cross_section_area",
            area.min,
            area.max,
            "tank area must stay above zero",
        ));
    }
    if tank.cross_section_area_m2 < area.min || tank.cross_section_area_m2 > area.max {
        return Err(invalid(
            "tank.cross_section_area_m2",
            tank.cross_section_area_m2,
            "outside controls.cross_section_area",
        ));
    }

    let driver = &config.driver;
    if driver.tick_interval_ms == 0 {
        return Err(invalid("driver.tick_interval_ms", 0.0, "must be positive"));
    }
    positive("driver.max_dt_s", driver.max_dt_s)?;
    if driver.history_capacity == 0 {
        return Err(invalid("driver.history_capacity", 0.0, "must be at least 1"));
    }
    positive("driver.overlay_timeout_s", driver.overlay_timeout_s)?;

    Ok(())
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite and positive"))
    }
}

fn range(field: &str, def: &RangeDef) -> Result<(), ValidationError> {
    if !def.min.is_finite() || !def.max.is_finite() {
        return Err(range_err(field, def.min, def.max, "bounds must be finite"));
    }
    if def.min > def.max {
        return Err(range_err(field, def.min, def.max, "min exceeds max"));
    }
    positive(&format!("{field}.step"), def.step)
}

fn slider(field: &str, def: &SliderDef) -> Result<(), ValidationError> {
    range(
        field,
        &RangeDef {
            min: def.min,
            max: def.max,
            step: def.step,
        },
    )?;
    if !(def.min..=def.max).contains(&def.default) {
        return Err(invalid(
            &format!("{field}.default"),
            def.default,
            "outside slider range",
        ));
    }
    Ok(())
}

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn range_err(field: &str, min: f64, max: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidRange {
        field: field.to_string(),
        min,
        max,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        validate_config(&SessionConfig::default()).unwrap();
    }

    #[test]
    fn rejects_zero_geometry() {
        let mut config = SessionConfig::default();
        config.tank.max_height_m = 0.0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("tank.max_height_m"));
    }

    #[test]
    fn rejects_area_range_touching_zero() {
        let mut config = SessionConfig::default();
        config.controls.cross_section_area.min = 0.0;
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidRange { .. })
        ));
    }

    #[test]
    fn rejects_default_outside_slider() {
        let mut config = SessionConfig::default();
        config.controls.inlet_flow.default = 2.0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("controls.inlet_flow.default"));
    }

    #[test]
    fn rejects_inverted_range() {
        let mut config = SessionConfig::default();
        config.controls.outlet_flow.min = 2.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_initial_area_outside_range() {
        let mut config = SessionConfig::default();
        config.tank.cross_section_area_m2 = 4.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_bad_driver() {
        let mut config = SessionConfig::default();
        config.driver.history_capacity = 0;
        assert!(validate_config(&config).is_err());

        let mut config = SessionConfig::default();
        config.driver.tick_interval_ms = 0;
        assert!(validate_config(&config).is_err());

        let mut config = SessionConfig::default();
        config.driver.max_dt_s = f64::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_future_version() {
        let config = SessionConfig {
            version: CONFIG_VERSION + 1,
            ..SessionConfig::default()
        };
        assert_eq!(
            validate_config(&config),
            Err(ValidationError::UnsupportedVersion {
                version: CONFIG_VERSION + 1
            })
        );
    }
}
