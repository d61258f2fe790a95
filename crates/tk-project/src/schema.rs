//! Session configuration schema.
//!
//! Every section and field has a default, so a partial file (or an empty
//! one) describes the stock panel: a 1.2 m² x 1.0 m tank, 0.8 inlet and
//! 0.35 outlet setpoints, and a 50 ms refresh.

use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub tank: TankDef,
    #[serde(default)]
    pub valve: ValveDef,
    #[serde(default)]
    pub controls: ControlsDef,
    #[serde(default)]
    pub driver: DriverDef,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            name: default_name(),
            tank: TankDef::default(),
            valve: ValveDef::default(),
            controls: ControlsDef::default(),
            driver: DriverDef::default(),
        }
    }
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_name() -> String {
    "Tank & Valve".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TankDef {
    pub cross_section_area_m2: f64,
    pub max_height_m: f64,
    pub initial_volume_m3: f64,
}

impl Default for TankDef {
    fn default() -> Self {
        Self {
            cross_section_area_m2: 1.2,
            max_height_m: 1.0,
            initial_volume_m3: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValveDef {
    pub flow_coefficient: f64,
    pub initial_position: f64,
}

impl Default for ValveDef {
    fn default() -> Self {
        Self {
            flow_coefficient: 0.8,
            initial_position: 0.0,
        }
    }
}

/// Inclusive slider bounds and step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RangeDef {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// A slider: inclusive bounds, step and starting value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SliderDef {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlsDef {
    pub inlet_flow: SliderDef,
    pub outlet_flow: SliderDef,
    /// Starting value comes from `tank.cross_section_area_m2`.
    pub cross_section_area: RangeDef,
}

impl Default for ControlsDef {
    fn default() -> Self {
        Self {
            inlet_flow: SliderDef {
                min: 0.0,
                max: 1.5,
                step: 0.01,
                default: 0.8,
            },
            outlet_flow: SliderDef {
                min: 0.0,
                max: 1.2,
                step: 0.01,
                default: 0.35,
            },
            cross_section_area: RangeDef {
                min: 0.5,
                max: 3.0,
                step: 0.01,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DriverDef {
    pub tick_interval_ms: u64,
    pub max_dt_s: f64,
    pub history_capacity: usize,
    pub overlay_timeout_s: f64,
}

impl Default for DriverDef {
    fn default() -> Self {
        Self {
            tick_interval_ms: 50,
            max_dt_s: 0.1,
            history_capacity: 100,
            overlay_timeout_s: 5.0,
        }
    }
}
