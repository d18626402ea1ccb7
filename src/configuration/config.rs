//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`ParametersConfig`] – horizon, step size, collision rule, optional `G`/seed
//! - [`PhysicalConstants`] – optional overrides of the constants table
//! - [`BodyConfig`]       – one entry per body, literal or from a preset
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   horizon: 1.0
//!   horizon_unit: years     # seconds | days | years
//!   dt: 1.0
//!   dt_unit: days
//!   collision: larger_radius  # or sum_of_radii
//!   seed: 42                # only needed by random presets
//!
//! bodies:
//!   - name: sun
//!     preset: static_sun
//!   - name: earth
//!     x: [1.4714e11, 0.0, 0.0]
//!     v: [0.0, 30000.0, 0.0]
//!     m: 5.972e24
//!     radius: 6.371e6
//!   - name: moonlet
//!     preset: circular_orbit
//!     around: sun
//!     distance: 2.0e11
//! ```
//!
//! The scenario builder maps this into runtime `Body` and `Parameters` values.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::simulation::params::{CollisionRule, TimeUnit};
use crate::simulation::presets::PhysicalConstants;

/// Global numerical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub horizon: f64, // total simulated duration, in `horizon_unit`
    #[serde(default)]
    pub horizon_unit: TimeUnit,
    pub dt: f64, // fixed step size, in `dt_unit`
    #[serde(default)]
    pub dt_unit: TimeUnit,
    #[serde(default)]
    pub collision: CollisionRule,
    #[serde(default)]
    pub G: Option<f64>, // overrides constants.G when present
    #[serde(default)]
    pub seed: Option<u64>, // deterministic seed for random presets
}

/// Named starting configurations
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PresetConfig {
    StaticSun,
    StaticEarth,
    RealEarth,
    RandomSun,
    RandomEarth,
    CircularOrbit, // needs `around` and `distance`
}

/// Configuration for a single body's initial state
///
/// Without a preset, `m` is required and the rest defaults to zero.
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String,
    #[serde(default)]
    pub preset: Option<PresetConfig>,
    #[serde(default)]
    pub x: Option<[f64; 3]>, // position (m)
    #[serde(default)]
    pub v: Option<[f64; 3]>, // velocity (m/s)
    #[serde(default)]
    pub m: Option<f64>, // mass (kg)
    #[serde(default)]
    pub radius: Option<f64>, // radius (m)
    #[serde(default)]
    pub around: Option<String>, // central body for circular_orbit
    #[serde(default)]
    pub distance: Option<f64>, // orbit radius for circular_orbit (m)
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub constants: PhysicalConstants,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_scenario() {
        let yaml = r#"
parameters:
  horizon: 2.0
  horizon_unit: years
  dt: 0.5
  dt_unit: days
  collision: sum_of_radii
  G: 1.0
  seed: 9
constants:
  m_sun: 2.0e30
bodies:
  - name: sun
    preset: static_sun
  - name: rock
    x: [1.0, 2.0, 3.0]
    m: 5.0
"#;
        let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.parameters.horizon_unit, TimeUnit::Years);
        assert_eq!(cfg.parameters.collision, CollisionRule::SumOfRadii);
        assert_eq!(cfg.parameters.G, Some(1.0));
        assert_eq!(cfg.parameters.seed, Some(9));
        assert_eq!(cfg.constants.m_sun, 2.0e30);
        assert_eq!(cfg.constants.r_sun, PhysicalConstants::default().r_sun);
        assert_eq!(cfg.bodies[0].preset, Some(PresetConfig::StaticSun));
        assert_eq!(cfg.bodies[1].x, Some([1.0, 2.0, 3.0]));
        assert_eq!(cfg.bodies[1].v, None);
    }

    #[test]
    fn defaults_apply() {
        let yaml = r#"
parameters:
  horizon: 10.0
  dt: 1.0
bodies: []
"#;
        let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.parameters.horizon_unit, TimeUnit::Seconds);
        assert_eq!(cfg.parameters.collision, CollisionRule::LargerRadius);
        assert_eq!(cfg.constants, PhysicalConstants::default());
    }

    #[test]
    fn rejects_unknown_preset() {
        let yaml = r#"
parameters: { horizon: 1.0, dt: 1.0 }
bodies:
  - name: x
    preset: black_hole
"#;
        assert!(ScenarioConfig::from_yaml_str(yaml).is_err());
    }
}
