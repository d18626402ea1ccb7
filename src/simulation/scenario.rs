//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - numerical parameters (`Parameters`, durations in seconds)
//! - the constants the bodies were built with (`PhysicalConstants`)
//! - initial bodies, in file order

use crate::configuration::config::{BodyConfig, PresetConfig, ScenarioConfig};
use crate::error::{Result, SimError};
use crate::simulation::engine::Simulation;
use crate::simulation::params::Parameters;
use crate::simulation::presets::{self, PhysicalConstants};
use crate::simulation::states::{Body, NVec3};

#[derive(Debug, Clone)]
pub struct Scenario {
    pub parameters: Parameters,
    pub constants: PhysicalConstants,
    pub bodies: Vec<Body>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let mut constants = cfg.constants;
        if let Some(g) = cfg.parameters.G {
            constants.G = g;
        }

        let p_cfg = &cfg.parameters;
        let parameters = Parameters::with_units(
            constants.G,
            p_cfg.horizon,
            p_cfg.horizon_unit,
            p_cfg.dt,
            p_cfg.dt_unit,
        )
        .with_collision(p_cfg.collision);
        parameters.validate()?;

        let mut rng = p_cfg.seed.map(fastrand::Rng::with_seed);

        // Bodies: built in order so circular_orbit can refer to earlier entries
        let mut bodies: Vec<Body> = Vec::with_capacity(cfg.bodies.len());
        for bc in &cfg.bodies {
            let body = build_body(bc, &bodies, &constants, rng.as_mut())?;
            bodies.push(body);
        }

        Ok(Self {
            parameters,
            constants,
            bodies,
        })
    }

    pub fn into_simulation(self) -> Result<Simulation> {
        Simulation::new(self.bodies, self.parameters)
    }
}

fn build_body(
    bc: &BodyConfig,
    built: &[Body],
    c: &PhysicalConstants,
    rng: Option<&mut fastrand::Rng>,
) -> Result<Body> {
    let name = bc.name.as_str();
    let Some(preset) = bc.preset else {
        if bc.around.is_some() || bc.distance.is_some() {
            return Err(SimError::config(format!(
                "body '{name}' sets `around`/`distance` without preset circular_orbit"
            )));
        }
        let m = bc.m.ok_or_else(|| {
            SimError::config(format!("body '{name}' needs either a preset or a mass `m`"))
        })?;
        return Body::new(
            name,
            bc.radius.unwrap_or(0.0),
            m,
            bc.x.map(NVec3::from).unwrap_or_else(NVec3::zeros),
            bc.v.map(NVec3::from).unwrap_or_else(NVec3::zeros),
        );
    };

    reject_preset_overrides(bc, preset)?;
    match preset {
        PresetConfig::StaticSun => presets::static_sun(name, c),
        PresetConfig::StaticEarth => presets::static_earth(name, c),
        PresetConfig::RealEarth => presets::real_earth(name, c),
        PresetConfig::RandomSun => presets::random_sun(name, c, seeded(name, rng)?),
        PresetConfig::RandomEarth => presets::random_earth(name, c, seeded(name, rng)?),
        PresetConfig::CircularOrbit => {
            let around = bc.around.as_deref().ok_or_else(|| {
                SimError::config(format!("circular_orbit body '{name}' needs `around`"))
            })?;
            let central = built.iter().find(|b| b.name() == around).ok_or_else(|| {
                SimError::config(format!("body '{name}' orbits unknown or later body '{around}'"))
            })?;
            let r = bc.distance.ok_or_else(|| {
                SimError::config(format!("circular_orbit body '{name}' needs `distance`"))
            })?;
            presets::circular_orbit(name, central, r, c)
        }
    }
}

/// A preset fixes the whole initial state; literal fields next to it are an error.
fn reject_preset_overrides(bc: &BodyConfig, preset: PresetConfig) -> Result<()> {
    let orbit = preset == PresetConfig::CircularOrbit;
    let fields = [
        ("x", bc.x.is_some()),
        ("v", bc.v.is_some()),
        ("m", bc.m.is_some()),
        ("radius", bc.radius.is_some()),
        ("around", bc.around.is_some() && !orbit),
        ("distance", bc.distance.is_some() && !orbit),
    ];
    let extra: Vec<&str> = fields.iter().filter(|(_, set)| *set).map(|(f, _)| *f).collect();
    if extra.is_empty() {
        return Ok(());
    }
    Err(SimError::config(format!(
        "body '{}' uses preset {:?} and cannot also set {}",
        bc.name,
        preset,
        extra.join(", ")
    )))
}

fn seeded<'a>(name: &str, rng: Option<&'a mut fastrand::Rng>) -> Result<&'a mut fastrand::Rng> {
    rng.ok_or_else(|| {
        SimError::config(format!("random preset for '{name}' needs `seed` in parameters"))
    })
}
