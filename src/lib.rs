pub mod error;
pub mod simulation;
pub mod configuration;

pub use error::{Result, SimError};

pub use simulation::states::{distance, Body, NVec3, System, Trajectory};
pub use simulation::params::{CollisionRule, Parameters, TimeUnit, DAYS_PER_YEAR, SECONDS_PER_DAY};
pub use simulation::presets::PhysicalConstants;
pub use simulation::forces::{AccelSet, Acceleration, NewtonianGravity};
pub use simulation::integrator::advance;
pub use simulation::collision::{collides, merge, resolve, Merge, Resolution};
pub use simulation::engine::{run, MergeEvent, Simulation, SimulationOutput};
pub use simulation::scenario::Scenario;

pub use configuration::config::{BodyConfig, ParametersConfig, PresetConfig, ScenarioConfig};
