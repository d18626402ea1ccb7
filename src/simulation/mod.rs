pub mod states;
pub mod params;
pub mod presets;
pub mod forces;
pub mod integrator;
pub mod collision;
pub mod engine;
pub mod scenario;
