pub mod config;
pub mod interface;
pub mod sample;
pub mod scenario;

pub use interface::{RunStatus, SimulationRunner};
pub use sample::ThroughputSample;

pub use config::{ModelCurve, RunConfig, default_model_curves, default_stations};
pub use scenario::{RunConfigOverride, SweepScenario};
