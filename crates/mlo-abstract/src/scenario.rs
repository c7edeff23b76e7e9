use crate::config::{ModelCurve, RunConfig};
use serde::Deserialize;

/// A sweep described in TOML. Everything except the name is optional and
/// falls back to the built-in defaults.
#[derive(Deserialize, Debug, Clone)]
pub struct SweepScenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub run: RunConfigOverride,
    /// Station counts, in the order they should be run.
    pub stations: Option<Vec<u32>>,
    /// Exactly two analytical comparison curves.
    pub models: Option<[ModelCurve; 2]>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RunConfigOverride {
    pub rng_run: Option<u64>,
    pub payload_size: Option<u32>,
    pub simulation_time: Option<f64>,
    pub mcs1: Option<u32>,
    pub mcs2: Option<u32>,
    pub channel_width1: Option<u32>,
    pub channel_width2: Option<u32>,
    pub per_node_lambda: Option<f64>,
}

impl RunConfigOverride {
    pub fn apply_to(&self, config: &mut RunConfig) {
        if let Some(v) = self.rng_run {
            config.rng_run = v;
        }
        if let Some(v) = self.payload_size {
            config.payload_size = v;
        }
        if let Some(v) = self.simulation_time {
            config.simulation_time = v;
        }
        if let Some(v) = self.mcs1 {
            config.mcs1 = v;
        }
        if let Some(v) = self.mcs2 {
            config.mcs2 = v;
        }
        if let Some(v) = self.channel_width1 {
            config.channel_width1 = v;
        }
        if let Some(v) = self.channel_width2 {
            config.channel_width2 = v;
        }
        if let Some(v) = self.per_node_lambda {
            config.per_node_lambda = v;
        }
    }
}
