use serde::{Deserialize, Serialize};

/// Fixed parameters of one sweep. Only the station count varies between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Seed handed to the simulator as `--rngRun`.
    pub rng_run: u64,
    /// Application payload size in bytes.
    pub payload_size: u32,
    /// Simulated duration in seconds. Recorded in the report, the simulator
    /// program uses its own default.
    pub simulation_time: f64,
    pub mcs1: u32,
    pub mcs2: u32,
    /// Channel width of link 1 in MHz.
    pub channel_width1: u32,
    /// Channel width of link 2 in MHz.
    pub channel_width2: u32,
    /// Per-station traffic intensity (`--mldPerNodeLambda`).
    pub per_node_lambda: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            rng_run: 1,
            payload_size: 1500,
            simulation_time: 10.0,
            mcs1: 2,
            mcs2: 2,
            channel_width1: 20,
            channel_width2: 40,
            per_node_lambda: 0.1,
        }
    }
}

/// One analytical comparison line: the model evaluated at a fixed MCS and width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCurve {
    pub label: String,
    pub mcs: u32,
    pub channel_width: u32,
}

impl ModelCurve {
    pub fn new(label: impl Into<String>, mcs: u32, channel_width: u32) -> Self {
        Self {
            label: label.into(),
            mcs,
            channel_width,
        }
    }
}

pub fn default_stations() -> Vec<u32> {
    vec![5, 10, 15, 20, 25, 30]
}

/// The two model lines drawn next to the measured series.
pub fn default_model_curves() -> [ModelCurve; 2] {
    [
        ModelCurve::new("Bianchi MCS4 40MHz", 4, 40),
        ModelCurve::new("Bianchi MCS2 20MHz", 2, 20),
    ]
}
