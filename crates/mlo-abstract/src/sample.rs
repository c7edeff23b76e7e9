use serde::{Deserialize, Serialize};

/// Throughput read back from one simulator run, in Mbps.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThroughputSample {
    pub link1: f64,
    pub link2: f64,
    pub total: f64,
}

impl ThroughputSample {
    /// Placeholder used when an artifact could not be read. Not a measured zero.
    pub const SENTINEL: Self = Self {
        link1: 0.0,
        link2: 0.0,
        total: 0.0,
    };

    pub fn new(link1: f64, link2: f64, total: f64) -> Self {
        Self {
            link1,
            link2,
            total,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}
