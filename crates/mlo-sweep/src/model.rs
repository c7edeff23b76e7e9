//! Bianchi-style closed-form throughput model.

use mlo_abstract::ModelCurve;
use serde::Serialize;
use std::collections::BTreeMap;

/// Contention and timing parameters of the model. All times in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BianchiModel {
    pub cw_min: u32,
    /// Carried for reference; the saturation formula below only uses `cw_min`.
    pub cw_max: u32,
    pub slot_time: f64,
    pub sifs: f64,
    pub ack_time: f64,
    pub payload_bits: f64,
}

impl Default for BianchiModel {
    fn default() -> Self {
        Self {
            cw_min: 15,
            cw_max: 1023,
            slot_time: 9e-6,
            sifs: 16e-6,
            ack_time: 44e-6,
            payload_bits: 1500.0 * 8.0,
        }
    }
}

impl BianchiModel {
    /// Per-slot transmission probability.
    pub fn tau(&self) -> f64 {
        2.0 / (self.cw_min as f64 + 1.0)
    }

    /// Probability that a transmission collides with one of the other `n - 1` stations.
    pub fn collision_probability(&self, stations: u32) -> f64 {
        let others = stations.saturating_sub(1);
        1.0 - (1.0 - self.tau()).powf(others as f64)
    }

    /// Predicted throughput for `stations` contenders. `0` is treated as a single
    /// station. Never negative.
    pub fn predict(&self, stations: u32, mcs: u32, channel_width: u32) -> f64 {
        let p = self.collision_probability(stations);
        let busy = self.sifs + self.ack_time + (self.cw_min as f64 / 2.0) * self.slot_time;
        let throughput = (mcs as f64 * channel_width as f64 * (1.0 - p) * self.payload_bits) / busy;
        throughput.max(0.0)
    }

    /// Evaluate one curve over every station count of the sweep.
    pub fn series(&self, stations: &[u32], curve: &ModelCurve) -> ModelSeries {
        let values = stations
            .iter()
            .map(|&n| (n, self.predict(n, curve.mcs, curve.channel_width)))
            .collect();
        ModelSeries {
            label: curve.label.clone(),
            values,
        }
    }
}

/// Predicted throughput keyed by station count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSeries {
    pub label: String,
    values: BTreeMap<u32, f64>,
}

impl ModelSeries {
    /// Value at `stations`, or `0.0` if that count was not part of the sweep.
    pub fn get(&self, stations: u32) -> f64 {
        self.values.get(&stations).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
