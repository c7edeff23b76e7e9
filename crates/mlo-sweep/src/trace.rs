use crate::aggregate::AggregatedSeries;
use crate::engine::ExitPolicy;
use crate::error::SweepError;
use crate::model::BianchiModel;
use crate::parser::ParseOutcome;
use mlo_abstract::{RunConfig, RunStatus};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// What happened at one sweep point.
#[derive(Debug, Clone, Serialize)]
pub struct PointRecord {
    pub stations: u32,
    pub status: RunStatus,
    pub outcome: ParseOutcome,
    /// Where the artifact was archived, if the run produced one.
    pub archived: Option<PathBuf>,
    pub model1: f64,
    pub model2: f64,
}

/// Full account of a finished sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub config: RunConfig,
    pub model: BianchiModel,
    pub exit_policy: ExitPolicy,
    pub points: Vec<PointRecord>,
    pub series: AggregatedSeries,
}

impl SweepReport {
    pub fn failed_points(&self) -> usize {
        self.points.iter().filter(|p| !p.outcome.is_parsed()).count()
    }

    pub fn write_json(&self, path: &Path) -> Result<(), SweepError> {
        let data = serde_json::to_vec_pretty(self).map_err(|err| SweepError::Io {
            context: "failed to serialize sweep report".to_string(),
            source: err.into(),
        })?;
        fs::write(path, data).map_err(SweepError::io(format!(
            "failed to write report {}",
            path.display()
        )))
    }
}
