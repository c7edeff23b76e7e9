use crate::aggregate::SeriesAggregator;
use crate::cancel::CancellationToken;
use crate::error::SweepError;
use crate::model::BianchiModel;
use crate::parser::{ParseOutcome, parse_artifact};
use crate::trace::{PointRecord, SweepReport};
use crate::workspace::{Confirm, SweepContext};
use mlo_abstract::{
    ModelCurve, RunConfig, RunStatus, SimulationRunner, SweepScenario, default_model_curves,
    default_stations,
};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// What a non-zero simulator exit means for the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitPolicy {
    /// Log it and let the artifact decide.
    #[default]
    Tolerate,
    /// Treat the point as failed even if the artifact parses.
    Strict,
}

/// Station counts, fixed run parameters and comparison curves of one sweep.
#[derive(Debug, Clone)]
pub struct SweepPlan {
    pub stations: Vec<u32>,
    pub config: RunConfig,
    pub models: [ModelCurve; 2],
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            stations: default_stations(),
            config: RunConfig::default(),
            models: default_model_curves(),
        }
    }
}

impl SweepPlan {
    pub fn apply_scenario(&mut self, scenario: &SweepScenario) {
        scenario.run.apply_to(&mut self.config);
        if let Some(stations) = &scenario.stations {
            self.stations = stations.clone();
        }
        if let Some(models) = &scenario.models {
            self.models = models.clone();
        }
    }

    /// Station counts must be non-empty, positive and unique. Order is kept.
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.stations.is_empty() {
            return Err(SweepError::NoStations);
        }
        let mut seen = HashSet::new();
        for &n in &self.stations {
            if n == 0 {
                return Err(SweepError::ZeroStations);
            }
            if !seen.insert(n) {
                return Err(SweepError::DuplicateStations(n));
            }
        }
        Ok(())
    }
}

/// Runs a sweep point by point: launch, wait, parse, archive, record.
pub struct SweepDriver<'a> {
    context: &'a SweepContext,
    runner: &'a dyn SimulationRunner,
    model: BianchiModel,
    exit_policy: ExitPolicy,
    cancel: CancellationToken,
}

impl<'a> SweepDriver<'a> {
    pub fn new(context: &'a SweepContext, runner: &'a dyn SimulationRunner) -> Self {
        Self {
            context,
            runner,
            model: BianchiModel::default(),
            exit_policy: ExitPolicy::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn model(mut self, model: BianchiModel) -> Self {
        self.model = model;
        self
    }

    pub fn exit_policy(mut self, policy: ExitPolicy) -> Self {
        self.exit_policy = policy;
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn run(
        &self,
        plan: &SweepPlan,
        confirm: &mut dyn Confirm,
    ) -> Result<SweepReport, SweepError> {
        plan.validate()?;

        let [curve1, curve2] = &plan.models;
        let model1 = self.model.series(&plan.stations, curve1);
        let model2 = self.model.series(&plan.stations, curve2);

        self.context.clear_stale_artifact(confirm)?;

        let mut aggregator = SeriesAggregator::new(&model1.label, &model2.label);
        let mut points = Vec::with_capacity(plan.stations.len());

        for &stations in &plan.stations {
            if self.cancel.is_cancelled() {
                return Err(SweepError::Cancelled {
                    completed: points.len(),
                });
            }

            self.cancel.mark_started();
            info!("Running: {}", self.runner.describe(&plan.config, stations));
            let status = self
                .runner
                .run(self.context.simulator_root(), &plan.config, stations)
                .map_err(|source| SweepError::Launch { stations, source })?;

            let outcome = self.judge(status, parse_artifact(&self.context.artifact_path()));
            match &outcome {
                ParseOutcome::Parsed { sample } => debug!(
                    "{stations} stations: link1 {} link2 {} total {} Mbps",
                    sample.link1, sample.link2, sample.total
                ),
                ParseOutcome::Failed { diagnostic } => {
                    warn!("Error parsing throughput for {stations} stations: {diagnostic}")
                }
            }

            let archived = self.context.archive_artifact(stations)?;

            let (m1, m2) = (model1.get(stations), model2.get(stations));
            aggregator.record(stations, &outcome, m1, m2);
            points.push(PointRecord {
                stations,
                status,
                outcome,
                archived,
                model1: m1,
                model2: m2,
            });
        }

        info!(
            "Sweep finished: {} point(s) in {}",
            points.len(),
            self.context.results_dir().display()
        );

        Ok(SweepReport {
            config: plan.config.clone(),
            model: self.model,
            exit_policy: self.exit_policy,
            points,
            series: aggregator.finish(),
        })
    }

    fn judge(&self, status: RunStatus, outcome: ParseOutcome) -> ParseOutcome {
        if status.is_success() {
            return outcome;
        }
        let exit = match status.code {
            Some(code) => format!("exit code {code}"),
            None => "a signal".to_string(),
        };
        match self.exit_policy {
            ExitPolicy::Tolerate => {
                warn!("simulator terminated with {exit}; using its artifact anyway");
                outcome
            }
            ExitPolicy::Strict => ParseOutcome::Failed {
                diagnostic: format!("simulator terminated with {exit}"),
            },
        }
    }
}
