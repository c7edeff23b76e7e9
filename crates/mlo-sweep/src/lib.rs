//! Core of the MLO throughput sweep: the analytical model, the artifact
//! parser, the sweep driver and the series it aggregates.

pub mod aggregate;
pub mod cancel;
pub mod chart;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod trace;
pub mod workspace;

pub use aggregate::{AggregatedSeries, Series, SeriesAggregator};
pub use cancel::CancellationToken;
pub use chart::{ChartRenderer, CsvRenderer, RenderError};
#[cfg(feature = "plot")]
pub use chart::PlotRenderer;
pub use engine::{ExitPolicy, SweepDriver, SweepPlan};
pub use error::SweepError;
pub use model::{BianchiModel, ModelSeries};
pub use parser::{ParseError, ParseOutcome, parse_artifact, parse_throughput};
pub use trace::{PointRecord, SweepReport};
pub use workspace::{Answer, Confirm, ResultsDir, StdinConfirm, SweepContext};
