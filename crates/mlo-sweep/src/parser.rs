//! Reads throughput back from a simulator result artifact.
//!
//! The artifact is appended to across a run, so only its last line matters.
//! That line is a comma-separated record whose fields 3, 4 and 5 hold link 1,
//! link 2 and total throughput in Mbps.

use mlo_abstract::ThroughputSample;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

const LINK1_FIELD: usize = 3;
const LINK2_FIELD: usize = 4;
const TOTAL_FIELD: usize = 5;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read artifact: {0}")]
    Io(#[from] io::Error),
    #[error("artifact has no final line")]
    Empty,
    #[error("field {index} missing, last line has only {found} fields")]
    MissingField { index: usize, found: usize },
    #[error("field {index} is not a number: {value:?}")]
    InvalidNumber { index: usize, value: String },
    #[error("field {index} is not finite: {value:?}")]
    NonFinite { index: usize, value: String },
}

/// Result of reading one artifact, keeping failures distinguishable from zeros.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParseOutcome {
    Parsed { sample: ThroughputSample },
    Failed { diagnostic: String },
}

impl ParseOutcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed { .. })
    }

    pub fn sample(&self) -> Option<ThroughputSample> {
        match self {
            ParseOutcome::Parsed { sample } => Some(*sample),
            ParseOutcome::Failed { .. } => None,
        }
    }

    pub fn sample_or_sentinel(&self) -> ThroughputSample {
        self.sample().unwrap_or(ThroughputSample::SENTINEL)
    }
}

impl From<Result<ThroughputSample, ParseError>> for ParseOutcome {
    fn from(result: Result<ThroughputSample, ParseError>) -> Self {
        match result {
            Ok(sample) => ParseOutcome::Parsed { sample },
            Err(err) => ParseOutcome::Failed {
                diagnostic: err.to_string(),
            },
        }
    }
}

/// Parse the final record of an artifact's text.
pub fn parse_last_line(content: &str) -> Result<ThroughputSample, ParseError> {
    let line = content.lines().last().map(str::trim).unwrap_or("");
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let fields: Vec<&str> = line.split(',').collect();
    let field = |index: usize| -> Result<f64, ParseError> {
        let raw = fields.get(index).ok_or(ParseError::MissingField {
            index,
            found: fields.len(),
        })?;
        let raw = raw.trim();
        let value: f64 = raw.parse().map_err(|_| ParseError::InvalidNumber {
            index,
            value: raw.to_string(),
        })?;
        if !value.is_finite() {
            return Err(ParseError::NonFinite {
                index,
                value: raw.to_string(),
            });
        }
        Ok(value)
    };

    Ok(ThroughputSample::new(
        field(LINK1_FIELD)?,
        field(LINK2_FIELD)?,
        field(TOTAL_FIELD)?,
    ))
}

/// Read and parse an artifact, reporting failure as a tagged outcome.
pub fn parse_artifact(path: &Path) -> ParseOutcome {
    fs::read_to_string(path)
        .map_err(ParseError::from)
        .and_then(|content| parse_last_line(&content))
        .into()
}

/// Tolerant form: any failure is logged and replaced by the sentinel sample.
pub fn parse_throughput(path: &Path) -> ThroughputSample {
    match parse_artifact(path) {
        ParseOutcome::Parsed { sample } => sample,
        ParseOutcome::Failed { diagnostic } => {
            warn!(
                "Error parsing throughput from {}: {diagnostic}",
                path.display()
            );
            ThroughputSample::SENTINEL
        }
    }
}
