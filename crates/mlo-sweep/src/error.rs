use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("no station counts to sweep")]
    NoStations,
    #[error("station count must be at least 1")]
    ZeroStations,
    #[error("station count {0} appears more than once in the sweep")]
    DuplicateStations(u32),
    #[error("user declined removal of existing {}", path.display())]
    OverwriteDeclined { path: PathBuf },
    #[error("failed to launch simulator for {stations} stations")]
    Launch {
        stations: u32,
        #[source]
        source: io::Error,
    },
    #[error("sweep cancelled after {completed} point(s)")]
    Cancelled { completed: usize },
    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl SweepError {
    pub(crate) fn io(context: impl Into<String>) -> impl FnOnce(io::Error) -> Self {
        let context = context.into();
        move |source| SweepError::Io { context, source }
    }
}
