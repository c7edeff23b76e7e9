use crate::config::RunConfig;
use serde::Serialize;
use std::io;
use std::path::Path;

/// How the external simulator process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunStatus {
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl RunStatus {
    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Something that can produce a result artifact for one sweep point.
///
/// Implementations block until the run has finished. The returned error is
/// reserved for failing to start the run at all; a run that starts and then
/// fails is reported through [`RunStatus`].
pub trait SimulationRunner {
    /// Run one point with `root` as the working directory.
    fn run(&self, root: &Path, config: &RunConfig, stations: u32) -> io::Result<RunStatus>;

    /// Human-readable form of the invocation, used for logging.
    fn describe(&self, _config: &RunConfig, stations: u32) -> String {
        format!("simulation with {stations} stations")
    }
}
