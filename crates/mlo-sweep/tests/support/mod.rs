#![allow(dead_code)]

use mlo_abstract::{RunConfig, RunStatus, SimulationRunner};
use mlo_sweep::{CancellationToken, ResultsDir, SweepContext};
use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use tempfile::TempDir;

/// Stand-in for the external simulator: appends a fixed record to the
/// artifact, the way the real program appends one line per run.
pub struct StubSimulator {
    pub line: String,
    pub exit_code: i32,
    /// Station counts for which no artifact is written.
    pub silent_for: Vec<u32>,
    /// Token cancelled once the first run completes.
    pub cancel_after_first: Option<CancellationToken>,
    pub calls: RefCell<Vec<u32>>,
}

impl StubSimulator {
    pub fn new(line: &str) -> Self {
        Self {
            line: line.to_string(),
            exit_code: 0,
            silent_for: Vec::new(),
            cancel_after_first: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<u32> {
        self.calls.borrow().clone()
    }
}

impl SimulationRunner for StubSimulator {
    fn run(&self, root: &Path, _config: &RunConfig, stations: u32) -> io::Result<RunStatus> {
        self.calls.borrow_mut().push(stations);
        if !self.silent_for.contains(&stations) {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(root.join("wifi-mld.dat"))?;
            writeln!(file, "# log for {stations} stations")?;
            writeln!(file, "{}", self.line)?;
        }
        if let Some(token) = &self.cancel_after_first {
            token.cancel();
        }
        Ok(RunStatus::exited(self.exit_code))
    }
}

/// Scratch simulator root and results root, cleaned up on drop.
pub struct Scratch {
    pub sim: TempDir,
    pub results: TempDir,
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            sim: tempfile::tempdir().unwrap(),
            results: tempfile::tempdir().unwrap(),
        }
    }

    pub fn context(&self) -> SweepContext {
        let results = ResultsDir::create(self.results.path(), "test").unwrap();
        SweepContext::new(self.sim.path(), results)
    }
}

pub fn bianchi(n: u32, mcs: f64, width: f64) -> f64 {
    let tau = 2.0 / 16.0;
    let p = 1.0 - (1.0f64 - tau).powf(n.saturating_sub(1) as f64);
    let value = (mcs * width * (1.0 - p) * 12000.0) / (16e-6 + 44e-6 + 7.5 * 9e-6);
    value.max(0.0)
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}
