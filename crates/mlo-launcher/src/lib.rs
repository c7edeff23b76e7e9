//! Launches the external network simulator for one sweep point.

use mlo_abstract::{RunConfig, RunStatus, SimulationRunner};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_ENTRY_POINT: &str = "ns3";
pub const DEFAULT_PROGRAM: &str = "single-bss-mld";

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(
        "simulator entry point {} not found under {}; run from within the correct directory",
        entry.display(),
        root.display()
    )]
    SimulatorNotFound { root: PathBuf, entry: PathBuf },
    #[error("failed to resolve simulator root {}", root.display())]
    Resolve {
        root: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Runs `<root>/ns3 run '<program> --flag=value ...'` and waits for it.
#[derive(Debug, Clone)]
pub struct Ns3Launcher {
    entry_point: PathBuf,
    program: String,
}

impl Default for Ns3Launcher {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Ns3Launcher {
    pub fn builder() -> LauncherBuilder {
        LauncherBuilder::new()
    }

    pub fn entry_point(&self) -> &Path {
        &self.entry_point
    }

    /// Check that `root` holds the entry point and return its canonical form.
    pub fn locate(&self, root: &Path) -> Result<PathBuf, LaunchError> {
        if !root.join(&self.entry_point).exists() {
            return Err(LaunchError::SimulatorNotFound {
                root: root.to_path_buf(),
                entry: self.entry_point.clone(),
            });
        }
        root.canonicalize().map_err(|source| LaunchError::Resolve {
            root: root.to_path_buf(),
            source,
        })
    }

    /// The single argument handed to `ns3 run`: program name plus its flags.
    pub fn program_args(&self, config: &RunConfig, stations: u32) -> String {
        format!(
            "{} --rngRun={} --payloadSize={} --mcs={} --mcs2={} --channelWidth={} \
             --channelWidth2={} --nMldSta={} --mldPerNodeLambda={}",
            self.program,
            config.rng_run,
            config.payload_size,
            config.mcs1,
            config.mcs2,
            config.channel_width1,
            config.channel_width2,
            stations,
            config.per_node_lambda,
        )
    }

    pub fn command(&self, root: &Path, config: &RunConfig, stations: u32) -> Command {
        let mut cmd = Command::new(root.join(&self.entry_point));
        cmd.arg("run")
            .arg(self.program_args(config, stations))
            .current_dir(root);
        cmd
    }
}

impl SimulationRunner for Ns3Launcher {
    fn run(&self, root: &Path, config: &RunConfig, stations: u32) -> io::Result<RunStatus> {
        let status = self.command(root, config, stations).status()?;
        debug!("simulator exited with {status}");
        Ok(RunStatus {
            code: status.code(),
        })
    }

    fn describe(&self, config: &RunConfig, stations: u32) -> String {
        format!(
            "./{} run '{}'",
            self.entry_point.display(),
            self.program_args(config, stations)
        )
    }
}

/// Builder for [`Ns3Launcher`]. Defaults to `ns3` running `single-bss-mld`.
pub struct LauncherBuilder {
    entry_point: PathBuf,
    program: String,
}

impl Default for LauncherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LauncherBuilder {
    pub fn new() -> Self {
        Self {
            entry_point: PathBuf::from(DEFAULT_ENTRY_POINT),
            program: DEFAULT_PROGRAM.to_string(),
        }
    }

    /// Entry point relative to the simulator root.
    pub fn entry_point(mut self, entry_point: impl Into<PathBuf>) -> Self {
        self.entry_point = entry_point.into();
        self
    }

    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn build(self) -> Ns3Launcher {
        Ns3Launcher {
            entry_point: self.entry_point,
            program: self.program,
        }
    }
}
