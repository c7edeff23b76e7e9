//! Filesystem side of a sweep: where the simulator lives, where results go,
//! and the lifecycle of the result artifact between runs.

use crate::error::SweepError;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File the simulator appends its results to, relative to its root.
pub const ARTIFACT_NAME: &str = "wifi-mld.dat";
pub const RESULTS_PREFIX: &str = "11be-mlo";

/// Name an artifact is archived under for a given station count.
pub fn archive_name(stations: u32) -> String {
    format!("wifi-mld-nSta{stations}.dat")
}

/// Results directory of one sweep. Removed again on drop if nothing was
/// written into it.
#[derive(Debug)]
pub struct ResultsDir {
    path: PathBuf,
}

impl ResultsDir {
    /// Create `<root>/<prefix>-<stamp>`. Succeeds if it already exists.
    pub fn create(root: &Path, stamp: &str) -> Result<Self, SweepError> {
        let path = root.join(format!("{RESULTS_PREFIX}-{stamp}"));
        fs::create_dir_all(&path).map_err(SweepError::io(format!(
            "failed to create results directory {}",
            path.display()
        )))?;
        debug!("results directory {}", path.display());
        Ok(Self { path })
    }

    /// Create a results directory stamped with the local time.
    pub fn create_timestamped(root: &Path) -> Result<Self, SweepError> {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
        Self::create(root, &stamp)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_empty(&self) -> io::Result<bool> {
        Ok(fs::read_dir(&self.path)?.next().is_none())
    }
}

impl Drop for ResultsDir {
    fn drop(&mut self) {
        if let Ok(true) = self.is_empty() {
            if let Err(err) = fs::remove_dir(&self.path) {
                warn!("could not remove empty {}: {err}", self.path.display());
            }
        }
    }
}

/// Asks the operator a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

/// Only an explicit "yes" counts, case and surrounding whitespace aside.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// Prompts on stdout and reads one line from stdin.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(is_affirmative(&line))
    }
}

/// Answers every question with the same canned reply.
pub struct Answer(pub String);

impl Confirm for Answer {
    fn confirm(&mut self, _prompt: &str) -> io::Result<bool> {
        Ok(is_affirmative(&self.0))
    }
}

/// Everything a sweep needs to touch on disk.
#[derive(Debug)]
pub struct SweepContext {
    simulator_root: PathBuf,
    results: ResultsDir,
}

impl SweepContext {
    pub fn new(simulator_root: impl Into<PathBuf>, results: ResultsDir) -> Self {
        Self {
            simulator_root: simulator_root.into(),
            results,
        }
    }

    pub fn simulator_root(&self) -> &Path {
        &self.simulator_root
    }

    pub fn results_dir(&self) -> &Path {
        self.results.path()
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.simulator_root.join(ARTIFACT_NAME)
    }

    /// Remove an artifact left over from an earlier run, if the operator agrees.
    pub fn clear_stale_artifact(&self, confirm: &mut dyn Confirm) -> Result<(), SweepError> {
        let path = self.artifact_path();
        if !path.exists() {
            return Ok(());
        }

        let prompt = format!("Remove existing file {ARTIFACT_NAME}? [Yes/No]: ");
        let agreed = confirm
            .confirm(&prompt)
            .map_err(SweepError::io("failed to read confirmation"))?;
        if !agreed {
            return Err(SweepError::OverwriteDeclined { path });
        }

        fs::remove_file(&path)
            .map_err(SweepError::io(format!("failed to remove {}", path.display())))?;
        info!("Removed {}", path.display());
        Ok(())
    }

    /// Move the current artifact into the results directory under its
    /// per-point name. Returns `None` if the simulator produced no artifact.
    pub fn archive_artifact(&self, stations: u32) -> Result<Option<PathBuf>, SweepError> {
        let src = self.artifact_path();
        if !src.exists() {
            debug!("no artifact to archive for {stations} stations");
            return Ok(None);
        }

        let dst = self.results_dir().join(archive_name(stations));
        if dst.exists() {
            fs::remove_file(&dst)
                .map_err(SweepError::io(format!("failed to replace {}", dst.display())))?;
        }
        move_file(&src, &dst)
            .map_err(SweepError::io(format!("failed to archive {}", src.display())))?;
        debug!("archived {} -> {}", src.display(), dst.display());
        Ok(Some(dst))
    }
}

/// Rename, falling back to copy + remove across filesystems.
fn move_file(src: &Path, dst: &Path) -> io::Result<()> {
    if fs::rename(src, dst).is_ok() {
        return Ok(());
    }
    fs::copy(src, dst)?;
    fs::remove_file(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(sim: &Path, results: &Path) -> SweepContext {
        SweepContext::new(sim, ResultsDir::create(results, "test").unwrap())
    }

    #[test]
    fn affirmative_answers() {
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("  YES\n"));
        assert!(!is_affirmative("y"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative(""));
    }

    #[test]
    fn results_dir_is_named_after_prefix_and_stamp() {
        let root = tempfile::tempdir().unwrap();
        let dir = ResultsDir::create(root.path(), "20240101-120000").unwrap();
        assert_eq!(dir.path(), root.path().join("11be-mlo-20240101-120000"));
        assert!(dir.path().is_dir());
    }

    #[test]
    fn empty_results_dir_is_removed_on_drop() {
        let root = tempfile::tempdir().unwrap();
        let dir = ResultsDir::create(root.path(), "a").unwrap();
        let path = dir.path().to_path_buf();
        drop(dir);
        assert!(!path.exists());

        let dir = ResultsDir::create(root.path(), "b").unwrap();
        let path = dir.path().to_path_buf();
        fs::write(path.join("keep.txt"), "x").unwrap();
        drop(dir);
        assert!(path.join("keep.txt").exists());
    }

    #[test]
    fn declined_prompt_keeps_stale_artifact() {
        let sim = tempfile::tempdir().unwrap();
        let results = tempfile::tempdir().unwrap();
        let ctx = context(sim.path(), results.path());
        fs::write(ctx.artifact_path(), "old").unwrap();

        let err = ctx
            .clear_stale_artifact(&mut Answer("nope".into()))
            .unwrap_err();
        assert!(matches!(err, SweepError::OverwriteDeclined { .. }));
        assert!(ctx.artifact_path().exists());

        ctx.clear_stale_artifact(&mut Answer("Yes".into())).unwrap();
        assert!(!ctx.artifact_path().exists());
    }

    #[test]
    fn no_prompt_without_stale_artifact() {
        struct Panics;
        impl Confirm for Panics {
            fn confirm(&mut self, _: &str) -> io::Result<bool> {
                panic!("should not be asked")
            }
        }

        let sim = tempfile::tempdir().unwrap();
        let results = tempfile::tempdir().unwrap();
        let ctx = context(sim.path(), results.path());
        ctx.clear_stale_artifact(&mut Panics).unwrap();
    }

    #[test]
    fn archive_moves_and_replaces() {
        let sim = tempfile::tempdir().unwrap();
        let results = tempfile::tempdir().unwrap();
        let ctx = context(sim.path(), results.path());

        assert_eq!(ctx.archive_artifact(5).unwrap(), None);

        fs::write(ctx.results_dir().join("wifi-mld-nSta5.dat"), "older").unwrap();
        fs::write(ctx.artifact_path(), "fresh").unwrap();
        let dst = ctx.archive_artifact(5).unwrap().unwrap();

        assert_eq!(dst, ctx.results_dir().join("wifi-mld-nSta5.dat"));
        assert_eq!(fs::read_to_string(&dst).unwrap(), "fresh");
        assert!(!ctx.artifact_path().exists());
    }
}
