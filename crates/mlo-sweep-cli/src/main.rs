use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use mlo_abstract::SweepScenario;
use mlo_launcher::{DEFAULT_ENTRY_POINT, DEFAULT_PROGRAM, Ns3Launcher};
use mlo_sweep::{
    Answer, CancellationToken, ChartRenderer, Confirm, CsvRenderer, ExitPolicy, ResultsDir,
    StdinConfirm, SweepContext, SweepDriver, SweepPlan, SweepReport,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Sweep station counts through the ns-3 MLO scenario and compare against the Bianchi model"
)]
struct Args {
    /// Load sweep settings from a TOML scenario.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Directory holding the simulator entry point.
    #[arg(long, default_value = "../../../../")]
    simulator_root: PathBuf,

    /// Directory the timestamped results directory is created in.
    #[arg(long, default_value = "results")]
    results_root: PathBuf,

    /// Station counts to sweep, in order (e.g. 5,10,15).
    #[arg(long, value_delimiter = ',')]
    stations: Option<Vec<u32>>,

    /// Simulator entry point, relative to the simulator root.
    #[arg(long, default_value = DEFAULT_ENTRY_POINT)]
    entry_point: PathBuf,

    #[arg(long, default_value = DEFAULT_PROGRAM)]
    program: String,

    /// Remove a stale result artifact without asking.
    #[arg(short, long, default_value_t = false)]
    yes: bool,

    /// Count a non-zero simulator exit as a failed point.
    #[arg(long, default_value_t = false)]
    strict_exit: bool,

    /// Skip rendering the comparison chart.
    #[arg(long, default_value_t = false)]
    no_chart: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt::init();
    info!("mlo-sweep starting…");

    let plan = args.plan()?;
    let launcher = Ns3Launcher::builder()
        .entry_point(&args.entry_point)
        .program(&args.program)
        .build();
    let root = launcher.locate(&args.simulator_root)?;
    info!("Simulator: {}", root.join(launcher.entry_point()).display());
    let results = ResultsDir::create_timestamped(&args.results_root)?;
    let context = SweepContext::new(root, results);

    let cancel = CancellationToken::new();
    spawn_interrupt_listener(cancel.clone());

    let settings = Settings {
        exit_policy: if args.strict_exit {
            ExitPolicy::Strict
        } else {
            ExitPolicy::Tolerate
        },
        assume_yes: args.yes,
        render: !args.no_chart,
    };

    tokio::task::spawn_blocking(move || run_sweep(&context, &launcher, &plan, settings, cancel))
        .await
        .context("sweep task failed")?
}

impl Args {
    fn plan(&self) -> Result<SweepPlan> {
        let mut plan = SweepPlan::default();
        if let Some(path) = &self.scenario {
            let scenario = load_scenario(path)?;
            info!("Scenario: {}", scenario.name);
            if !scenario.description.is_empty() {
                info!("Description: {}", scenario.description);
            }
            plan.apply_scenario(&scenario);
        }
        if let Some(stations) = &self.stations {
            plan.stations = stations.clone();
        }
        Ok(plan)
    }
}

struct Settings {
    exit_policy: ExitPolicy,
    assume_yes: bool,
    render: bool,
}

/// Ctrl-C before the first run exits at once. During the sweep the first
/// Ctrl-C stops it before its next point and a second one exits at once.
fn spawn_interrupt_listener(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            warn!("could not listen for Ctrl-C");
            return;
        }
        cancel.cancel();
        if !cancel.has_started() {
            warn!("Exiting...");
            std::process::exit(1);
        }
        warn!("Exiting after the current run; press Ctrl-C again to stop now");
        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(1);
        }
    });
}

fn run_sweep(
    context: &SweepContext,
    launcher: &Ns3Launcher,
    plan: &SweepPlan,
    settings: Settings,
    cancel: CancellationToken,
) -> Result<()> {
    let mut confirm: Box<dyn Confirm> = if settings.assume_yes {
        Box::new(Answer("yes".to_string()))
    } else {
        Box::new(StdinConfirm)
    };

    let report = SweepDriver::new(context, launcher)
        .exit_policy(settings.exit_policy)
        .cancellation(cancel)
        .run(plan, confirm.as_mut())?;

    report.write_json(&context.results_dir().join("report.json"))?;
    if settings.render {
        render_charts(&report, context.results_dir())?;
    }
    log_summary(&report, context.results_dir());
    Ok(())
}

fn renderers() -> Vec<Box<dyn ChartRenderer>> {
    #[allow(unused_mut)]
    let mut renderers: Vec<Box<dyn ChartRenderer>> = vec![Box::new(CsvRenderer)];
    #[cfg(feature = "plot")]
    renderers.push(Box::new(mlo_sweep::PlotRenderer::default()));
    renderers
}

fn render_charts(report: &SweepReport, dir: &Path) -> Result<()> {
    for renderer in renderers() {
        let path = renderer
            .render(&report.series, dir)
            .context("Failed to render comparison chart")?;
        info!("Chart written to {}", path.display());
    }
    Ok(())
}

fn log_summary(report: &SweepReport, dir: &Path) {
    info!(
        "Sweep complete: {} point(s) | {} without data | results in {}",
        report.points.len(),
        report.failed_points(),
        dir.display()
    );
}

fn load_scenario(path: &Path) -> Result<SweepScenario> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    let scenario: SweepScenario =
        toml::from_str(&content).context("Failed to parse scenario file")?;
    Ok(scenario)
}
