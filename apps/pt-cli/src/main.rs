mod config;
mod surface;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pt_app::{TabControl, Workflow, WorkflowState};
use pt_client::{FormInput, HttpClient, UploadFile};
use pt_core::units::{to_mpa, to_ms};
use pt_core::{ComparisonMetrics, CurveDataset, ViewKind, compare_curves};

use config::{CliConfig, Composer, CompositionMode};
use surface::{ConsoleFeedback, FileSurface};

#[derive(Parser)]
#[command(name = "pt-cli")]
#[command(about = "ptflow CLI - run pressure simulations and compare them with test data", long_about = None)]
struct Cli {
    /// YAML config file (client, output_dir, composition)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory receiving the chart JSON files
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,
    /// Base URL of the simulation service
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Build comparison charts in-process instead of remotely
    #[arg(long, global = true)]
    local_compose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and write the primary chart
    Run {
        /// Form fields as key=value
        params: Vec<String>,
    },
    /// Upload a test data file and refresh the comparison chart
    Upload {
        /// Path to the test data file (.xlsx/.xls)
        file: PathBuf,
    },
    /// Build a comparison chart from saved curve files
    Compare {
        /// Simulation curve JSON ({"time": [...], "pressure": [...]})
        #[arg(long)]
        simulation: Option<PathBuf>,
        /// Test curve JSON
        #[arg(long)]
        test: Option<PathBuf>,
    },
    /// Run, upload and compare in one session; both views start from placeholders
    Session {
        /// Form fields as key=value
        params: Vec<String>,
        /// Test data file to upload after the run
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// View left active at the end
        #[arg(long, value_enum, default_value_t = ViewArg::Comparison)]
        view: ViewArg,
        /// Also save the curves to the output directory
        #[arg(long)]
        save_curves: bool,
    },
    /// Compare two saved curves offline
    Metrics {
        /// Simulation curve JSON
        simulation: PathBuf,
        /// Test curve JSON
        test: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    Primary,
    Comparison,
}

impl From<ViewArg> for ViewKind {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Primary => ViewKind::Primary,
            ViewArg::Comparison => ViewKind::Comparison,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.out_dir {
        config.output_dir = dir;
    }
    if let Some(url) = cli.base_url {
        config.client = config.client.with_base_url(url);
    }
    if cli.local_compose {
        config.composition = CompositionMode::Local;
    }

    match cli.command {
        Commands::Run { params } => cmd_run(&config, &params).await,
        Commands::Upload { file } => cmd_upload(&config, &file).await,
        Commands::Compare { simulation, test } => {
            cmd_compare(&config, simulation.as_deref(), test.as_deref()).await
        }
        Commands::Session {
            params,
            file,
            view,
            save_curves,
        } => cmd_session(&config, &params, file.as_deref(), view.into(), save_curves).await,
        Commands::Metrics { simulation, test } => cmd_metrics(&simulation, &test),
    }
}

fn parse_params(pairs: &[String]) -> anyhow::Result<FormInput> {
    let mut form = FormInput::new();
    for pair in pairs {
        let Some((key, value)) = FormInput::parse_pair(pair) else {
            bail!("expected key=value, got '{pair}'");
        };
        form.insert(key, value);
    }
    Ok(form)
}

fn load_curve(path: &Path) -> anyhow::Result<CurveDataset> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading curve {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing curve {}", path.display()))
}

fn save_curve(dir: &Path, name: &str, curve: &CurveDataset) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{name}.json"));
    fs::write(&path, serde_json::to_string_pretty(curve)?)?;
    println!("  Saved {}", path.display());
    Ok(())
}

type CliWorkflow<'a> =
    Workflow<&'a HttpClient, &'a HttpClient, Composer<'a>, FileSurface, ConsoleFeedback>;

fn open_workflow<'a>(config: &CliConfig, client: &'a HttpClient) -> CliWorkflow<'a> {
    Workflow::new(
        client,
        client,
        Composer::new(config.composition, client),
        FileSurface::new(&config.output_dir),
        ConsoleFeedback,
    )
}

fn print_written(workflow: &CliWorkflow<'_>) {
    for path in workflow.presenter().surface().written() {
        println!("  Wrote {}", path.display());
    }
}

// Single-action commands draw only the view they produce, so charts left by
// earlier commands stay in place.
async fn cmd_run(config: &CliConfig, params: &[String]) -> anyhow::Result<()> {
    let form = parse_params(params)?;
    let client = HttpClient::new(config.client.clone())?;
    let workflow = open_workflow(config, &client);

    let outcome = workflow.run_simulation(&form).await?;
    if let Some(curve) = &outcome.dataset {
        println!("  Samples: {}", curve.len());
    }
    print_written(&workflow);
    Ok(())
}

async fn cmd_upload(config: &CliConfig, file: &Path) -> anyhow::Result<()> {
    let client = HttpClient::new(config.client.clone())?;
    let workflow = open_workflow(config, &client);

    let upload = UploadFile::from_path(file)
        .with_context(|| format!("reading test file {}", file.display()))?;
    let curve = workflow.import_test_file(Some(&upload)).await?;
    println!("  Samples: {}", curve.len());
    workflow.switch_view(&TabControl::for_view(ViewKind::Comparison));
    print_written(&workflow);
    Ok(())
}

async fn cmd_session(
    config: &CliConfig,
    params: &[String],
    file: Option<&Path>,
    view: ViewKind,
    save_curves: bool,
) -> anyhow::Result<()> {
    let form = parse_params(params)?;
    let client = HttpClient::new(config.client.clone())?;
    let workflow = open_workflow(config, &client);
    workflow.initialize();
    info!(base_url = %client.config().base_url, fields = form.len(), "session started");

    let mut failed = false;
    match workflow.run_simulation(&form).await {
        Ok(outcome) => {
            if let Some(curve) = &outcome.dataset {
                println!("  Samples: {}", curve.len());
            }
        }
        Err(err) => {
            warn!(error = %err, "run failed");
            failed = true;
        }
    }

    if let Some(path) = file {
        let upload = UploadFile::from_path(path)
            .with_context(|| format!("reading test file {}", path.display()))?;
        if let Err(err) = workflow.import_test_file(Some(&upload)).await {
            warn!(error = %err, "upload failed");
            failed = true;
        }
    } else if view == ViewKind::Comparison {
        workflow.refresh_comparison().await;
    }

    workflow.switch_view(&TabControl::for_view(view));

    let state = workflow.state();
    if save_curves {
        if let Some(curve) = state.last_simulation_run() {
            save_curve(&config.output_dir, "simulation_curve", curve)?;
        }
        if let Some(curve) = state.last_test_import() {
            save_curve(&config.output_dir, "test_curve", curve)?;
        }
    }
    if let (Some(sim), Some(test)) = (state.last_simulation_run(), state.last_test_import()) {
        match compare_curves(sim, test) {
            Ok(metrics) => print_metrics(&metrics),
            Err(err) => warn!(error = %err, "metrics unavailable"),
        }
    }
    print_written(&workflow);

    if failed {
        bail!("session finished with errors");
    }
    Ok(())
}

async fn cmd_compare(
    config: &CliConfig,
    simulation: Option<&Path>,
    test: Option<&Path>,
) -> anyhow::Result<()> {
    let resumed = WorkflowState::with_curves(
        simulation.map(load_curve).transpose()?,
        test.map(load_curve).transpose()?,
    );
    let client = HttpClient::new(config.client.clone())?;
    let workflow = open_workflow(config, &client).with_state(resumed);

    let outcome = workflow.refresh_comparison().await;
    workflow.switch_view(&TabControl::for_view(ViewKind::Comparison));
    println!("✓ Comparison: {outcome:?}");
    print_written(&workflow);
    Ok(())
}

fn cmd_metrics(simulation: &Path, test: &Path) -> anyhow::Result<()> {
    let sim = load_curve(simulation)?;
    let test = load_curve(test)?;
    let metrics = compare_curves(&sim, &test)?;
    print_metrics(&metrics);
    Ok(())
}

fn print_metrics(metrics: &ComparisonMetrics) {
    let (sim_time, sim_pressure) = metrics.simulation_peak();
    let (test_time, test_pressure) = metrics.test_peak();
    let (diff_time, diff_pressure) = metrics.peak_difference();

    println!("\nComparison metrics:");
    println!("  RMSE:        {:.4} MPa", metrics.rmse);
    match metrics.correlation {
        Some(r) => println!("  Correlation: {r:.4}"),
        None => println!("  Correlation: N/A"),
    }
    println!(
        "  Peak (sim):  {:.2} MPa at {:.2} ms",
        to_mpa(sim_pressure),
        to_ms(sim_time)
    );
    println!(
        "  Peak (test): {:.2} MPa at {:.2} ms",
        to_mpa(test_pressure),
        to_ms(test_time)
    );
    println!(
        "  Peak diff:   {:.2} MPa, {:.2} ms ({:.2}%)",
        to_mpa(diff_pressure),
        to_ms(diff_time),
        metrics.peak_pressure_error_percent
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pt_client::ClientConfig;

    #[test]
    fn params_parse_as_ordered_form_fields() {
        let form = parse_params(&["nc_usage_1=1.2".to_string(), "mode=fast".to_string()]).unwrap();
        assert_eq!(form.get("nc_usage_1"), Some("1.2"));
        assert_eq!(form.get("mode"), Some("fast"));
        assert_eq!(form.len(), 2);
    }

    #[test]
    fn params_without_separator_are_rejected() {
        assert!(parse_params(&["oops".to_string()]).is_err());
    }

    #[test]
    fn cli_accepts_session_flags() {
        let cli = Cli::try_parse_from([
            "pt-cli",
            "--local-compose",
            "session",
            "a=1",
            "--file",
            "test.xlsx",
            "--view",
            "primary",
        ])
        .unwrap();
        assert!(cli.local_compose);
        match cli.command {
            Commands::Session { params, file, view, .. } => {
                assert_eq!(params, vec!["a=1".to_string()]);
                assert_eq!(file, Some(PathBuf::from("test.xlsx")));
                assert_eq!(ViewKind::from(view), ViewKind::Primary);
            }
            _ => panic!("expected session"),
        }
    }

    fn local_config(dir: &Path) -> CliConfig {
        // nothing listens on the discard port, so remote calls fail fast
        CliConfig {
            client: ClientConfig::new("http://127.0.0.1:9"),
            output_dir: dir.join("charts"),
            composition: CompositionMode::Local,
        }
    }

    fn write_curve(dir: &Path, name: &str, curve: &CurveDataset) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, serde_json::to_string(curve).unwrap()).unwrap();
        path
    }

    #[tokio::test]
    async fn compare_draws_through_the_workflow_and_keeps_the_primary_chart() {
        let dir = tempfile::tempdir().unwrap();
        let config = local_config(dir.path());
        fs::create_dir_all(&config.output_dir).unwrap();
        let primary = config.output_dir.join("primary.json");
        fs::write(&primary, "{\"from\":\"earlier run\"}").unwrap();

        let sim = CurveDataset::new(vec![0.0, 1.0], vec![0.0, 5.0]).unwrap();
        let test = CurveDataset::new(vec![0.0, 1.0], vec![0.0, 4.0]).unwrap();
        let sim_path = write_curve(dir.path(), "sim.json", &sim);
        let test_path = write_curve(dir.path(), "test.json", &test);

        cmd_compare(&config, Some(&sim_path), Some(&test_path))
            .await
            .unwrap();

        let written: pt_core::ChartDescription = serde_json::from_str(
            &fs::read_to_string(config.output_dir.join("comparison.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(written.trace_count(), 2);
        assert_eq!(
            fs::read_to_string(&primary).unwrap(),
            "{\"from\":\"earlier run\"}"
        );
    }

    #[tokio::test]
    async fn compare_without_curves_writes_the_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let config = local_config(dir.path());

        cmd_compare(&config, None, None).await.unwrap();

        let written: pt_core::ChartDescription = serde_json::from_str(
            &fs::read_to_string(config.output_dir.join("comparison.json")).unwrap(),
        )
        .unwrap();
        assert!(written.is_placeholder());
        assert_eq!(
            written.placeholder_prompt(),
            Some(pt_core::chart::COMPARISON_PROMPT)
        );
        assert!(!config.output_dir.join("primary.json").exists());
    }

    #[tokio::test]
    async fn failed_upload_leaves_earlier_charts_alone() {
        let dir = tempfile::tempdir().unwrap();
        let config = local_config(dir.path());
        fs::create_dir_all(&config.output_dir).unwrap();
        let primary = config.output_dir.join("primary.json");
        fs::write(&primary, "{}").unwrap();
        let file = dir.path().join("test.xlsx");
        fs::write(&file, b"not really a workbook").unwrap();

        assert!(cmd_upload(&config, &file).await.is_err());

        assert_eq!(fs::read_to_string(&primary).unwrap(), "{}");
        assert!(!config.output_dir.join("comparison.json").exists());
    }
}
