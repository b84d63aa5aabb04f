use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fabrix_config::RegistryDef;
use fabrix_probe::{ProbeSettings, build_steps};
use fabrix_workflow::{RunStatus, WorkflowRunner};

/// Fabrix - infrastructure verification workflow runner
#[derive(Parser)]
#[command(name = "fabrix")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the endpoint registry file (JSON)
  #[arg(long, default_value = "registry.json")]
  registry: PathBuf,

  /// Per-request timeout for endpoint probes, in seconds
  #[arg(long, default_value_t = 30)]
  timeout_secs: u64,

  /// Exit non-zero when the run ends in Failed. By default the exit code
  /// is always 0 and the outcome is carried solely by the report's
  /// status field, which matches what report consumers expect.
  #[arg(long)]
  strict_exit: bool,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  // Logs go to stderr; stdout carries exactly one JSON report per run.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
    .with_writer(std::io::stderr)
    .init();

  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
  let content = tokio::fs::read_to_string(&cli.registry)
    .await
    .with_context(|| format!("failed to read registry file: {}", cli.registry.display()))?;
  let registry = RegistryDef::from_json(&content)
    .with_context(|| format!("failed to parse registry file: {}", cli.registry.display()))?;

  let settings = ProbeSettings {
    timeout: Duration::from_secs(cli.timeout_secs),
  };
  let steps =
    build_steps(&registry, &settings).context("failed to build verification steps")?;

  info!(steps = steps.len(), "starting verification run");

  let report = WorkflowRunner::new(steps).run().await;
  let failed = report.status == RunStatus::Failed;

  println!("{}", report.render_lossy());

  if cli.strict_exit && failed {
    std::process::exit(1);
  }

  Ok(())
}
