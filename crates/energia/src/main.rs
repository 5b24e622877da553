use anyhow::{Context, Result};
use clap::Parser;
use energia_core::{config::AnalysisConfig, pipelines};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Energy expansion potential analysis for the Brazilian states
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let _cli = Cli::parse();

    let config = AnalysisConfig::from_env().context("failed to read configuration")?;
    info!(
        output_dir = %config.output_dir.display(),
        "Iniciando Análise de Potencial Energético do Brasil..."
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    pipelines::run_analysis(&config, &mut out).context("analysis run failed")?;

    Ok(())
}
