use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use energia_core::config::AnalysisConfig;
use energia_core::pipelines;
use plotters::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Energia environment tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the runtime prerequisites for an analysis run are present
    Doctor,
    /// Check the prerequisites, then run the full analysis
    Run,
}

const OUTPUT_DIR_REMEDY: &str = "defina ENERGIA_OUTPUT_DIR com um diretório gravável";
const FONTS_REMEDY: &str =
    "instale uma fonte sans-serif (por exemplo fonts-dejavu-core) e o fontconfig";

/// Outcome of one prerequisite check.
struct Check {
    name: &'static str,
    problem: Option<String>,
    remedy: &'static str,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = AnalysisConfig::from_env().context("failed to read configuration")?;

    match cli.command {
        Command::Doctor => handle_doctor(&config),
        Command::Run => handle_run(&config),
    }
}

fn handle_doctor(config: &AnalysisConfig) -> Result<()> {
    println!("VERIFICAÇÃO DO AMBIENTE - ANÁLISE ENERGÉTICA BRASIL");
    println!("{}", "=".repeat(60));

    let checks = [check_output_dir(&config.output_dir), check_fonts()];
    let mut failures = 0;

    for check in &checks {
        match &check.problem {
            None => println!("  ✓ {}", check.name),
            Some(problem) => {
                failures += 1;
                println!("  ✗ {}: {}", check.name, problem);
                println!("    Solução: {}", check.remedy);
                warn!(check = check.name, problem = %problem, "Prerequisite check failed");
            }
        }
    }

    if failures > 0 {
        bail!("{failures} verificação(ões) de pré-requisitos falharam");
    }

    info!("All prerequisite checks passed");
    Ok(())
}

fn handle_run(config: &AnalysisConfig) -> Result<()> {
    handle_doctor(config)?;
    println!();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outputs = pipelines::run_analysis(config, &mut out).context("analysis run failed")?;

    println!();
    println!("{}", "=".repeat(60));
    println!("ANÁLISE CONCLUÍDA COM SUCESSO!");
    println!("{}", "=".repeat(60));
    println!("Arquivos gerados:");
    println!("• {} (gráficos)", outputs.summary.chart_path.display());
    println!("• {} (dados)", outputs.summary.workbook_path.display());

    Ok(())
}

fn check_output_dir(dir: &Path) -> Check {
    let probe = dir.join(".energia-write-probe");
    let problem = fs::create_dir_all(dir)
        .and_then(|_| fs::write(&probe, b"probe"))
        .and_then(|_| fs::remove_file(&probe))
        .err()
        .map(|err| format!("{} não é gravável ({err})", dir.display()));

    Check {
        name: "Diretório de saída gravável",
        problem,
        remedy: OUTPUT_DIR_REMEDY,
    }
}

/// Chart text goes through the system font stack; draw a caption into memory to prove
/// a sans-serif face resolves.
fn check_fonts() -> Check {
    let (width, height) = (200u32, 60u32);
    let mut buffer = vec![0u8; (width * height * 3) as usize];

    let problem = {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE)
            .and_then(|_| {
                root.draw(&Text::new(
                    "Energia",
                    (10, 20),
                    ("sans-serif", 20).into_font(),
                ))
            })
            .and_then(|_| root.present())
            .err()
            .map(|err| err.to_string())
    };

    Check {
        name: "Fontes do sistema para os gráficos",
        problem,
        remedy: FONTS_REMEDY,
    }
}
