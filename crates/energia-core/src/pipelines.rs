use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    calculator, charts, config::AnalysisConfig, dataset, error::Result, report::TextReport,
    spreadsheet,
};

/// What one run produced, logged once at the end.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub generated_at: String,
    pub state_count: usize,
    pub top_state: String,
    pub top_score: f64,
    pub total_deficit_mw: f64,
    pub total_installation_potential_mw: f64,
    pub chart_path: PathBuf,
    pub workbook_path: PathBuf,
}

#[derive(Debug)]
pub struct AnalysisOutputs {
    pub scored: DataFrame,
    pub report: TextReport,
    pub summary: PipelineSummary,
}

/// Loads the fixed dataset and runs the scoring passes over it.
pub fn score_states() -> Result<DataFrame> {
    info!("1. Carregando dados dos estados...");
    let base = dataset::load_dataset()?;

    info!(states = base.height(), "2. Calculando índices de potencial...");
    Ok(calculator::compute_scores(&base)?)
}

/// Runs every stage in order: load, score, report to `out`, chart, workbook.
/// The first failing stage aborts the run.
pub fn run_analysis<W: Write>(config: &AnalysisConfig, out: &mut W) -> Result<AnalysisOutputs> {
    let started = Local::now();

    let scored = score_states()?;

    info!("3. Gerando relatório...");
    let report = TextReport::from_frame(&scored)?;
    out.write_all(report.render(started.naive_local()).as_bytes())?;
    out.flush()?;

    info!("4. Criando visualizações...");
    let chart_path = config.chart_path();
    charts::render_charts(&scored, &chart_path, config.chart_size)?;
    if config.show_chart {
        // Display failures do not abort the run.
        if let Err(err) = charts::open_in_viewer(&chart_path) {
            warn!(error = %err, "Continuing without displaying the chart");
        }
    }

    info!("5. Salvando resultados...");
    let workbook_path = config.workbook_path();
    spreadsheet::export_workbook(&scored, &workbook_path)?;
    writeln!(out, "Resultados salvos em: {}", workbook_path.display())?;

    let summary = PipelineSummary {
        generated_at: started.to_rfc3339(),
        state_count: scored.height(),
        top_state: report.summary.top_state.clone(),
        top_score: report.summary.top_score,
        total_deficit_mw: report.summary.total_deficit_mw,
        total_installation_potential_mw: report.summary.total_installation_potential_mw,
        chart_path,
        workbook_path,
    };
    info!(summary = %serde_json::to_string(&summary)?, "Análise concluída com sucesso!");

    Ok(AnalysisOutputs {
        scored,
        report,
        summary,
    })
}
