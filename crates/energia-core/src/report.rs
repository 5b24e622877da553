// crates/energia-core/src/report.rs

use chrono::NaiveDateTime;
use polars::prelude::DataFrame;
use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::ranking::{sort_by_score, TOP_N};
use crate::types::{scored_records, ScoredRecord};

const WIDE_RULE: usize = 80;
const NARROW_RULE: usize = 60;

/// Country-wide totals printed after the ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total_deficit_mw: f64,
    pub total_installation_potential_mw: f64,
    pub top_state: String,
    pub top_score: f64,
    pub min_deficit_state: String,
    pub min_deficit_mw: f64,
}

impl ReportSummary {
    /// Expects `ranked` sorted by score, highest first.
    pub fn from_ranked(ranked: &[ScoredRecord]) -> Option<Self> {
        let top = ranked.first()?;
        let min_deficit = ranked.iter().fold(top, |lowest, record| {
            if record.deficit_mw < lowest.deficit_mw {
                record
            } else {
                lowest
            }
        });

        Some(Self {
            total_deficit_mw: ranked.iter().map(|r| r.deficit_mw).sum(),
            total_installation_potential_mw: ranked
                .iter()
                .map(|r| r.installation_potential_mw)
                .sum(),
            top_state: top.code.clone(),
            top_score: top.potential_score,
            min_deficit_state: min_deficit.code.clone(),
            min_deficit_mw: min_deficit.deficit_mw,
        })
    }
}

#[derive(Debug, Clone)]
pub struct TextReport {
    pub top: Vec<ScoredRecord>,
    pub summary: ReportSummary,
}

impl TextReport {
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let ranked = scored_records(&sort_by_score(df)?)?;
        let summary = ReportSummary::from_ranked(&ranked).ok_or(AnalysisError::EmptyTable)?;
        let top = ranked.into_iter().take(TOP_N).collect();
        Ok(Self { top, summary })
    }

    pub fn render(&self, generated_at: NaiveDateTime) -> String {
        let wide = "=".repeat(WIDE_RULE);
        let summary = &self.summary;

        let mut lines = vec![
            wide.clone(),
            "ANÁLISE DE POTENCIAL ENERGÉTICO POR ESTADO - BRASIL".to_string(),
            wide.clone(),
            format!("Data da análise: {}", generated_at.format("%d/%m/%Y %H:%M")),
            String::new(),
            format!("TOP {TOP_N} ESTADOS COM MAIOR POTENCIAL DE EXPANSÃO:"),
            "-".repeat(NARROW_RULE),
        ];

        lines.extend(self.top.iter().map(ranking_line));

        lines.extend([
            String::new(),
            wide,
            "RESUMO GERAL:".to_string(),
            format!(
                "• Total de déficit nacional: {} MW",
                format_thousands(summary.total_deficit_mw)
            ),
            format!(
                "• Potencial total de instalação: {} MW",
                format_thousands(summary.total_installation_potential_mw)
            ),
            format!(
                "• Estado com maior potencial: {} ({:.1} pontos)",
                summary.top_state, summary.top_score
            ),
            format!(
                "• Estado com menor déficit: {} ({:.0} MW)",
                summary.min_deficit_state, summary.min_deficit_mw
            ),
        ]);

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// One line of the ranking, e.g. `SP - Score: 100.0 | Potencial:  10000 MW | ...`.
pub fn ranking_line(record: &ScoredRecord) -> String {
    format!(
        "{:<2} - Score: {:5.1} | Potencial: {:6.0} MW | Déficit: {:6.0} MW | Pop: {:4.1}M | PIB/capita: R$ {}",
        record.code,
        record.potential_score,
        record.installation_potential_mw,
        record.deficit_mw,
        record.population_millions,
        format_thousands(record.gdp_per_capita),
    )
}

/// Rounds to an integer and groups thousands with commas: `-27977.99` -> `-27,978`.
pub fn format_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0" after rounding a tiny negative prints as "0".
    if grouped == "0" {
        return grouped;
    }
    format!("{sign}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::format_thousands;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_thousands(59_237.47), "59,237");
        assert_eq!(format_thousands(-27_977.99), "-27,978");
        assert_eq!(format_thousands(1_234_567.0), "1,234,567");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(-0.2), "0");
    }
}
