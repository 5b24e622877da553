// crates/energia-core/src/config.rs

use std::env;
use std::path::PathBuf;

use crate::error::{AnalysisError, Result};

pub const CHART_FILE_NAME: &str = "analise_potencial_energetico.png";
pub const WORKBOOK_FILE_NAME: &str = "resultados_analise_energetica.xlsx";

pub const OUTPUT_DIR_VAR: &str = "ENERGIA_OUTPUT_DIR";
pub const SHOW_CHART_VAR: &str = "ENERGIA_SHOW_CHART";
pub const CHART_SIZE_VAR: &str = "ENERGIA_CHART_SIZE";

pub const DEFAULT_CHART_SIZE: (u32, u32) = (1600, 1200);

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub output_dir: PathBuf,
    pub show_chart: bool,
    pub chart_size: (u32, u32),
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            show_chart: false,
            chart_size: DEFAULT_CHART_SIZE,
        }
    }
}

impl AnalysisConfig {
    /// Reads the process environment, honouring a `.env` file when one is present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(OUTPUT_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            config.output_dir = PathBuf::from(dir.trim());
        }
        if let Some(flag) = lookup(SHOW_CHART_VAR) {
            config.show_chart = parse_flag(SHOW_CHART_VAR, &flag)?;
        }
        if let Some(size) = lookup(CHART_SIZE_VAR) {
            config.chart_size = parse_size(&size)?;
        }

        Ok(config)
    }

    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(CHART_FILE_NAME)
    }

    pub fn workbook_path(&self) -> PathBuf {
        self.output_dir.join(WORKBOOK_FILE_NAME)
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AnalysisError::Config(format!(
            "{key} must be a boolean flag, got '{other}'"
        ))),
    }
}

/// Parses `WIDTHxHEIGHT`, e.g. `1600x1200`.
fn parse_size(raw: &str) -> Result<(u32, u32)> {
    let invalid = || {
        AnalysisError::Config(format!(
            "{CHART_SIZE_VAR} must look like WIDTHxHEIGHT, got '{raw}'"
        ))
    };

    let (width, height) = raw
        .trim()
        .to_ascii_lowercase()
        .split_once('x')
        .map(|(w, h)| (w.trim().parse::<u32>(), h.trim().parse::<u32>()))
        .ok_or_else(invalid)?;

    match (width, height) {
        (Ok(width), Ok(height)) if width > 0 && height > 0 => Ok((width, height)),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_write_to_working_directory() {
        let config = AnalysisConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.chart_path(), PathBuf::from("./analise_potencial_energetico.png"));
    }

    #[test]
    fn reads_overrides() {
        let config = AnalysisConfig::from_lookup(lookup_from(&[
            (OUTPUT_DIR_VAR, "/tmp/out"),
            (SHOW_CHART_VAR, "Yes"),
            (CHART_SIZE_VAR, "800x600"),
        ]))
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert!(config.show_chart);
        assert_eq!(config.chart_size, (800, 600));
        assert_eq!(
            config.workbook_path(),
            PathBuf::from("/tmp/out/resultados_analise_energetica.xlsx")
        );
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(AnalysisConfig::from_lookup(lookup_from(&[(CHART_SIZE_VAR, "800")])).is_err());
        assert!(AnalysisConfig::from_lookup(lookup_from(&[(CHART_SIZE_VAR, "0x600")])).is_err());
        assert!(AnalysisConfig::from_lookup(lookup_from(&[(SHOW_CHART_VAR, "maybe")])).is_err());
    }
}
