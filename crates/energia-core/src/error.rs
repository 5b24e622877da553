// crates/energia-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Workbook export failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Chart rendering failed: {0}")]
    Chart(String),

    #[error("Column {column} has no value at row {row}")]
    MissingValue { column: &'static str, row: usize },

    #[error("Scored table has no rows")]
    EmptyTable,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
