// crates/energia-core/src/spreadsheet.rs

use std::path::Path;

use polars::prelude::*;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet};
use tracing::info;

use crate::error::Result;
use crate::ranking::{sort_by_score, TOP_N};
use crate::statistics::describe;

pub const FULL_ANALYSIS_SHEET: &str = "Análise Completa";
pub const TOP_STATES_SHEET: &str = "Top 10 Potencial";
pub const STATISTICS_SHEET: &str = "Resumo Estatístico";

const COLUMN_WIDTH: f64 = 18.0;

/// Writes the three analysis sheets to `path`, replacing any existing workbook.
pub fn export_workbook(df: &DataFrame, path: &Path) -> Result<()> {
    let ranked = sort_by_score(df)?;
    let top = ranked.head(Some(TOP_N));
    let summary = describe(df)?;

    let header = Format::new().set_bold();
    let mut workbook = Workbook::new();

    for (name, frame) in [
        (FULL_ANALYSIS_SHEET, &ranked),
        (TOP_STATES_SHEET, &top),
        (STATISTICS_SHEET, &summary),
    ] {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name)?;
        write_frame(worksheet, frame, &header)?;
    }

    workbook.save(path)?;
    info!(path = %path.display(), rows = ranked.height(), "Workbook written");

    Ok(())
}

/// Header row of column names, then one row per frame row. Nulls and non-finite
/// numbers are left as empty cells.
fn write_frame(worksheet: &mut Worksheet, df: &DataFrame, header: &Format) -> Result<()> {
    for (col_idx, column) in df.get_columns().iter().enumerate() {
        let col = col_idx as ColNum;
        worksheet.set_column_width(col, COLUMN_WIDTH)?;
        worksheet.write_string_with_format(0, col, column.name().as_str(), header)?;

        if column.dtype() == &DataType::String {
            for (row_idx, value) in column.str()?.into_iter().enumerate() {
                if let Some(value) = value {
                    worksheet.write_string(data_row(row_idx), col, value)?;
                }
            }
        } else {
            let as_float = column.cast(&DataType::Float64)?;
            for (row_idx, value) in as_float.f64()?.into_iter().enumerate() {
                if let Some(value) = value.filter(|v| v.is_finite()) {
                    worksheet.write_number(data_row(row_idx), col, value)?;
                }
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn data_row(row_idx: usize) -> RowNum {
    (row_idx + 1) as RowNum
}
