//! Descriptive statistics over the numeric columns of a frame.

use polars::prelude::*;

pub const STATISTIC_COLUMN: &str = "statistic";

/// Row labels of the summary frame, in order.
pub const STATISTIC_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Summarises the non-null values. `std` uses the sample (n - 1) denominator.
    /// Statistics polars leaves undefined (empty input, `std` of one value) are NaN.
    pub fn from_chunked(values: &Float64Chunked) -> PolarsResult<Self> {
        let quantile = |q: f64| -> PolarsResult<f64> {
            Ok(values
                .quantile(q, QuantileMethod::Linear)?
                .unwrap_or(f64::NAN))
        };

        Ok(Self {
            count: values.len() - values.null_count(),
            mean: values.mean().unwrap_or(f64::NAN),
            std: values.std(1).unwrap_or(f64::NAN),
            min: values.min().unwrap_or(f64::NAN),
            q25: quantile(0.25)?,
            median: quantile(0.5)?,
            q75: quantile(0.75)?,
            max: values.max().unwrap_or(f64::NAN),
        })
    }

    fn as_row(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Builds a frame with one row per statistic and one column per numeric input column.
/// Non-numeric columns are skipped.
pub fn describe(df: &DataFrame) -> PolarsResult<DataFrame> {
    let mut columns: Vec<Column> = vec![Column::new(
        STATISTIC_COLUMN.into(),
        STATISTIC_LABELS.to_vec(),
    )];

    for column in df.get_columns() {
        if !is_numeric(column.dtype()) {
            continue;
        }

        let as_float = column.cast(&DataType::Float64)?;
        let summary = ColumnSummary::from_chunked(as_float.f64()?)?;
        columns.push(Column::new(column.name().clone(), summary.as_row().to_vec()));
    }

    DataFrame::new(columns)
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::UInt64
            | DataType::UInt32
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quartiles_interpolate_between_ranks() -> PolarsResult<()> {
        let values = Float64Chunked::from_slice("v".into(), &[3.0, 1.0, 4.0, 1.5, 9.0, 2.6]);
        let summary = ColumnSummary::from_chunked(&values)?;

        assert_eq!(summary.count, 6);
        assert!((summary.mean - 21.1 / 6.0).abs() < 1e-12);
        assert!((summary.q25 - 1.775).abs() < 1e-12);
        assert!((summary.median - 2.8).abs() < 1e-12);
        assert!((summary.q75 - 3.75).abs() < 1e-12);
        assert_eq!((summary.min, summary.max), (1.0, 9.0));
        Ok(())
    }

    #[test]
    fn nulls_are_left_out_of_the_count() -> PolarsResult<()> {
        let values = Float64Chunked::from_slice_options("v".into(), &[Some(2.0), None, Some(4.0)]);
        let summary = ColumnSummary::from_chunked(&values)?;

        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, 3.0);
        assert_eq!(summary.median, 3.0);
        Ok(())
    }
}
