use polars::prelude::*;

use crate::schema;

/// Number of states highlighted by every presenter.
pub const TOP_N: usize = 10;

/// Orders a scored frame by potential score, highest first. Ties keep frame order.
pub fn sort_by_score(df: &DataFrame) -> PolarsResult<DataFrame> {
    df.sort(
        [schema::POTENTIAL_SCORE],
        SortMultipleOptions::default()
            .with_order_descending(true)
            .with_nulls_last(true)
            .with_maintain_order(true),
    )
}

pub fn top_states(df: &DataFrame, n: usize) -> PolarsResult<DataFrame> {
    Ok(sort_by_score(df)?.head(Some(n)))
}
