use polars::prelude::*;

use energia_core::calculator::{
    apply_table_normalization, compute_scores, derive_record_metrics, TableAggregates,
    INSTALLATION_MW_PER_POINT,
};
use energia_core::dataset::{load_dataset, records_to_frame, STATES};
use energia_core::schema;
use energia_core::types::StateRecord;

const TOLERANCE: f64 = 1e-6;

fn values(df: &DataFrame, column: &str) -> Vec<f64> {
    df.column(column)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.expect("no nulls in scored frame"))
        .collect()
}

fn scored() -> DataFrame {
    compute_scores(&load_dataset().unwrap()).expect("scoring succeeded")
}

#[test]
fn per_record_metrics_match_closed_forms() {
    let df = scored();
    let demand = values(&df, schema::TOTAL_DEMAND_MW);
    let deficit = values(&df, schema::DEFICIT_MW);
    let gdp_per_capita = values(&df, schema::GDP_PER_CAPITA);
    let density = values(&df, schema::POPULATION_DENSITY);

    assert_eq!(df.height(), STATES.len());
    for (idx, state) in STATES.iter().enumerate() {
        let expected_demand =
            state.population_millions * state.per_capita_consumption_mwh * 1000.0 / 8760.0;
        let expected_gdp = state.gdp_billions * 1e9 / (state.population_millions * 1e6);
        let expected_density = state.population_millions * 1e6 / state.area_km2;

        assert!((demand[idx] - expected_demand).abs() < TOLERANCE, "{}", state.code);
        assert!(
            (deficit[idx] - (expected_demand - state.installed_capacity_mw)).abs() < TOLERANCE,
            "{}",
            state.code
        );
        assert!((gdp_per_capita[idx] - expected_gdp).abs() < TOLERANCE, "{}", state.code);
        assert!((density[idx] - expected_density).abs() < TOLERANCE, "{}", state.code);
    }
}

#[test]
fn sao_paulo_surplus_is_not_clamped() {
    let df = scored();
    let codes = df.column(schema::STATE).unwrap().str().unwrap();
    let sp = codes
        .into_iter()
        .position(|code| code == Some("SP"))
        .expect("SP present");

    let demand = values(&df, schema::TOTAL_DEMAND_MW)[sp];
    let deficit = values(&df, schema::DEFICIT_MW)[sp];

    assert!((demand - 45.9 * 4.2 * 1000.0 / 8760.0).abs() < TOLERANCE);
    assert!((demand - 22.007).abs() < 1e-3);
    assert!((deficit - (demand - 28000.0)).abs() < TOLERANCE);
    assert!(deficit < -27_000.0);
}

#[test]
fn potential_score_spans_zero_to_one_hundred() {
    let df = scored();
    let raw = values(&df, schema::RAW_SCORE);
    let score = values(&df, schema::POTENTIAL_SCORE);

    assert!(score.iter().all(|s| (0.0..=100.0).contains(s)));

    let argmin = (0..raw.len())
        .min_by(|&a, &b| raw[a].total_cmp(&raw[b]))
        .unwrap();
    let argmax = (0..raw.len())
        .max_by(|&a, &b| raw[a].total_cmp(&raw[b]))
        .unwrap();
    assert_eq!(score[argmin], 0.0);
    assert_eq!(score[argmax], 100.0);
}

#[test]
fn installation_potential_scales_score() {
    let df = scored();
    let score = values(&df, schema::POTENTIAL_SCORE);
    let installation = values(&df, schema::INSTALLATION_POTENTIAL_MW);

    for (s, mw) in score.iter().zip(&installation) {
        assert!((mw - s * INSTALLATION_MW_PER_POINT).abs() < TOLERANCE);
        assert!((mw - s * 100.0).abs() < TOLERANCE);
    }
}

#[test]
fn deficit_total_matches_individual_deficits() {
    let df = scored();
    let column_total: f64 = values(&df, schema::DEFICIT_MW).iter().sum();
    let independent_total: f64 = STATES
        .iter()
        .map(|s| {
            s.population_millions * s.per_capita_consumption_mwh * 1000.0 / 8760.0
                - s.installed_capacity_mw
        })
        .sum();

    assert!((column_total - independent_total).abs() < 1e-3);
    assert!(column_total < 0.0);
}

#[test]
fn derived_columns_follow_base_columns_in_order() {
    let base = load_dataset().unwrap();
    let df = compute_scores(&base).unwrap();

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let expected: Vec<String> = schema::BASE_COLUMNS
        .iter()
        .chain(schema::DERIVED_COLUMNS.iter())
        .map(|name| name.to_string())
        .collect();

    assert_eq!(names, expected);
    // The input table is left untouched.
    assert_eq!(base.width(), schema::BASE_COLUMNS.len());
}

#[test]
fn equal_gdp_per_capita_yields_zero_growth_potential() -> PolarsResult<()> {
    // Whole-number populations with GDP proportional to them give every state exactly
    // the same GDP per capita.
    let records: Vec<StateRecord> = STATES
        .iter()
        .enumerate()
        .map(|(idx, s)| {
            let population_millions = (idx + 1) as f64;
            StateRecord {
                population_millions,
                gdp_billions: population_millions * 30.0,
                ..*s
            }
        })
        .collect();

    let df = compute_scores(&records_to_frame(&records)?)?;
    let growth = df.column(schema::GROWTH_POTENTIAL)?.f64()?;

    assert_eq!(growth.len(), records.len());
    for value in growth.into_iter() {
        assert_eq!(value, Some(0.0));
    }

    let score = df.column(schema::POTENTIAL_SCORE)?.f64()?;
    assert!(score.into_iter().flatten().all(|s| s.is_finite()));

    Ok(())
}

#[test]
fn identical_records_score_zero_without_nan() -> PolarsResult<()> {
    let records = vec![STATES[0]; 4];
    let df = compute_scores(&records_to_frame(&records)?)?;

    for column in [
        schema::GROWTH_POTENTIAL,
        schema::POTENTIAL_SCORE,
        schema::INSTALLATION_POTENTIAL_MW,
    ] {
        let values = df.column(column)?.f64()?;
        for value in values.into_iter() {
            assert_eq!(value, Some(0.0), "{column}");
        }
    }

    Ok(())
}

#[test]
fn aggregates_come_from_the_whole_table() -> PolarsResult<()> {
    let with_metrics = derive_record_metrics(&load_dataset()?)?;
    let aggregates = TableAggregates::collect(&with_metrics)?;

    assert_eq!(aggregates.max_population, 45.9);
    let max_deficit = with_metrics
        .column(schema::DEFICIT_MW)?
        .f64()?
        .into_iter()
        .flatten()
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(aggregates.max_deficit, max_deficit);

    // Scoring a single row against its own bounds differs from scoring it in context.
    let normalized = apply_table_normalization(&with_metrics, &aggregates)?;
    let alone = derive_record_metrics(&load_dataset()?.head(Some(1)))?;
    let alone_aggregates = TableAggregates::collect(&alone)?;
    let alone_normalized = apply_table_normalization(&alone, &alone_aggregates)?;

    let in_context = normalized.column(schema::DEMOGRAPHIC_FACTOR)?.f64()?.get(0);
    let isolated = alone_normalized
        .column(schema::DEMOGRAPHIC_FACTOR)?
        .f64()?
        .get(0);
    assert_eq!(isolated, Some(1.0));
    assert_ne!(in_context, isolated);

    Ok(())
}

#[test]
fn missing_input_column_is_an_error() {
    let df = df!(schema::STATE => ["XX"], schema::POPULATION_MILLIONS => [1.0f64]).unwrap();
    assert!(compute_scores(&df).is_err());
}
