use polars::prelude::*;

use crate::schema;

const PEOPLE_PER_MILLION: f64 = 1_000_000.0;
const BRL_PER_BILLION: f64 = 1_000_000_000.0;
const DEMAND_SCALE: f64 = 1000.0;
const HOURS_PER_YEAR: f64 = 8760.0;

const POPULATION_WEIGHT: f64 = 0.7;
const DENSITY_WEIGHT: f64 = 0.3;

const DEFICIT_WEIGHT: f64 = 0.4;
const GROWTH_WEIGHT: f64 = 0.3;
const DEMOGRAPHIC_WEIGHT: f64 = 0.3;

const SCORE_SCALE: f64 = 100.0;
/// Recommended megawatts per score point.
pub const INSTALLATION_MW_PER_POINT: f64 = 100.0;

/// Runs the full scoring sequence over a base table and returns a new, enriched table.
///
/// Per-record metrics come first; the normalizations need table-wide bounds, so the
/// bounds are collected between passes.
pub fn compute_scores(df: &DataFrame) -> PolarsResult<DataFrame> {
    let with_metrics = derive_record_metrics(df)?;
    let aggregates = TableAggregates::collect(&with_metrics)?;
    let normalized = apply_table_normalization(&with_metrics, &aggregates)?;
    let range = ScoreRange::collect(&normalized)?;
    finalize_scores(&normalized, &range)
}

/// Pass one: density, demand, deficit and GDP per capita, each from its own row only.
pub fn derive_record_metrics(df: &DataFrame) -> PolarsResult<DataFrame> {
    let len = df.height();

    let population = df.column(schema::POPULATION_MILLIONS)?.f64()?;
    let capacity = df.column(schema::INSTALLED_CAPACITY_MW)?.f64()?;
    let gdp = df.column(schema::GDP_BILLIONS)?.f64()?;
    let area = df.column(schema::AREA_KM2)?.f64()?;
    let consumption = df.column(schema::PER_CAPITA_CONSUMPTION_MWH)?.f64()?;

    let mut density = Vec::with_capacity(len);
    let mut demand = Vec::with_capacity(len);
    let mut deficit = Vec::with_capacity(len);
    let mut gdp_per_capita = Vec::with_capacity(len);

    for idx in 0..len {
        let metrics = match (
            population.get(idx),
            capacity.get(idx),
            gdp.get(idx),
            area.get(idx),
            consumption.get(idx),
        ) {
            (Some(population), Some(capacity), Some(gdp), Some(area), Some(consumption)) => {
                Some(RecordMetrics::compute(
                    population,
                    capacity,
                    gdp,
                    area,
                    consumption,
                ))
            }
            _ => None,
        };

        density.push(metrics.map(|m| m.density));
        demand.push(metrics.map(|m| m.demand_mw));
        deficit.push(metrics.map(|m| m.deficit_mw));
        gdp_per_capita.push(metrics.map(|m| m.gdp_per_capita));
    }

    let mut output = df.clone();
    output.hstack_mut(&mut [
        Series::new(schema::POPULATION_DENSITY.into(), density).into(),
        Series::new(schema::TOTAL_DEMAND_MW.into(), demand).into(),
        Series::new(schema::DEFICIT_MW.into(), deficit).into(),
        Series::new(schema::GDP_PER_CAPITA.into(), gdp_per_capita).into(),
    ])?;

    Ok(output)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordMetrics {
    pub density: f64,
    pub demand_mw: f64,
    pub deficit_mw: f64,
    pub gdp_per_capita: f64,
}

impl RecordMetrics {
    pub fn compute(
        population_millions: f64,
        installed_capacity_mw: f64,
        gdp_billions: f64,
        area_km2: f64,
        per_capita_consumption_mwh: f64,
    ) -> Self {
        let density = population_millions * PEOPLE_PER_MILLION / area_km2;
        // Annual MWh spread over the year gives average MW.
        let demand_mw =
            population_millions * per_capita_consumption_mwh * DEMAND_SCALE / HOURS_PER_YEAR;
        let deficit_mw = demand_mw - installed_capacity_mw;
        let gdp_per_capita =
            gdp_billions * BRL_PER_BILLION / (population_millions * PEOPLE_PER_MILLION);

        Self {
            density,
            demand_mw,
            deficit_mw,
            gdp_per_capita,
        }
    }
}

/// Table-wide bounds needed by the second pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableAggregates {
    pub min_gdp_per_capita: f64,
    pub max_gdp_per_capita: f64,
    pub max_population: f64,
    pub max_density: f64,
    pub max_deficit: f64,
}

impl TableAggregates {
    pub fn collect(df: &DataFrame) -> PolarsResult<Self> {
        let (min_gdp_per_capita, max_gdp_per_capita) = bounds(df, schema::GDP_PER_CAPITA)?;
        let (_, max_population) = bounds(df, schema::POPULATION_MILLIONS)?;
        let (_, max_density) = bounds(df, schema::POPULATION_DENSITY)?;
        let (_, max_deficit) = bounds(df, schema::DEFICIT_MW)?;

        Ok(Self {
            min_gdp_per_capita,
            max_gdp_per_capita,
            max_population,
            max_density,
            max_deficit,
        })
    }
}

/// Pass two: growth potential, demographic factor and the un-rescaled composite score.
pub fn apply_table_normalization(
    df: &DataFrame,
    aggregates: &TableAggregates,
) -> PolarsResult<DataFrame> {
    let len = df.height();

    let population = df.column(schema::POPULATION_MILLIONS)?.f64()?;
    let density = df.column(schema::POPULATION_DENSITY)?.f64()?;
    let deficit = df.column(schema::DEFICIT_MW)?.f64()?;
    let gdp_per_capita = df.column(schema::GDP_PER_CAPITA)?.f64()?;

    let mut growth = Vec::with_capacity(len);
    let mut demographic = Vec::with_capacity(len);
    let mut raw_score = Vec::with_capacity(len);

    for idx in 0..len {
        let growth_val = gdp_per_capita.get(idx).map(|value| {
            min_max_normalize(
                value,
                aggregates.min_gdp_per_capita,
                aggregates.max_gdp_per_capita,
            )
        });

        let demographic_val = match (population.get(idx), density.get(idx)) {
            (Some(population), Some(density)) => Some(
                POPULATION_WEIGHT * share_of_max(population, aggregates.max_population)
                    + DENSITY_WEIGHT * share_of_max(density, aggregates.max_density),
            ),
            _ => None,
        };

        let raw_val = match (deficit.get(idx), growth_val, demographic_val) {
            (Some(deficit), Some(growth), Some(demographic)) => Some(
                DEFICIT_WEIGHT * share_of_max(deficit, aggregates.max_deficit)
                    + GROWTH_WEIGHT * growth
                    + DEMOGRAPHIC_WEIGHT * demographic,
            ),
            _ => None,
        };

        growth.push(growth_val);
        demographic.push(demographic_val);
        raw_score.push(raw_val);
    }

    let mut output = df.clone();
    output.hstack_mut(&mut [
        Series::new(schema::GROWTH_POTENTIAL.into(), growth).into(),
        Series::new(schema::DEMOGRAPHIC_FACTOR.into(), demographic).into(),
        Series::new(schema::RAW_SCORE.into(), raw_score).into(),
    ])?;

    Ok(output)
}

/// Bounds of the composite score, used to rescale it onto 0..100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    pub fn collect(df: &DataFrame) -> PolarsResult<Self> {
        let (min, max) = bounds(df, schema::RAW_SCORE)?;
        Ok(Self { min, max })
    }
}

/// Final step: rescaled potential score and the recommended installation in MW.
pub fn finalize_scores(df: &DataFrame, range: &ScoreRange) -> PolarsResult<DataFrame> {
    let raw_score = df.column(schema::RAW_SCORE)?.f64()?;

    let scores: Vec<Option<f64>> = raw_score
        .into_iter()
        .map(|raw| raw.map(|raw| min_max_normalize(raw, range.min, range.max) * SCORE_SCALE))
        .collect();
    let installation: Vec<Option<f64>> = scores
        .iter()
        .map(|score| score.map(|score| score * INSTALLATION_MW_PER_POINT))
        .collect();

    let mut output = df.clone();
    output.hstack_mut(&mut [
        Series::new(schema::POTENTIAL_SCORE.into(), scores).into(),
        Series::new(schema::INSTALLATION_POTENTIAL_MW.into(), installation).into(),
    ])?;

    Ok(output)
}

/// `(value - min) / (max - min)`, or 0 when every value in the table is equal.
pub fn min_max_normalize(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span == 0.0 || !span.is_finite() {
        0.0
    } else {
        (value - min) / span
    }
}

/// `value / max`, or 0 when the table maximum is zero.
pub fn share_of_max(value: f64, max: f64) -> f64 {
    if max == 0.0 || !max.is_finite() {
        0.0
    } else {
        value / max
    }
}

fn bounds(df: &DataFrame, column: &str) -> PolarsResult<(f64, f64)> {
    let values = df.column(column)?.f64()?;

    match (values.min(), values.max()) {
        (Some(min), Some(max)) => Ok((min, max)),
        _ => Err(PolarsError::ComputeError(
            format!("column '{column}' has no values to normalize against").into(),
        )),
    }
}
