// crates/energia-core/src/types.rs

use polars::prelude::*;
use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::schema;

/// Base figures for one federative unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateRecord {
    pub code: &'static str,
    pub population_millions: f64,
    pub installed_capacity_mw: f64,
    pub gdp_billions: f64,
    pub area_km2: f64,
    pub per_capita_consumption_mwh: f64,
}

/// One row of the enriched table, as read back by the presenters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    pub code: String,
    pub population_millions: f64,
    pub installed_capacity_mw: f64,
    pub gdp_billions: f64,
    pub area_km2: f64,
    pub per_capita_consumption_mwh: f64,
    pub population_density: f64,
    pub total_demand_mw: f64,
    pub deficit_mw: f64,
    pub gdp_per_capita: f64,
    pub growth_potential: f64,
    pub demographic_factor: f64,
    pub raw_score: f64,
    pub potential_score: f64,
    pub installation_potential_mw: f64,
}

/// Reads every row of a scored frame into typed records, preserving frame order.
pub fn scored_records(df: &DataFrame) -> Result<Vec<ScoredRecord>> {
    let state = df.column(schema::STATE)?.str()?;
    let population = df.column(schema::POPULATION_MILLIONS)?.f64()?;
    let capacity = df.column(schema::INSTALLED_CAPACITY_MW)?.f64()?;
    let gdp = df.column(schema::GDP_BILLIONS)?.f64()?;
    let area = df.column(schema::AREA_KM2)?.f64()?;
    let consumption = df.column(schema::PER_CAPITA_CONSUMPTION_MWH)?.f64()?;
    let density = df.column(schema::POPULATION_DENSITY)?.f64()?;
    let demand = df.column(schema::TOTAL_DEMAND_MW)?.f64()?;
    let deficit = df.column(schema::DEFICIT_MW)?.f64()?;
    let gdp_per_capita = df.column(schema::GDP_PER_CAPITA)?.f64()?;
    let growth = df.column(schema::GROWTH_POTENTIAL)?.f64()?;
    let demographic = df.column(schema::DEMOGRAPHIC_FACTOR)?.f64()?;
    let raw_score = df.column(schema::RAW_SCORE)?.f64()?;
    let score = df.column(schema::POTENTIAL_SCORE)?.f64()?;
    let installation = df.column(schema::INSTALLATION_POTENTIAL_MW)?.f64()?;

    let value = |ca: &Float64Chunked, column: &'static str, row: usize| {
        ca.get(row)
            .ok_or(AnalysisError::MissingValue { column, row })
    };

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let code = state
            .get(row)
            .ok_or(AnalysisError::MissingValue {
                column: schema::STATE,
                row,
            })?
            .to_string();

        records.push(ScoredRecord {
            code,
            population_millions: value(population, schema::POPULATION_MILLIONS, row)?,
            installed_capacity_mw: value(capacity, schema::INSTALLED_CAPACITY_MW, row)?,
            gdp_billions: value(gdp, schema::GDP_BILLIONS, row)?,
            area_km2: value(area, schema::AREA_KM2, row)?,
            per_capita_consumption_mwh: value(consumption, schema::PER_CAPITA_CONSUMPTION_MWH, row)?,
            population_density: value(density, schema::POPULATION_DENSITY, row)?,
            total_demand_mw: value(demand, schema::TOTAL_DEMAND_MW, row)?,
            deficit_mw: value(deficit, schema::DEFICIT_MW, row)?,
            gdp_per_capita: value(gdp_per_capita, schema::GDP_PER_CAPITA, row)?,
            growth_potential: value(growth, schema::GROWTH_POTENTIAL, row)?,
            demographic_factor: value(demographic, schema::DEMOGRAPHIC_FACTOR, row)?,
            raw_score: value(raw_score, schema::RAW_SCORE, row)?,
            potential_score: value(score, schema::POTENTIAL_SCORE, row)?,
            installation_potential_mw: value(installation, schema::INSTALLATION_POTENTIAL_MW, row)?,
        });
    }

    Ok(records)
}
