// crates/energia-core/src/dataset.rs

use polars::prelude::*;

use crate::schema;
use crate::types::StateRecord;

const fn state(
    code: &'static str,
    population_millions: f64,
    installed_capacity_mw: f64,
    gdp_billions: f64,
    area_km2: f64,
    per_capita_consumption_mwh: f64,
) -> StateRecord {
    StateRecord {
        code,
        population_millions,
        installed_capacity_mw,
        gdp_billions,
        area_km2,
        per_capita_consumption_mwh,
    }
}

/// Simulated figures shaped after the real profile of each Brazilian state.
pub const STATES: [StateRecord; 27] = [
    state("SP", 45.9, 28000.0, 2719.0, 248219.0, 4.2),
    state("RJ", 17.4, 8500.0, 759.0, 43777.0, 3.8),
    state("MG", 21.4, 12000.0, 683.0, 586521.0, 3.1),
    state("RS", 11.4, 6200.0, 471.0, 281730.0, 3.9),
    state("PR", 11.5, 7800.0, 487.0, 199307.0, 4.1),
    state("SC", 7.3, 4200.0, 295.0, 95737.0, 4.5),
    state("BA", 14.9, 5800.0, 267.0, 564732.0, 2.1),
    state("PE", 9.6, 3200.0, 190.0, 98076.0, 2.3),
    state("CE", 9.2, 2800.0, 170.0, 148886.0, 2.0),
    state("GO", 7.1, 4500.0, 224.0, 340242.0, 3.8),
    state("PA", 8.7, 9500.0, 169.0, 1247954.0, 2.8),
    state("AM", 4.2, 2100.0, 102.0, 1559146.0, 2.2),
    state("MA", 7.1, 1800.0, 98.0, 329642.0, 1.8),
    state("PB", 4.0, 1200.0, 63.0, 56469.0, 2.1),
    state("ES", 4.1, 2800.0, 140.0, 46074.0, 4.2),
    state("PI", 3.3, 850.0, 59.0, 251616.0, 1.9),
    state("AL", 3.4, 1400.0, 62.0, 27843.0, 2.4),
    state("RN", 3.5, 1600.0, 69.0, 52809.0, 2.2),
    state("MT", 3.5, 3200.0, 149.0, 903202.0, 4.8),
    state("MS", 2.8, 2100.0, 121.0, 357145.0, 4.1),
    state("DF", 3.1, 900.0, 254.0, 5760.0, 5.2),
    state("SE", 2.3, 800.0, 42.0, 21925.0, 2.6),
    state("RO", 1.8, 1200.0, 52.0, 237765.0, 3.1),
    state("TO", 1.6, 950.0, 36.0, 277466.0, 2.9),
    state("AC", 0.9, 300.0, 16.0, 164124.0, 2.1),
    state("RR", 0.6, 150.0, 13.0, 224298.0, 2.8),
    state("AP", 0.9, 400.0, 18.0, 142470.0, 2.4),
];

/// Builds the base table from the fixed state figures.
pub fn load_dataset() -> PolarsResult<DataFrame> {
    records_to_frame(&STATES)
}

/// Builds a base table from arbitrary records; columns follow `schema::BASE_COLUMNS`.
pub fn records_to_frame(records: &[StateRecord]) -> PolarsResult<DataFrame> {
    let codes: Vec<&str> = records.iter().map(|r| r.code).collect();
    let population: Vec<f64> = records.iter().map(|r| r.population_millions).collect();
    let capacity: Vec<f64> = records.iter().map(|r| r.installed_capacity_mw).collect();
    let gdp: Vec<f64> = records.iter().map(|r| r.gdp_billions).collect();
    let area: Vec<f64> = records.iter().map(|r| r.area_km2).collect();
    let consumption: Vec<f64> = records
        .iter()
        .map(|r| r.per_capita_consumption_mwh)
        .collect();

    df!(
        schema::STATE => codes,
        schema::POPULATION_MILLIONS => population,
        schema::INSTALLED_CAPACITY_MW => capacity,
        schema::GDP_BILLIONS => gdp,
        schema::AREA_KM2 => area,
        schema::PER_CAPITA_CONSUMPTION_MWH => consumption,
    )
}
