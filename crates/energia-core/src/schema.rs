//! Column names shared by the scoring pipeline and its presenters.

pub const STATE: &str = "state";
pub const POPULATION_MILLIONS: &str = "population_millions";
pub const INSTALLED_CAPACITY_MW: &str = "installed_capacity_mw";
pub const GDP_BILLIONS: &str = "gdp_billions_brl";
pub const AREA_KM2: &str = "area_km2";
pub const PER_CAPITA_CONSUMPTION_MWH: &str = "per_capita_consumption_mwh";

pub const POPULATION_DENSITY: &str = "population_density";
pub const TOTAL_DEMAND_MW: &str = "total_demand_mw";
pub const DEFICIT_MW: &str = "deficit_mw";
pub const GDP_PER_CAPITA: &str = "gdp_per_capita";
pub const GROWTH_POTENTIAL: &str = "growth_potential";
pub const DEMOGRAPHIC_FACTOR: &str = "demographic_factor";
pub const RAW_SCORE: &str = "raw_score";
pub const POTENTIAL_SCORE: &str = "potential_score";
pub const INSTALLATION_POTENTIAL_MW: &str = "installation_potential_mw";

/// Columns produced by `load_dataset`, in order.
pub const BASE_COLUMNS: [&str; 6] = [
    STATE,
    POPULATION_MILLIONS,
    INSTALLED_CAPACITY_MW,
    GDP_BILLIONS,
    AREA_KM2,
    PER_CAPITA_CONSUMPTION_MWH,
];

/// Columns appended by `compute_scores`, in derivation order.
pub const DERIVED_COLUMNS: [&str; 9] = [
    POPULATION_DENSITY,
    TOTAL_DEMAND_MW,
    DEFICIT_MW,
    GDP_PER_CAPITA,
    GROWTH_POTENTIAL,
    DEMOGRAPHIC_FACTOR,
    RAW_SCORE,
    POTENTIAL_SCORE,
    INSTALLATION_POTENTIAL_MW,
];
