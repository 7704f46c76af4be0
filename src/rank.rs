//! Ranking of a filtered view for the population chart.

use crate::models::CountryRecord;
use serde::{Deserialize, Serialize};

/// How many countries the population chart keeps.
pub const TOP_N: usize = 20;

/// The `limit` largest countries by population, descending.
///
/// The sort is stable: records with equal population keep their relative
/// order from the input. An empty input yields an empty output, which
/// callers treat as "no chart to render" rather than an error.
pub fn top_by_population(records: &[CountryRecord], limit: usize) -> Vec<CountryRecord> {
    let mut out = records.to_vec();
    out.sort_by(|a, b| b.population.cmp(&a.population));
    out.truncate(limit);
    out
}

/// One bar of the population chart: label, length, and the tooltip fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarRow {
    pub name: String,
    pub population: u64,
    pub region: String,
}

/// Project records into chart rows, preserving order.
pub fn bar_rows(records: &[CountryRecord]) -> Vec<BarRow> {
    records
        .iter()
        .map(|r| BarRow {
            name: r.name.clone(),
            population: r.population,
            region: r.region.clone(),
        })
        .collect()
}
