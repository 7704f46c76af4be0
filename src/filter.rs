//! Region-set membership and substring search over normalized records.
//!
//! Both predicates are pure and side-effect free; a filtered view is a new
//! sequence and the source set is never mutated. Re-filtering on every input
//! change is cheap enough to run per keystroke.

use crate::models::CountryRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Distinct `region` values present in `records`, lexicographically
/// ascending and duplicate-free. Used to populate the region multi-select.
pub fn distinct_regions(records: &[CountryRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.region.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Current filter selection: region multi-select plus free-text search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Selected regions. An empty set selects nothing; there is no implicit
    /// "all". Use [`FilterState::all_regions`] for the usual default.
    pub regions: BTreeSet<String>,
    /// Free-text query, matched case-insensitively after trimming.
    pub query: String,
}

impl FilterState {
    /// The default selection: every region present in `records`, empty query.
    pub fn all_regions(records: &[CountryRecord]) -> Self {
        Self {
            regions: distinct_regions(records).into_iter().collect(),
            query: String::new(),
        }
    }

    /// Apply this selection to `records`. See [`filter`].
    pub fn apply(&self, records: &[CountryRecord]) -> Vec<CountryRecord> {
        filter(records, &self.regions, &self.query)
    }
}

/// Filter `records` by region membership, then by substring search.
///
/// A record passes when its `region` is in `regions` AND, for a non-empty
/// trimmed `query`, the lowercased query is a substring of at least one of
/// its lowercased `name`, `official_name`, or `capital`. Relative input
/// order is preserved.
pub fn filter(
    records: &[CountryRecord],
    regions: &BTreeSet<String>,
    query: &str,
) -> Vec<CountryRecord> {
    let needle = query.trim().to_lowercase();
    records
        .iter()
        .filter(|r| regions.contains(&r.region))
        .filter(|r| needle.is_empty() || matches_query(r, &needle))
        .cloned()
        .collect()
}

fn matches_query(record: &CountryRecord, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle)
        || record.official_name.to_lowercase().contains(needle)
        || record.capital.to_lowercase().contains(needle)
}
