use rcd_rs::filter::{FilterState, distinct_regions, filter};
use rcd_rs::models::CountryRecord;
use std::collections::BTreeSet;

fn rec(name: &str, official: &str, capital: &str, region: &str, population: u64) -> CountryRecord {
    CountryRecord {
        name: name.into(),
        official_name: official.into(),
        capital: capital.into(),
        region: region.into(),
        subregion: "N/A".into(),
        population,
        area_km2: 0.0,
        flag_emoji: "N/A".into(),
        flag_url: "N/A".into(),
    }
}

fn sample() -> Vec<CountryRecord> {
    vec![
        rec("Germany", "Federal Republic of Germany", "Berlin", "Europe", 83_000_000),
        rec("France", "French Republic", "Paris", "Europe", 67_000_000),
        rec("Japan", "Japan", "Tokyo", "Asia", 125_000_000),
        rec("Brazil", "Federative Republic of Brazil", "Brasília", "Americas", 212_000_000),
        rec("Egypt", "Arab Republic of Egypt", "Cairo", "Africa", 102_000_000),
    ]
}

fn set(regions: &[&str]) -> BTreeSet<String> {
    regions.iter().map(|s| s.to_string()).collect()
}

#[test]
fn region_membership_keeps_input_order() {
    let records = sample();
    let got = filter(&records, &set(&["Europe"]), "");
    let names: Vec<&str> = got.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Germany", "France"]);
}

#[test]
fn empty_region_set_selects_nothing() {
    // No implicit "all": an empty selection is an empty result.
    let records = sample();
    assert!(filter(&records, &BTreeSet::new(), "").is_empty());
    assert!(filter(&records, &BTreeSet::new(), "Germany").is_empty());
}

#[test]
fn search_matches_name_official_name_or_capital() {
    let records = sample();
    let all = set(&["Africa", "Americas", "Asia", "Europe"]);

    // Common name, case-insensitive.
    let got = filter(&records, &all, "gerMANY");
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].name, "Germany");

    // Official name only ("Federative" appears in no common name).
    let got = filter(&records, &all, "federative");
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].name, "Brazil");

    // Capital.
    let got = filter(&records, &all, "cairo");
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].name, "Egypt");
}

#[test]
fn query_is_trimmed_and_blank_means_no_search() {
    let records = sample();
    let all = set(&["Africa", "Americas", "Asia", "Europe"]);
    assert_eq!(filter(&records, &all, "  tokyo  ")[0].name, "Japan");
    // Whitespace-only queries behave like the empty query.
    assert_eq!(filter(&records, &all, "   ").len(), records.len());
}

#[test]
fn predicates_combine_with_and() {
    let records = sample();
    // "Republic" matches official names across several regions; the region
    // predicate restricts the result to Europe.
    let got = filter(&records, &set(&["Europe"]), "republic");
    let names: Vec<&str> = got.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Germany", "France"]);
}

#[test]
fn search_is_complete() {
    // Every record whose lowered name/official_name/capital contains the
    // query appears in the result, none are dropped.
    let records = sample();
    let all = set(&["Africa", "Americas", "Asia", "Europe"]);
    let got = filter(&records, &all, "a");
    let expect: Vec<&CountryRecord> = records
        .iter()
        .filter(|r| {
            r.name.to_lowercase().contains('a')
                || r.official_name.to_lowercase().contains('a')
                || r.capital.to_lowercase().contains('a')
        })
        .collect();
    assert_eq!(got.len(), expect.len());
    for (g, e) in got.iter().zip(expect) {
        assert_eq!(g, e);
    }
}

#[test]
fn filter_is_idempotent() {
    let records = sample();
    let regions = set(&["Europe", "Asia"]);
    let once = filter(&records, &regions, "an");
    let twice = filter(&once, &regions, "an");
    assert_eq!(once, twice);
}

#[test]
fn filter_does_not_mutate_input() {
    let records = sample();
    let before = records.clone();
    let _ = filter(&records, &set(&["Asia"]), "japan");
    assert_eq!(records, before);
}

#[test]
fn distinct_regions_are_sorted_and_unique() {
    let regions = distinct_regions(&sample());
    assert_eq!(regions, ["Africa", "Americas", "Asia", "Europe"]);
}

#[test]
fn full_region_set_with_empty_query_is_identity() {
    let records = sample();
    let state = FilterState::all_regions(&records);
    assert_eq!(state.apply(&records), records);
}

#[test]
fn all_regions_default_matches_distinct_regions() {
    let records = sample();
    let state = FilterState::all_regions(&records);
    let expect: BTreeSet<String> = distinct_regions(&records).into_iter().collect();
    assert_eq!(state.regions, expect);
    assert!(state.query.is_empty());
}
