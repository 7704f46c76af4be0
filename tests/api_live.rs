//! Live API tests. Run with: `cargo test --features online -- --nocapture`
#![cfg(feature = "online")]

use rcd_rs::{Client, distinct_regions};
use std::sync::Arc;

#[test]
fn fetch_full_country_set() {
    let cli = Client::default();
    let report = cli.load().unwrap();

    // The bulk endpoint returns every country; ~250 as of v3.1.
    assert!(report.records.len() > 190);
    assert!(report.records.iter().all(|r| !r.name.is_empty()));
    assert!(report.records.iter().all(|r| !r.region.is_empty()));

    let regions = distinct_regions(&report.records);
    assert!(regions.iter().any(|r| r == "Europe"));
    assert!(regions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn load_is_memoized_until_refresh() {
    let cli = Client::default();
    let first = cli.load().unwrap();
    let second = cli.load().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let third = cli.refresh().unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
}
