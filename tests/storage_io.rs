use rcd_rs::models::CountryRecord;
use rcd_rs::storage;
use std::fs;
use tempfile::tempdir;

fn sample(n: usize) -> Vec<CountryRecord> {
    (0..n)
        .map(|i| CountryRecord {
            name: format!("Country {i}"),
            official_name: format!("Republic of Country {i}"),
            capital: format!("Capital {i}"),
            region: "Europe".into(),
            subregion: "Western Europe".into(),
            population: 1_000_000 * (i as u64 + 1),
            area_km2: 10_000.0 + i as f64,
            flag_emoji: "🏳".into(),
            flag_url: format!("https://flagcdn.com/c{i}.png"),
        })
        .collect()
}

#[test]
fn save_csv_and_json() {
    let rows = sample(3);
    let dir = tempdir().unwrap();

    let csv_path = dir.path().join("countries.csv");
    storage::save_csv(&rows, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("name,official_name,capital,region,subregion,"));
    assert_eq!(csv_txt.lines().count(), 1 + rows.len());

    let json_path = dir.path().join("countries.json");
    storage::save_json(&rows, &json_path).unwrap();
    let json_txt = fs::read_to_string(&json_path).unwrap();
    let back: Vec<CountryRecord> = serde_json::from_str(&json_txt).unwrap();
    assert_eq!(back, rows);
}

#[test]
fn empty_set_writes_header_only_csv() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("empty.csv");
    storage::save_csv(&[], &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv_txt.lines().count(), 1);
}
