use rcd_rs::models::normalize;

#[test]
fn parse_sample_json() {
    let sample = r#"
    [
      {
        "flags":{"png":"https://flagcdn.com/w320/de.png","svg":"https://flagcdn.com/de.svg"},
        "name":{"common":"Germany","official":"Federal Republic of Germany"},
        "capital":["Berlin"],
        "region":"Europe",
        "subregion":"Western Europe",
        "population":83240525,
        "area":357114.0,
        "flag":"🇩🇪"
      },
      {
        "flags":{},
        "name":{"common":"Bouvet Island","official":"Bouvet Island"},
        "capital":[],
        "region":"Antarctic",
        "population":0,
        "area":49.0,
        "flag":"🇧🇻"
      }
    ]
    "#;

    let values: Vec<serde_json::Value> = serde_json::from_str(sample).unwrap();
    let records: Vec<_> = values.iter().map(|v| normalize(v).unwrap()).collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "Germany");
    assert_eq!(records[0].official_name, "Federal Republic of Germany");
    assert_eq!(records[0].capital, "Berlin");
    assert_eq!(records[0].region, "Europe");
    assert_eq!(records[0].population, 83_240_525);
    assert_eq!(records[0].area_km2, 357_114.0);
    assert_eq!(records[0].flag_url, "https://flagcdn.com/w320/de.png");

    // Empty capital list and missing subregion/flag urls normalize to the sentinel.
    assert_eq!(records[1].capital, "N/A");
    assert_eq!(records[1].subregion, "N/A");
    assert_eq!(records[1].flag_url, "N/A");
    assert_eq!(records[1].population, 0);
}

#[test]
fn empty_object_normalizes_to_sentinels() {
    let record = normalize(&serde_json::json!({})).unwrap();
    assert_eq!(record.name, "N/A");
    assert_eq!(record.official_name, "N/A");
    assert_eq!(record.capital, "N/A");
    assert_eq!(record.region, "N/A");
    assert_eq!(record.population, 0);
    assert_eq!(record.area_km2, 0.0);
}

#[test]
fn svg_flag_is_used_when_png_is_missing() {
    let record = normalize(&serde_json::json!({
        "name": {"common": "Japan", "official": "Japan"},
        "flags": {"svg": "https://flagcdn.com/jp.svg"}
    }))
    .unwrap();
    assert_eq!(record.flag_url, "https://flagcdn.com/jp.svg");
}

#[test]
fn malformed_record_is_skipped_with_name() {
    let value = serde_json::json!({
        "name": {"common": "Atlantis", "official": "Kingdom of Atlantis"},
        "region": "Oceania",
        "population": "lots"
    });
    let err = normalize(&value).unwrap_err();
    assert_eq!(err.name, "Atlantis");
    assert!(!err.reason.is_empty());
}

#[test]
fn unrecoverable_name_falls_back_to_unknown() {
    let err = normalize(&serde_json::json!({"name": 42, "population": 1})).unwrap_err();
    assert_eq!(err.name, "unknown");
}
