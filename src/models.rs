use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder for string fields the source record does not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// Failure while loading the country dataset.
///
/// All variants are recoverable at the application level: callers surface a
/// warning and continue with an empty dataset.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed with HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decode json: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unexpected response shape: {0}")]
    Payload(String),
}

/// A single source record that could not be mapped into a [`CountryRecord`].
///
/// Recovered locally: the record is skipped and processing continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("skipping `{name}`: {reason}")]
pub struct RecordMappingError {
    /// Common name of the offending record, or `"unknown"` when the payload
    /// is too malformed to recover it.
    pub name: String,
    pub reason: String,
}

/// Nested `name` object from the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawName {
    pub common: Option<String>,
    pub official: Option<String>,
}

/// Nested `flags` object from the API (image URLs).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFlags {
    pub png: Option<String>,
    pub svg: Option<String>,
}

/// Raw country object as returned by the REST Countries v3.1 bulk endpoint.
///
/// Every field is defaulted so that partially filled records still map; only
/// records with structurally wrong types (e.g. a string `population`) fail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCountry {
    pub name: RawName,
    pub capital: Vec<String>,
    pub region: Option<String>,
    pub subregion: Option<String>,
    pub population: Option<u64>,
    pub area: Option<f64>,
    /// Emoji flag.
    pub flag: Option<String>,
    pub flags: RawFlags,
}

/// Flat, fully defaulted country row used throughout this crate.
///
/// Every field is always present; missing source data is normalized to a
/// sentinel (`"N/A"`, `0`, `0.0`) so downstream filtering and ranking never
/// branch on optional-ness. Records are immutable after normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountryRecord {
    pub name: String,
    pub official_name: String,
    /// First listed capital.
    pub capital: String,
    pub region: String,
    pub subregion: String,
    pub population: u64,
    pub area_km2: f64,
    pub flag_emoji: String,
    pub flag_url: String,
}

impl From<RawCountry> for CountryRecord {
    fn from(raw: RawCountry) -> Self {
        let na = || NOT_AVAILABLE.to_string();
        Self {
            name: raw.name.common.unwrap_or_else(na),
            official_name: raw.name.official.unwrap_or_else(na),
            capital: raw.capital.into_iter().next().unwrap_or_else(na),
            region: raw.region.unwrap_or_else(na),
            subregion: raw.subregion.unwrap_or_else(na),
            population: raw.population.unwrap_or(0),
            area_km2: raw.area.unwrap_or(0.0),
            flag_emoji: raw.flag.unwrap_or_else(na),
            flag_url: raw.flags.png.or(raw.flags.svg).unwrap_or_else(na),
        }
    }
}

/// Map one raw JSON value into a normalized record.
///
/// A malformed value yields a [`RecordMappingError`] carrying the record's
/// common name when it can still be read out of the payload.
pub fn normalize(value: &serde_json::Value) -> Result<CountryRecord, RecordMappingError> {
    match serde_json::from_value::<RawCountry>(value.clone()) {
        Ok(raw) => Ok(raw.into()),
        Err(e) => Err(RecordMappingError {
            name: value
                .pointer("/name/common")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
                .to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Outcome of one load: normalized records in response order, plus the
/// records that had to be skipped.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub records: Vec<CountryRecord>,
    pub skipped: Vec<RecordMappingError>,
}
