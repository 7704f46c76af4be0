use crate::models::CountryRecord;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column order of the CSV export. Must stay in sync with the
/// [`CountryRecord`] field order, which drives the serialized rows.
const CSV_HEADER: [&str; 9] = [
    "name",
    "official_name",
    "capital",
    "region",
    "subregion",
    "population",
    "area_km2",
    "flag_emoji",
    "flag_url",
];

/// Save records as CSV, one row per country.
///
/// The header row is derived from the record fields. An empty view still
/// writes the header so the file is recognizably a country export.
pub fn save_csv<P: AsRef<Path>>(records: &[CountryRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    if records.is_empty() {
        wtr.write_record(CSV_HEADER)?;
    }
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save records as a pretty-printed JSON array.
pub fn save_json<P: AsRef<Path>>(records: &[CountryRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, records)?;
    out.flush()?;
    Ok(())
}
