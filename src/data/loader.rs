//! CSV ingestion and series export
//!
//! Loads wide-format temperature CSVs (a timestamp column followed by one
//! column per country) into readings, and writes candle series back out as
//! CSV or JSON.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Writer};
use tracing::warn;

use crate::data::types::{Country, Reading, YearlyCandle};

/// Resolve a header label to a country column.
///
/// Labels may be bare codes (`AT`) or carry a suffix after an underscore
/// (`AT_temperature`); anything unrecognized maps to [`Country::Unknown`].
fn column_country(label: &str) -> Country {
    let label = label.trim();
    let code = label.split_once('_').map_or(label, |(head, _)| head);
    Country::from_code(code)
}

/// Load readings from a wide-format CSV file.
///
/// The header row names the columns; unrecognized country columns are skipped
/// entirely. A row with an unparseable timestamp or a malformed temperature
/// cell is dropped whole and loading continues. So is a row whose field count
/// differs from the header's: ragged rows count as corrupt, they are never
/// position-mapped onto whichever columns they happen to cover. Empty cells
/// simply produce no reading.
pub fn load_readings<P: AsRef<Path>>(path: P) -> Result<Vec<Reading>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;

    let mut reader = ReaderBuilder::new().flexible(true).from_reader(file);

    let headers = reader.headers().context("Failed to read CSV header")?.clone();
    let width = headers.len();
    let mut columns: Vec<(usize, Country)> = Vec::new();
    for (idx, label) in headers.iter().enumerate().skip(1) {
        match column_country(label) {
            Country::Unknown => warn!("Skipping unrecognized country column {:?}", label),
            country => columns.push((idx, country)),
        }
    }

    let mut readings = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.context("Failed to read CSV record")?;
        let line = i + 2;
        if record.len() != width {
            warn!(
                "Skipping malformed row {} ({} fields, expected {})",
                line,
                record.len(),
                width
            );
            continue;
        }
        match parse_row(&record, &columns) {
            Some(row) => readings.extend(row),
            None => warn!("Skipping malformed row {}", line),
        }
    }

    Ok(readings)
}

/// Parse one CSV row into readings, one per recognized non-empty cell.
///
/// Returns `None` when the row is unusable as a whole.
fn parse_row(record: &StringRecord, columns: &[(usize, Country)]) -> Option<Vec<Reading>> {
    let timestamp = record.get(0)?.trim();
    // The leading 4-digit year must parse so later year extraction cannot fail.
    timestamp.get(..4)?.parse::<i32>().ok()?;

    let mut row = Vec::new();
    for &(idx, country) in columns {
        let cell = record.get(idx).unwrap_or("").trim();
        if cell.is_empty() {
            continue;
        }
        let temperature: f64 = cell.parse().ok()?;
        row.push(Reading::new(timestamp, vec![temperature], country));
    }
    Some(row)
}

/// Save a candle series to a CSV file.
pub fn save_series_csv<P: AsRef<Path>>(series: &[YearlyCandle], path: P) -> Result<()> {
    let file = File::create(&path)
        .with_context(|| format!("Failed to create file: {:?}", path.as_ref()))?;

    let mut writer = Writer::from_writer(file);

    for candle in series {
        writer.serialize(candle)?;
    }

    writer.flush()?;
    Ok(())
}

/// Save a candle series to a JSON file.
///
/// NaN fields come out as `null`, which is how a missing open is represented
/// downstream.
pub fn save_series_json<P: AsRef<Path>>(series: &[YearlyCandle], path: P) -> Result<()> {
    let file = File::create(&path)
        .with_context(|| format!("Failed to create file: {:?}", path.as_ref()))?;

    serde_json::to_writer_pretty(file, series)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_csv(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("temps.csv");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_wide_csv() {
        let (_dir, path) = write_csv(
            "utc_timestamp,AT_temperature,DE_temperature\n\
             1980-01-01T00:00:00Z,5.0,7.5\n\
             1981-06-01T12:00:00Z,3.0,\n",
        );

        let readings = load_readings(&path).unwrap();

        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].country, Country::At);
        assert_eq!(readings[0].temperatures, vec![5.0]);
        assert_eq!(readings[1].country, Country::De);
        // The empty DE cell on the second row produces no reading.
        assert_eq!(readings[2].country, Country::At);
        assert_eq!(readings[2].year(), Some(1981));
    }

    #[test]
    fn test_unrecognized_column_is_skipped() {
        let (_dir, path) = write_csv(
            "utc_timestamp,AT,XX\n\
             1980-01-01T00:00:00Z,5.0,9.9\n",
        );

        let readings = load_readings(&path).unwrap();

        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].country, Country::At);
    }

    #[test]
    fn test_malformed_row_is_dropped_whole() {
        let (_dir, path) = write_csv(
            "utc_timestamp,AT,DE\n\
             1980-01-01T00:00:00Z,5.0,7.5\n\
             1981-01-01T00:00:00Z,oops,7.0\n\
             bad-timestamp,1.0,2.0\n\
             1982-01-01T00:00:00Z,4.0,6.0\n",
        );

        let readings = load_readings(&path).unwrap();

        let years: Vec<_> = readings.iter().filter_map(Reading::year).collect();
        assert_eq!(years, vec![1980, 1980, 1982, 1982]);
    }

    #[test]
    fn test_ragged_row_is_dropped_whole() {
        let (_dir, path) = write_csv(
            "utc_timestamp,AT,DE\n\
             1980-01-01T00:00:00Z,5.0\n\
             1981-01-01T00:00:00Z,3.0,4.0\n",
        );

        let readings = load_readings(&path).unwrap();

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].year(), Some(1981));
    }

    #[test]
    fn test_save_series_csv() {
        let series = vec![
            YearlyCandle::new(1980, f64::NAN, 5.0, 5.0, 5.0),
            YearlyCandle::new(1981, 5.0, 9.0, 3.0, 6.0),
        ];

        let dir = tempdir().unwrap();
        let path = dir.path().join("series.csv");
        save_series_csv(&series, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("year,open,high,low,close"));
        assert!(contents.contains("1981,5.0,9.0,3.0,6.0"));
    }

    #[test]
    fn test_save_series_json_maps_nan_to_null() {
        let series = vec![YearlyCandle::new(1980, f64::NAN, 5.0, 5.0, 5.0)];

        let dir = tempdir().unwrap();
        let path = dir.path().join("series.json");
        save_series_json(&series, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"open\": null"));
        assert!(contents.contains("\"high\": 5.0"));
    }
}
