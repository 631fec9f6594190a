//! Core data types for temperature data
//!
//! This module defines the fundamental data structures used throughout the
//! library:
//! - Country: closed set of dataset country codes
//! - Reading: one timestamped temperature observation for one country
//! - YearlyCandle: OHLC-style aggregate for one country-year

use serde::{Deserialize, Serialize};

/// Country codes covered by the European temperature dataset.
///
/// The set is closed: anything outside it resolves to `Unknown`, which is
/// filtered out before data reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    At,
    Be,
    Bg,
    Ch,
    Cz,
    De,
    Dk,
    Ee,
    Es,
    Fi,
    Fr,
    Gb,
    Gr,
    Hr,
    Hu,
    Ie,
    It,
    Lt,
    Lu,
    Lv,
    Nl,
    No,
    Pl,
    Pt,
    Ro,
    Se,
    Si,
    Sk,
    Unknown,
}

impl Country {
    /// Resolve a two-letter code to a country, `Unknown` if unrecognized.
    ///
    /// Matching is exact (upper-case codes, as in the dataset header).
    pub fn from_code(code: &str) -> Self {
        match code {
            "AT" => Country::At,
            "BE" => Country::Be,
            "BG" => Country::Bg,
            "CH" => Country::Ch,
            "CZ" => Country::Cz,
            "DE" => Country::De,
            "DK" => Country::Dk,
            "EE" => Country::Ee,
            "ES" => Country::Es,
            "FI" => Country::Fi,
            "FR" => Country::Fr,
            "GB" => Country::Gb,
            "GR" => Country::Gr,
            "HR" => Country::Hr,
            "HU" => Country::Hu,
            "IE" => Country::Ie,
            "IT" => Country::It,
            "LT" => Country::Lt,
            "LU" => Country::Lu,
            "LV" => Country::Lv,
            "NL" => Country::Nl,
            "NO" => Country::No,
            "PL" => Country::Pl,
            "PT" => Country::Pt,
            "RO" => Country::Ro,
            "SE" => Country::Se,
            "SI" => Country::Si,
            "SK" => Country::Sk,
            _ => Country::Unknown,
        }
    }

    /// The two-letter dataset code for this country.
    pub fn code(&self) -> &'static str {
        match self {
            Country::At => "AT",
            Country::Be => "BE",
            Country::Bg => "BG",
            Country::Ch => "CH",
            Country::Cz => "CZ",
            Country::De => "DE",
            Country::Dk => "DK",
            Country::Ee => "EE",
            Country::Es => "ES",
            Country::Fi => "FI",
            Country::Fr => "FR",
            Country::Gb => "GB",
            Country::Gr => "GR",
            Country::Hr => "HR",
            Country::Hu => "HU",
            Country::Ie => "IE",
            Country::It => "IT",
            Country::Lt => "LT",
            Country::Lu => "LU",
            Country::Lv => "LV",
            Country::Nl => "NL",
            Country::No => "NO",
            Country::Pl => "PL",
            Country::Pt => "PT",
            Country::Ro => "RO",
            Country::Se => "SE",
            Country::Si => "SI",
            Country::Sk => "SK",
            Country::Unknown => "??",
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One temperature observation for one country.
///
/// `temperatures` holds the raw readings behind this record. The CSV
/// pipeline produces exactly one value per record, but the aggregation
/// treats every record as a group of readings and averages per record
/// first, so the vector shape is load-bearing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// ISO-like timestamp, e.g. "1980-01-01T00:00:00Z". Only the leading
    /// 4-digit year is ever interpreted.
    pub timestamp: String,
    /// Raw temperature readings behind this record, in degrees Celsius.
    pub temperatures: Vec<f64>,
    /// Country the readings belong to.
    pub country: Country,
}

impl Reading {
    /// Create a new reading.
    pub fn new(timestamp: impl Into<String>, temperatures: Vec<f64>, country: Country) -> Self {
        Self {
            timestamp: timestamp.into(),
            temperatures,
            country,
        }
    }

    /// The calendar year of this reading: the first four characters of the
    /// timestamp parsed as an integer. `None` if the timestamp is malformed.
    pub fn year(&self) -> Option<i32> {
        self.timestamp.get(..4)?.parse().ok()
    }

    /// Mean of this record's own readings. `None` for an empty record.
    pub fn mean_temperature(&self) -> Option<f64> {
        if self.temperatures.is_empty() {
            return None;
        }
        Some(self.temperatures.iter().sum::<f64>() / self.temperatures.len() as f64)
    }
}

/// OHLC-style temperature aggregate for one country-year.
///
/// `open` is carried over from the previous year's close and is NaN when no
/// prior close exists. Because of that carry-over, `open` can fall outside
/// this year's `low..=high` range; values are reported exactly as computed
/// and never clamped into OHLC consistency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct YearlyCandle {
    /// Calendar year this candle summarizes.
    pub year: i32,
    /// Previous year's close, NaN if unavailable.
    pub open: f64,
    /// Highest single reading of the year.
    pub high: f64,
    /// Lowest single reading of the year.
    pub low: f64,
    /// Mean over the year's records of each record's own mean.
    pub close: f64,
}

impl YearlyCandle {
    /// Create a new candle.
    pub fn new(year: i32, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            year,
            open,
            high,
            low,
            close,
        }
    }

    /// True when all four fields are real numbers. Candles with a NaN field
    /// cannot contribute to a regression.
    pub fn is_complete(&self) -> bool {
        !self.open.is_nan() && !self.high.is_nan() && !self.low.is_nan() && !self.close.is_nan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_from_code() {
        assert_eq!(Country::from_code("AT"), Country::At);
        assert_eq!(Country::from_code("SK"), Country::Sk);
        assert_eq!(Country::from_code("XX"), Country::Unknown);
        // Matching is case-sensitive, like the dataset header.
        assert_eq!(Country::from_code("at"), Country::Unknown);
        assert_eq!(Country::from_code(""), Country::Unknown);
    }

    #[test]
    fn test_country_code_roundtrip() {
        for code in ["AT", "DE", "GB", "SE"] {
            assert_eq!(Country::from_code(code).code(), code);
        }
        assert_eq!(Country::De.to_string(), "DE");
    }

    #[test]
    fn test_reading_year() {
        let r = Reading::new("1980-01-01T00:00:00Z", vec![5.0], Country::At);
        assert_eq!(r.year(), Some(1980));

        let short = Reading::new("198", vec![5.0], Country::At);
        assert_eq!(short.year(), None);

        let garbage = Reading::new("19x0-01-01", vec![5.0], Country::At);
        assert_eq!(garbage.year(), None);
    }

    #[test]
    fn test_reading_mean_temperature() {
        let single = Reading::new("1980-01-01T00:00:00Z", vec![5.0], Country::At);
        assert_eq!(single.mean_temperature(), Some(5.0));

        let multi = Reading::new("1980-01-01T00:00:00Z", vec![1.0, 3.0], Country::At);
        assert_eq!(multi.mean_temperature(), Some(2.0));

        let empty = Reading::new("1980-01-01T00:00:00Z", vec![], Country::At);
        assert_eq!(empty.mean_temperature(), None);
    }

    #[test]
    fn test_candle_is_complete() {
        let full = YearlyCandle::new(1981, 5.0, 9.0, 3.0, 6.0);
        assert!(full.is_complete());

        let no_open = YearlyCandle::new(1980, f64::NAN, 5.0, 5.0, 5.0);
        assert!(!no_open.is_complete());
    }
}
