//! In-memory dataset store
//!
//! Holds the readings for a whole session and answers the filter and
//! year-boundary queries the aggregation layer is built on.

use std::path::Path;

use crate::data::loader;
use crate::data::types::{Country, Reading};
use crate::error::{CandleError, Result};

/// In-memory store of temperature readings.
///
/// One instance owns the session's data and is passed by reference into
/// every aggregation call. Readings stay in source order, which is trusted
/// to be chronological and is never re-sorted; all queries are linear scans
/// over the current contents, recomputed on every call.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    readings: Vec<Reading>,
}

impl Dataset {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from already-validated readings.
    pub fn from_readings(readings: Vec<Reading>) -> Self {
        Self { readings }
    }

    /// Load a store straight from a wide-format CSV file.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self::from_readings(loader::load_readings(path)?))
    }

    /// Replace the store's contents with a new set of readings.
    pub fn load(&mut self, readings: Vec<Reading>) {
        self.readings = readings;
    }

    /// Number of readings held.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// True when the store holds no readings.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Year of the chronologically first reading.
    ///
    /// Fails with [`CandleError::EmptyDataset`] when the store holds no
    /// usable records.
    pub fn earliest_year(&self) -> Result<i32> {
        self.readings
            .iter()
            .find_map(Reading::year)
            .ok_or(CandleError::EmptyDataset)
    }

    /// Year of the first reading strictly after the given year.
    ///
    /// When no later year exists the result wraps around to
    /// [`earliest_year`](Self::earliest_year): the interactive session's
    /// current-year cursor cycles through the dataset with this.
    pub fn next_year(&self, year: i32) -> Result<i32> {
        match self
            .readings
            .iter()
            .find_map(|r| r.year().filter(|&y| y > year))
        {
            Some(next) => Ok(next),
            None => self.earliest_year(),
        }
    }

    /// All readings for the given country and year, in source order.
    ///
    /// An empty result is an answer, not an error.
    pub fn readings_for(&self, country: Country, year: i32) -> Vec<Reading> {
        self.readings
            .iter()
            .filter(|r| r.country == country && r.year() == Some(year))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(timestamp: &str, temp: f64, country: Country) -> Reading {
        Reading::new(timestamp, vec![temp], country)
    }

    fn sample() -> Dataset {
        Dataset::from_readings(vec![
            reading("1980-01-01T00:00:00Z", 5.0, Country::At),
            reading("1980-01-01T00:00:00Z", 7.5, Country::De),
            reading("1981-06-01T12:00:00Z", 3.0, Country::At),
            reading("1981-06-02T12:00:00Z", 9.0, Country::At),
            reading("1983-02-01T00:00:00Z", -1.0, Country::At),
        ])
    }

    #[test]
    fn test_empty_store_boundary_queries() {
        let empty = Dataset::new();
        assert!(matches!(
            empty.earliest_year(),
            Err(CandleError::EmptyDataset)
        ));
        assert!(matches!(
            empty.next_year(1980),
            Err(CandleError::EmptyDataset)
        ));
    }

    #[test]
    fn test_earliest_year() {
        assert_eq!(sample().earliest_year().unwrap(), 1980);
    }

    #[test]
    fn test_next_year_skips_gaps() {
        let data = sample();
        assert_eq!(data.next_year(1980).unwrap(), 1981);
        // 1982 has no readings, the scan lands on 1983.
        assert_eq!(data.next_year(1981).unwrap(), 1983);
        assert_eq!(data.next_year(1982).unwrap(), 1983);
    }

    #[test]
    fn test_next_year_wraps_around() {
        let data = sample();
        assert_eq!(data.next_year(1983).unwrap(), 1980);
        assert_eq!(data.next_year(2500).unwrap(), 1980);
    }

    #[test]
    fn test_next_year_cycle_visits_each_year_once() {
        let data = sample();
        let start = data.earliest_year().unwrap();

        let mut visited = vec![start];
        let mut year = data.next_year(start).unwrap();
        while year != start {
            visited.push(year);
            year = data.next_year(year).unwrap();
        }

        assert_eq!(visited, vec![1980, 1981, 1983]);
    }

    #[test]
    fn test_readings_for_filters_country_and_year() {
        let data = sample();

        let at_1981 = data.readings_for(Country::At, 1981);
        assert_eq!(at_1981.len(), 2);
        // Source order is preserved.
        assert_eq!(at_1981[0].temperatures, vec![3.0]);
        assert_eq!(at_1981[1].temperatures, vec![9.0]);

        assert_eq!(data.readings_for(Country::De, 1980).len(), 1);
        assert!(data.readings_for(Country::De, 1981).is_empty());
        assert!(data.readings_for(Country::At, 1999).is_empty());
    }

    #[test]
    fn test_load_replaces_contents() {
        let mut data = sample();
        assert_eq!(data.len(), 5);

        data.load(vec![reading("1990-01-01T00:00:00Z", 1.0, Country::Fr)]);
        assert_eq!(data.len(), 1);
        assert_eq!(data.earliest_year().unwrap(), 1990);
        assert!(data.readings_for(Country::At, 1980).is_empty());
    }
}
