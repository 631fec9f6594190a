//! Yearly OHLC aggregation
//!
//! Folds one country's readings into per-year candles: extremes over the raw
//! temperatures, a two-level average for the close, and an open carried over
//! from the previous year's close.

use tracing::debug;

use crate::data::store::Dataset;
use crate::data::types::{Country, Reading, YearlyCandle};
use crate::error::{CandleError, Result};

/// Build the per-year candle series for one country over an inclusive range.
///
/// Years with no readings are omitted from the output. Each candle's `open`
/// is the close of `year - 1` recomputed from the readings accumulated so far
/// within this call; the first year that has data gets a NaN `open`, and so
/// does any year whose predecessor left no readings behind. The accumulation
/// is local to the call, so back-to-back invocations are independent.
pub fn build_yearly_series(
    data: &Dataset,
    country: Country,
    start_year: i32,
    end_year: i32,
) -> Result<Vec<YearlyCandle>> {
    if start_year > end_year {
        return Err(CandleError::InvalidRange(format!(
            "start year {} is after end year {}",
            start_year, end_year
        )));
    }

    let mut series = Vec::new();
    let mut seen: Vec<Reading> = Vec::new();

    for year in start_year..=end_year {
        let readings = data.readings_for(country, year);
        if readings.is_empty() {
            continue;
        }

        let open = if seen.is_empty() {
            f64::NAN
        } else {
            year_close(&seen, year - 1).unwrap_or(f64::NAN)
        };

        // Only readings with empty temperature vectors can trip this; the
        // CSV loader never produces them.
        let close = close_for_year(&readings, year)?;

        let (high, low) = readings
            .iter()
            .flat_map(|r| r.temperatures.iter().copied())
            .fold((f64::NEG_INFINITY, f64::INFINITY), |(hi, lo), t| {
                (hi.max(t), lo.min(t))
            });

        series.push(YearlyCandle::new(year, open, high, low, close));
        seen.extend(readings);
    }

    debug!(
        "Built {} candles for {} ({}..={})",
        series.len(),
        country,
        start_year,
        end_year
    );

    Ok(series)
}

/// Close value for one year of readings: the mean of each reading's own mean.
///
/// Readings from other years are ignored. Fails with
/// [`CandleError::NoDataForYear`] when nothing usable matches.
pub fn close_for_year(readings: &[Reading], year: i32) -> Result<f64> {
    year_close(readings, year).ok_or(CandleError::NoDataForYear(year))
}

/// Two-level close over the readings matching `year`, `None` when none do.
fn year_close(readings: &[Reading], year: i32) -> Option<f64> {
    let means: Vec<f64> = readings
        .iter()
        .filter(|r| r.year() == Some(year))
        .filter_map(Reading::mean_temperature)
        .collect();

    if means.is_empty() {
        return None;
    }
    Some(means.iter().sum::<f64>() / means.len() as f64)
}
