//! Linear trend forecasting
//!
//! Fits an independent least-squares line to each candle field of a
//! reference series and projects the lines over a future horizon.

use tracing::debug;

use crate::data::types::YearlyCandle;
use crate::error::{CandleError, Result};

/// Number of future years projected when the caller does not choose one.
pub const DEFAULT_HORIZON: usize = 10;

/// A fitted least-squares line over (year, value) points.
#[derive(Debug, Clone, Copy)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    /// Fit a line through the given points with the closed-form normal
    /// equations.
    ///
    /// `None` when the slices are empty, differ in length, or the x values
    /// have no spread (zero denominator, the slope is undefined).
    pub fn fit(xs: &[f64], ys: &[f64]) -> Option<TrendLine> {
        if xs.is_empty() || xs.len() != ys.len() {
            return None;
        }

        let n = xs.len() as f64;
        let sum_x: f64 = xs.iter().sum();
        let sum_y: f64 = ys.iter().sum();
        let sum_xy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();
        let sum_x2: f64 = xs.iter().map(|x| x * x).sum();

        let denominator = n * sum_x2 - sum_x * sum_x;
        if denominator.abs() < 1e-10 {
            return None;
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;

        Some(TrendLine { slope, intercept })
    }

    /// Evaluate the line at `x`.
    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Project `horizon` synthetic future candles from a reference series.
///
/// Candles carrying any NaN field are left out of the fit wholesale, but the
/// projection always starts the year after the last reference entry. Every
/// output field is evaluated from its own fitted line, so projected candles
/// carry no NaN and no carried-over opens.
pub fn predict_next(reference: &[YearlyCandle], horizon: usize) -> Result<Vec<YearlyCandle>> {
    let last_year = match reference.last() {
        Some(candle) => candle.year,
        None => {
            return Err(CandleError::InvalidRange(
                "reference series is empty".to_string(),
            ))
        }
    };

    let usable: Vec<YearlyCandle> = reference
        .iter()
        .filter(|c| c.is_complete())
        .copied()
        .collect();
    if usable.is_empty() {
        return Err(CandleError::InsufficientData);
    }

    let xs: Vec<f64> = usable.iter().map(|c| f64::from(c.year)).collect();
    let fit_field = |field: fn(&YearlyCandle) -> f64| -> Result<TrendLine> {
        let ys: Vec<f64> = usable.iter().map(field).collect();
        TrendLine::fit(&xs, &ys).ok_or(CandleError::DegenerateRegression)
    };

    let open = fit_field(|c| c.open)?;
    let high = fit_field(|c| c.high)?;
    let low = fit_field(|c| c.low)?;
    let close = fit_field(|c| c.close)?;

    debug!(
        "Fitted {} reference years, close trend {:+.4}/year",
        usable.len(),
        close.slope
    );

    let mut projected = Vec::with_capacity(horizon);
    for offset in 1..=horizon {
        let year = last_year + offset as i32;
        let x = f64::from(year);
        projected.push(YearlyCandle::new(
            year,
            open.value_at(x),
            high.value_at(x),
            low.value_at(x),
            close.value_at(x),
        ));
    }

    Ok(projected)
}
