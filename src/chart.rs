//! Text rendering for candle series
//!
//! Pure string builders for the stats table and the terminal candlestick
//! chart; callers decide where the output goes.

use crate::data::types::YearlyCandle;

const CELL_WIDTH: usize = 8;
const BODY_CELL: &str = "████    ";
const WICK_CELL: &str = " ||     ";
const EMPTY_CELL: &str = "        ";

/// Render a candle series as an aligned text table.
///
/// NaN fields print as `NaN`, the standard formatting of a missing value.
pub fn render_table(series: &[YearlyCandle]) -> String {
    let mut out = format!(
        "{:>6} {:>10} {:>10} {:>10} {:>10}\n",
        "Year", "Open", "High", "Low", "Close"
    );

    for candle in series {
        out.push_str(&format!(
            "{:>6} {:>10.2} {:>10.2} {:>10.2} {:>10.2}\n",
            candle.year, candle.open, candle.high, candle.low, candle.close
        ));
    }

    out
}

/// One plottable column of the chart.
struct Column {
    year: i32,
    /// Inclusive body rows, top and bottom. `None` for a NaN close.
    body: Option<(i32, i32)>,
    /// Inclusive wick rows, top and bottom. `None` for a NaN high or low.
    wick: Option<(i32, i32)>,
}

impl Column {
    fn from_candle(candle: &YearlyCandle) -> Self {
        // f64::max and f64::min ignore NaN, so a candle with a NaN open
        // collapses its body onto the close row.
        let body = if candle.close.is_nan() {
            None
        } else {
            let top = candle.open.max(candle.close).round() as i32;
            let bottom = candle.open.min(candle.close).round() as i32;
            Some((top, bottom))
        };

        let wick = if candle.high.is_nan() || candle.low.is_nan() {
            None
        } else {
            Some((candle.high.round() as i32, candle.low.round() as i32))
        };

        Self {
            year: candle.year,
            body,
            wick,
        }
    }

    fn cell(&self, level: i32) -> &'static str {
        if self.body.map_or(false, |(top, bottom)| level <= top && level >= bottom) {
            BODY_CELL
        } else if self.wick.map_or(false, |(top, bottom)| level <= top && level >= bottom) {
            WICK_CELL
        } else {
            EMPTY_CELL
        }
    }
}

/// Render a candle series as a terminal candlestick chart.
///
/// The y-axis runs one integer row per degree from the highest high down to
/// the lowest low; each candle gets a fixed-width column with a block body
/// between its open and close rows and wicks out to its high and low. A NaN
/// open draws a bare close-row body. Missing or empty data renders as a
/// one-line notice, never a panic.
pub fn render_chart(series: &[YearlyCandle]) -> String {
    if series.is_empty() {
        return "No data available to plot.\n".to_string();
    }

    let top = series
        .iter()
        .map(|c| c.high)
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    let bottom = series
        .iter()
        .map(|c| c.low)
        .filter(|v| v.is_finite())
        .fold(f64::INFINITY, f64::min);
    if !top.is_finite() || !bottom.is_finite() {
        return "No plottable high or low values.\n".to_string();
    }

    let top = top.round() as i32;
    let bottom = bottom.round() as i32;
    let columns: Vec<Column> = series.iter().map(Column::from_candle).collect();

    let mut out = String::new();
    for level in (bottom..=top).rev() {
        out.push_str(&format!("{:>4} | ", level));
        for column in &columns {
            out.push_str(column.cell(level));
        }
        out.push('\n');
    }

    out.push_str(&"-".repeat(7 + columns.len() * CELL_WIDTH));
    out.push('\n');

    out.push_str("       ");
    for column in &columns {
        out.push_str(&format!("{:^width$}", column.year, width = CELL_WIDTH));
    }
    out.push('\n');

    out
}
