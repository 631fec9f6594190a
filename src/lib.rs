//! # Climate Candles - Yearly Temperature Candlesticks and Trends
//!
//! This library turns multi-country, time-stamped temperature readings into
//! yearly OHLC-style candles and projects their trend into the future:
//!
//! - CSV ingestion of wide-format temperature datasets
//! - In-memory dataset store with country/year queries
//! - Yearly candle aggregation (open carried from the prior close)
//! - Least-squares trend forecasting per candle field
//! - Text table and candlestick chart rendering

pub mod analysis;
pub mod chart;
pub mod data;
pub mod error;

pub use analysis::aggregate::{build_yearly_series, close_for_year};
pub use analysis::forecast::{predict_next, TrendLine, DEFAULT_HORIZON};
pub use chart::{render_chart, render_table};
pub use data::store::Dataset;
pub use data::types::{Country, Reading, YearlyCandle};
pub use error::{CandleError, Result};
