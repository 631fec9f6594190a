//! Aggregation and forecasting over temperature datasets

pub mod aggregate;
pub mod forecast;

pub use aggregate::{build_yearly_series, close_for_year};
pub use forecast::{predict_next, TrendLine, DEFAULT_HORIZON};
