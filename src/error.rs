//! Error types for dataset queries, aggregation and forecasting

use thiserror::Error;

/// Errors that can occur while querying the dataset or deriving candles
#[derive(Error, Debug)]
pub enum CandleError {
    #[error("dataset contains no records")]
    EmptyDataset,

    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("no temperature data for year {0}")]
    NoDataForYear(i32),

    #[error("no usable years left after dropping incomplete candles")]
    InsufficientData,

    #[error("reference years have no spread, trend is undefined")]
    DegenerateRegression,
}

/// Result type alias for candle operations
pub type Result<T> = std::result::Result<T, CandleError>;
