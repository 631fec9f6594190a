//! Data structures and ingestion for temperature datasets

pub mod loader;
pub mod store;
pub mod types;

pub use store::Dataset;
pub use types::{Country, Reading, YearlyCandle};
