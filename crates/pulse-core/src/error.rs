//! Error types for pulse-core.

use thiserror::Error;

use crate::client::InsightError;

/// Result type alias using pulse-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for market-pulse operations
#[derive(Error, Debug)]
pub enum Error {
    // Catalog errors
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Region catalog is empty")]
    EmptyCatalog,

    // Insight service errors
    #[error("Insight request failed: {0}")]
    Insight(#[from] InsightError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

}
