use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while obtaining or persisting date range limits
///
/// None of these reach the picker: the bounds resolver logs them and falls
/// back to the cache or the default window.
#[derive(Error, Debug)]
pub enum RangeError {
    #[error("Range request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Range endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Malformed range limits: {0}")]
    Malformed(String),

    #[error("Invalid range: min ({min}) is after max ({max})")]
    InvalidRange { min: NaiveDate, max: NaiveDate },

    #[error("Cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache entry could not be encoded: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for range operations
pub type RangeResult<T> = Result<T, RangeError>;
