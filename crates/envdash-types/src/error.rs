//! Error types for data conversion in envdash-types.

use thiserror::Error;

/// Errors that can occur when converting device responses into the data model.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// An epoch timestamp was NaN or infinite.
    #[error("Timestamp is not a finite number: {0}")]
    NonFiniteTimestamp(f64),

    /// An epoch timestamp fell outside the representable date range.
    #[error("Timestamp out of range: {0} s")]
    TimestampOutOfRange(f64),
}

/// Result type alias using envdash-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
