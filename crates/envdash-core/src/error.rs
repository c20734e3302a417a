//! Error types for envdash-core.
//!
//! Every variant is a fetch failure. The dashboard does not distinguish
//! between them beyond logging; the affected resource's indicator goes to
//! [`LoaderState::Error`](crate::indicator::LoaderState::Error) whatever the
//! cause.

use thiserror::Error;

/// Errors that can occur when talking to the device.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The device did not answer.
    #[error("Device not reachable at {url}: {source}")]
    NotReachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP request failed, or the body was not the expected JSON.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The device answered with a non-2xx status.
    #[error("Device returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The device URL is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The body decoded but could not be converted to the data model.
    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] envdash_types::ParseError),

    /// Injected by [`MockDevice`](crate::mock::MockDevice).
    #[error("Mock failure: {0}")]
    Mock(String),
}

impl Error {
    /// Create a status error.
    pub fn status(status: u16) -> Self {
        Self::Status { status }
    }

    /// Create an invalid URL error.
    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::InvalidUrl(message.into())
    }
}

/// Result type alias using envdash-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::status(503);
        assert_eq!(err.to_string(), "Device returned HTTP 503");

        let err = Error::invalid_url("must start with http://");
        assert!(err.to_string().contains("must start with http://"));

        let err = Error::Mock("boom".to_string());
        assert_eq!(err.to_string(), "Mock failure: boom");
    }

    #[test]
    fn test_parse_error_conversion() {
        let err: Error = envdash_types::ParseError::NonFiniteTimestamp(f64::NAN).into();
        assert!(matches!(err, Error::InvalidResponse(_)));
        assert!(err.to_string().contains("Timestamp"));
    }
}
