//! Error types for data operations.
//!
//! [`DataError`] covers the failures that abort a run. Missing companies and
//! missing concepts are not errors: identity lookup returns `Ok(None)` and an
//! absent tag yields an empty [`ConceptSeries`](crate::types::ConceptSeries).

use thiserror::Error;

/// Errors that can occur during data operations.
#[derive(Error, Debug)]
pub enum DataError {
    /// Network-related errors (connection failures, timeouts, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// The remote answered with a non-success status code.
    #[error("HTTP {status} from {url}")]
    Http {
        /// Status code returned by the server.
        status: u16,
        /// URL that was requested.
        url: String,
    },

    /// Error parsing data from a provider.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error converting or writing an assembled table.
    #[error("Export error: {0}")]
    Export(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

impl DataError {
    /// Returns true if this error came from the transport layer.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Http { .. })
    }
}

/// Result type alias using [`DataError`].
pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = DataError::Http {
            status: 503,
            url: "https://data.sec.gov/api/xbrl/companyfacts/CIK0000320193.json".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 503 from https://data.sec.gov/api/xbrl/companyfacts/CIK0000320193.json"
        );
        assert!(err.is_network());
    }

    #[test]
    fn test_parse_error_is_not_network() {
        let err = DataError::Parse("bad date".to_string());
        assert!(!err.is_network());
        assert_eq!(err.to_string(), "Parse error: bad date");
    }
}
