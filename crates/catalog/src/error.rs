//! Error types for catalog loading

use partmatch_core::error::{Error as CoreError, ErrorCode};
use std::time::Duration;
use thiserror::Error;

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failures while fetching or decoding catalog rows
#[derive(Error, Debug)]
pub enum DataSourceError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Source answered with a non-success status
    #[error("Failed to download sheet: {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// Fetch did not finish in time
    #[error("Catalog fetch timed out after {0:?}")]
    Timeout(Duration),

    /// Payload could not be read as a catalog
    #[error("Invalid catalog payload: {0}")]
    Parse(String),

    /// Local file could not be read
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
}

impl DataSourceError {
    /// Check if this error is worth retrying
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::Status { status } => *status >= 500 || *status == 429,
            Self::Timeout(_) => true,
            Self::Parse(_) | Self::Io(_) => false,
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            Self::Request(_) => ErrorCode::FetchFailed,
            Self::Status { .. } => ErrorCode::BadStatus,
            Self::Timeout(_) => ErrorCode::FetchTimeout,
            Self::Parse(_) => ErrorCode::InvalidPayload,
            Self::Io(_) => ErrorCode::DataSourceError,
        }
    }
}

/// Errors surfaced by [`crate::CatalogCache`]
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Fetching or decoding the catalog failed
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    /// The source is not configured
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CatalogError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

impl From<CatalogError> for CoreError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::DataSource(source) => {
                let code = source.code();
                CoreError::data_source(source.to_string())
                    .with_source(source)
                    .with_code(code)
            }
            CatalogError::Configuration(message) => {
                CoreError::new(ErrorCode::ConfigError, message)
            }
        }
    }
}

impl From<partmatch_core::Error> for CatalogError {
    fn from(err: partmatch_core::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(DataSourceError::Status { status: 503 }.is_retryable());
        assert!(DataSourceError::Status { status: 429 }.is_retryable());
        assert!(!DataSourceError::Status { status: 404 }.is_retryable());
        assert!(DataSourceError::Timeout(Duration::from_secs(15)).is_retryable());
        assert!(!DataSourceError::Parse("html".into()).is_retryable());
    }

    #[test]
    fn test_status_message() {
        let err = DataSourceError::Status { status: 404 };
        assert_eq!(err.to_string(), "Failed to download sheet: 404");
    }

    #[test]
    fn test_into_core_error() {
        let err: CoreError = CatalogError::from(DataSourceError::Status { status: 500 }).into();
        assert_eq!(err.code, ErrorCode::BadStatus);
        assert_eq!(err.code.category(), "DataSource");
        assert!(err.suggestion.is_some());

        let err: CoreError = CatalogError::configuration("GOOGLE_SHEET_URL is not set").into();
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert_eq!(err.exit_code(), partmatch_core::error::exit_codes::CONFIG_ERROR);
    }

    #[test]
    fn test_variants_distinguishable() {
        let err = CatalogError::from(DataSourceError::Timeout(Duration::from_secs(1)));
        assert!(matches!(err, CatalogError::DataSource(DataSourceError::Timeout(_))));
        assert!(matches!(
            CatalogError::configuration("missing"),
            CatalogError::Configuration(_)
        ));
    }
}
