//! Error types and result aliases for registry operations.
//!
//! Every failure a registry call can produce is one of three kinds: a
//! malformed request URL, a transport failure, or a body that does not decode
//! into the expected schema.

use serde_json::error::Category;
use thiserror::Error;

/// Unified error type for all registry client operations
#[derive(Error, Debug)]
pub enum PackagistError {
    #[error("Invalid registry URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Failed to decode registry response: {message}")]
    Decode {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for registry operations
pub type PackagistResult<T> = Result<T, PackagistError>;

impl PackagistError {
    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create a decode error, keeping the parser's own description
    pub fn decode(source: serde_json::Error) -> Self {
        Self::Decode {
            message: source.to_string(),
            source,
        }
    }

    /// True when the body ended before a complete JSON value was read
    pub fn is_eof(&self) -> bool {
        match self {
            PackagistError::Decode { source, .. } => source.classify() == Category::Eof,
            _ => false,
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PackagistError::Network { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            PackagistError::InvalidUrl { .. } => {
                Some("Check the configured registry host, e.g. https://packagist.org")
            },
            PackagistError::Network { .. } => Some("Check your internet connection and try again"),
            PackagistError::Decode { .. } if self.is_eof() => {
                Some("The registry response was cut short; try the request again")
            },
            PackagistError::Decode { .. } => None,
        }
    }
}
