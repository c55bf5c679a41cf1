//! Error types for the FeedFactory API client.

use std::fmt;

use crate::query::QueryError;

/// A non-success response from the FeedFactory API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP-level error with status code.
    Http { status: u16, message: String },
    /// Authentication or authorization failure (401/403).
    Auth { message: String },
    /// The requested path does not exist (404).
    NotFound { path: String, message: String },
    /// The request was rejected as invalid (400).
    Validation { message: String },
}

impl ApiError {
    /// Returns the HTTP status associated with this error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Validation { .. } => Some(400),
            ApiError::Auth { .. } => None,
        }
    }

    /// Returns the appropriate CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http { status, message } => write!(f, "API error ({}): {}", status, message),
            ApiError::Auth { message } => write!(f, "authentication failed: {}", message),
            ApiError::NotFound { path, message } => {
                if message.is_empty() {
                    write!(f, "not found: {}", path)
                } else {
                    write!(f, "not found: {} ({})", path, message)
                }
            }
            ApiError::Validation { message } => write!(f, "request rejected: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Errors returned by [`FeedFactoryClient`](crate::client::FeedFactoryClient).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request could not be sent or the response could not be read.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response body could not be decoded.
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Filter criteria failed local validation.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// A response was valid JSON but not the shape this operation needs.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// A field required by this operation is absent from the response.
    #[error("{0}")]
    MissingField(String),

    /// The configured base URL cannot carry path segments.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    /// Returns the appropriate CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Api(e) => e.exit_code(),
            Error::Network(_) => 3,
            Error::Query(_) => 1,
            Error::Json(_) | Error::UnexpectedShape(_) | Error::MissingField(_) => 2,
            Error::InvalidUrl(_) => 5,
        }
    }
}

/// A specialized Result type for FeedFactory API operations.
pub type Result<T> = std::result::Result<T, Error>;
