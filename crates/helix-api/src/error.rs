//! Endpoint error types.

use http::StatusCode;
use thiserror::Error;

/// Failures of a [`ProductSource`](crate::ProductSource).
#[derive(Error, Debug)]
pub enum SourceError {
    /// The backing service could not be reached.
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// The backing service answered with something unusable.
    #[error("Invalid source data: {0}")]
    InvalidData(String),

    /// The request took too long.
    #[error("Source timed out")]
    Timeout,
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::InvalidData(e.to_string())
    }
}

/// Everything the endpoint can answer with besides success.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Product with ID {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Source(_) | ApiError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand to the caller. Internal failures are not
    /// described beyond their status.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::Source(_) | ApiError::Json(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}
