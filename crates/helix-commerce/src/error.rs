//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in catalog and personalization operations.
///
/// Lookups that can miss return `Option` instead of an error.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Unknown personalization variant name.
    #[error("Unknown variant: {0}")]
    UnknownVariant(String),

    /// Catalog data failed validation.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<helix_cache::CacheError> for CommerceError {
    fn from(e: helix_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
