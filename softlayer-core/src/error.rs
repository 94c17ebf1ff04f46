//! Error and result types shared by the policy engine and store backends.
//!
//! Use [`SoftStoreResult<T>`] as the return type for fallible operations.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// All errors surfaced by the soft-delete layer.
///
/// [`Configuration`](SoftStoreError::Configuration) is raised synchronously
/// while resolving registration options and prevents the entity from being
/// registered. Every other variant originates in the delegated store call
/// and is passed through unchanged; the policy engine never reinterprets
/// backend failures.
#[derive(Error, Debug)]
pub enum SoftStoreError {
    /// Invalid or missing options at registration time (empty marker field,
    /// producer without a declared type, null/false marker literal, missing
    /// flag field on a flag-based configuration).
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Serialization/deserialization error when converting between document
    /// formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A document with the given ID already exists in the collection.
    #[error("Document {0} already exists in collection {1}")]
    DocumentAlreadyExists(String, String),
    /// The requested document was not found in the collection.
    #[error("Document not found {0} in collection {1}")]
    DocumentNotFound(String, String),
    /// The requested collection does not exist in the store.
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),
    /// The document violates schema constraints or has invalid structure.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for soft-delete store operations.
pub type SoftStoreResult<T> = Result<T, SoftStoreError>;

impl From<BsonError> for SoftStoreError {
    fn from(err: BsonError) -> Self {
        SoftStoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for SoftStoreError {
    fn from(err: SerdeJsonError) -> Self {
        SoftStoreError::Serialization(err.to_string())
    }
}
