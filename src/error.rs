//! Error types for the record store.

use thiserror::Error;

/// Main error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource error: {0}")]
    Resource(String),

    #[error("Resource is locked by another handle")]
    Locked,

    #[error("Store is closed")]
    Closed,

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Checksum mismatch: expected {expected}, got {got}")]
    ChecksumMismatch { expected: u32, got: u32 },

    #[error("Table already exists: {0}")]
    TableExists(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),
}

/// Broad category of a [`StoreError`].
///
/// Callers that only care whether a failure came from the backing resource,
/// from using a closed store, or from malformed persisted content can match
/// on this instead of every variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The backing handle is invalid, unreadable or unwritable.
    Resource,
    /// An operation other than `close` was called on a closed store.
    Liveness,
    /// Persisted content could not be encoded or decoded.
    Codec,
    /// A table lookup or creation failed.
    Table,
}

impl StoreError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Io(_) | StoreError::Resource(_) | StoreError::Locked => {
                ErrorKind::Resource
            }
            StoreError::Closed => ErrorKind::Liveness,
            StoreError::Codec(_) | StoreError::ChecksumMismatch { .. } => ErrorKind::Codec,
            StoreError::TableExists(_) | StoreError::TableNotFound(_) => ErrorKind::Table,
        }
    }

    pub(crate) fn resource_closed() -> Self {
        StoreError::Resource("resource closed".into())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Codec(e.to_string())
    }
}

impl From<rmp_serde::encode::Error> for StoreError {
    fn from(e: rmp_serde::encode::Error) -> Self {
        StoreError::Codec(e.to_string())
    }
}

impl From<rmp_serde::decode::Error> for StoreError {
    fn from(e: rmp_serde::decode::Error) -> Self {
        StoreError::Codec(e.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
