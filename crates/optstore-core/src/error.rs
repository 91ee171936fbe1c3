//! Error types for layered store operations.

use optstore_persist::PersistError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by `LayeredStore` and its helpers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The caller passed an unusable key, name, or path.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A defaults file parsed but did not contain a mapping.
    #[error("defaults file does not contain a mapping: {}", path.display())]
    NotAMapping { path: PathBuf },
    /// `persist` was called without a name and none was configured.
    #[error("persist needs an option name")]
    MissingOptionName,
    /// A nested set walked into a leaf that is not a mapping.
    #[error("cannot set {key}: {segment} is not a mapping")]
    NotTraversable { key: String, segment: String },
    /// Reading a defaults file failed.
    #[error("failed to read defaults: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// Parsing a defaults file failed.
    #[error("failed to parse defaults: {0}")]
    ParseFailed(#[from] json5::Error),
    /// Converting a stored value to a typed value failed.
    #[error("failed to decode value: {0}")]
    DecodeFailed(#[from] serde_json::Error),
    /// The option backend failed.
    #[error("option backend error: {0}")]
    Persist(#[from] PersistError),
}

/// Broad classification of a `StoreError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller contract violation.
    InvalidArgument,
    /// External content has the wrong shape.
    Domain,
    /// Operation impossible in the current state.
    Logic,
    /// Filesystem, parse, or backend failure.
    Io,
}

impl StoreError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            StoreError::Persist(PersistError::InvalidName(_)) => ErrorKind::InvalidArgument,
            StoreError::NotAMapping { .. } => ErrorKind::Domain,
            StoreError::MissingOptionName | StoreError::NotTraversable { .. } => ErrorKind::Logic,
            StoreError::ReadFailed(_)
            | StoreError::ParseFailed(_)
            | StoreError::DecodeFailed(_)
            | StoreError::Persist(_) => ErrorKind::Io,
        }
    }
}
