//! Error types for option backends.

/// Errors returned by option backends.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Option name cannot be used as a storage key.
    #[error("invalid option name: {0:?}")]
    InvalidName(String),
}
