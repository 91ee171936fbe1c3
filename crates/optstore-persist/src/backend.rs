//! Option backend abstraction.

use crate::error::PersistError;
use serde_json::Value;

/// A persisted option value: a JSON object keyed by top-level segment.
pub type Mapping = serde_json::Map<String, Value>;

/// Named key/value storage the layered store reads snapshots from and
/// persists overlays to.
pub trait OptionBackend: Send + Sync {
    /// Read an option by name. Absent options read as an empty mapping.
    fn read(&self, name: &str) -> Result<Mapping, PersistError>;

    /// Replace the option stored under `name`.
    fn write(&self, name: &str, value: &Mapping) -> Result<(), PersistError>;

    /// Remove an option, returning whether it existed.
    fn remove(&self, name: &str) -> Result<bool, PersistError>;

    /// Whether an option with this name holds any data.
    fn contains(&self, name: &str) -> Result<bool, PersistError> {
        Ok(!self.read(name)?.is_empty())
    }
}

/// Reject names that cannot be used as a single storage key.
pub(crate) fn validate_name(name: &str) -> Result<(), PersistError> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.contains('\0')
    {
        return Err(PersistError::InvalidName(name.to_string()));
    }
    Ok(())
}
