//! In-memory option backend.

use crate::backend::{Mapping, OptionBackend, validate_name};
use crate::error::PersistError;
use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Process-local option storage. Clones share the same map.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    options: Arc<RwLock<HashMap<String, Mapping>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend seeded with a single option.
    pub fn with_option(name: impl Into<String>, value: Mapping) -> Self {
        let backend = Self::new();
        backend.options.write().insert(name.into(), value);
        backend
    }

    /// List stored option names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.options.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl OptionBackend for MemoryBackend {
    fn read(&self, name: &str) -> Result<Mapping, PersistError> {
        validate_name(name)?;
        Ok(self.options.read().get(name).cloned().unwrap_or_default())
    }

    fn write(&self, name: &str, value: &Mapping) -> Result<(), PersistError> {
        validate_name(name)?;
        debug!("writing option (name={name}, keys={})", value.len());
        self.options.write().insert(name.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<bool, PersistError> {
        validate_name(name)?;
        Ok(self.options.write().remove(name).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryBackend;
    use crate::OptionBackend;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn mapping(value: serde_json::Value) -> crate::Mapping {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn missing_option_reads_empty() {
        let backend = MemoryBackend::new();
        assert!(backend.read("absent").expect("read").is_empty());
        assert!(!backend.contains("absent").expect("contains"));
    }

    #[test]
    fn clones_share_storage() {
        let backend = MemoryBackend::new();
        let other = backend.clone();
        backend
            .write("site", &mapping(json!({ "title": "Hello" })))
            .expect("write");

        assert_eq!(
            other.read("site").expect("read"),
            mapping(json!({ "title": "Hello" }))
        );
        assert_eq!(other.names(), vec!["site".to_string()]);
    }

    #[test]
    fn remove_reports_presence() {
        let backend = MemoryBackend::with_option("site", mapping(json!({ "a": 1 })));
        assert!(backend.remove("site").expect("remove"));
        assert!(!backend.remove("site").expect("remove again"));
    }
}
