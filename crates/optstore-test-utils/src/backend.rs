use optstore_persist::{Mapping, MemoryBackend, OptionBackend, PersistError};
use parking_lot::Mutex;
use std::sync::Arc;

/// In-memory backend that records every call made to it.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    inner: MemoryBackend,
    reads: Arc<Mutex<Vec<String>>>,
    writes: Arc<Mutex<Vec<(String, Mapping)>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_option(name: impl Into<String>, value: Mapping) -> Self {
        Self {
            inner: MemoryBackend::with_option(name, value),
            ..Self::default()
        }
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().clone()
    }

    pub fn writes(&self) -> Vec<(String, Mapping)> {
        self.writes.lock().clone()
    }

    pub fn last_write(&self) -> Option<(String, Mapping)> {
        self.writes.lock().last().cloned()
    }
}

impl OptionBackend for RecordingBackend {
    fn read(&self, name: &str) -> Result<Mapping, PersistError> {
        self.reads.lock().push(name.to_string());
        self.inner.read(name)
    }

    fn write(&self, name: &str, value: &Mapping) -> Result<(), PersistError> {
        self.writes.lock().push((name.to_string(), value.clone()));
        self.inner.write(name, value)
    }

    fn remove(&self, name: &str) -> Result<bool, PersistError> {
        self.inner.remove(name)
    }
}
