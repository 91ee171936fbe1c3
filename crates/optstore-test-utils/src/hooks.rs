use optstore_core::StoreHooks;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;

/// Hooks with canned answers, recording the keys they were asked about.
#[derive(Default)]
pub struct StubHooks {
    shortcuts: HashMap<String, Value>,
    filtered: HashMap<String, Value>,
    extra_dirs: Vec<PathBuf>,
    replace_dirs: Option<Vec<PathBuf>>,
    skip: Vec<String>,
    directory_keys: Mutex<Vec<Option<String>>>,
}

impl StubHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shortcut(mut self, key: impl Into<String>, value: Value) -> Self {
        self.shortcuts.insert(key.into(), value);
        self
    }

    pub fn with_filtered(mut self, key: impl Into<String>, value: Value) -> Self {
        self.filtered.insert(key.into(), value);
        self
    }

    pub fn with_extra_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.extra_dirs.push(dir.into());
        self
    }

    pub fn with_replaced_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.replace_dirs = Some(dirs);
        self
    }

    pub fn with_skip(mut self, segment: impl Into<String>) -> Self {
        self.skip.push(segment.into());
        self
    }

    pub fn directory_keys(&self) -> Vec<Option<String>> {
        self.directory_keys.lock().clone()
    }
}

impl StoreHooks for StubHooks {
    fn shortcut(&self, key: &str) -> Option<Value> {
        self.shortcuts.get(key).cloned()
    }

    fn directories(&self, paths: Vec<PathBuf>, key: Option<&str>) -> Vec<PathBuf> {
        self.directory_keys.lock().push(key.map(str::to_string));
        let mut paths = self.replace_dirs.clone().unwrap_or(paths);
        paths.extend(self.extra_dirs.iter().cloned());
        paths
    }

    fn filter_get(&self, value: Option<Value>, key: &str) -> Option<Value> {
        self.filtered.get(key).cloned().or(value)
    }

    fn skip_on_persist(&self) -> Vec<String> {
        self.skip.clone()
    }
}
