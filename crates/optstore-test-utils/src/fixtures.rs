use optstore_persist::Mapping;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Build a mapping from a `json!` object literal.
pub fn mapping(value: Value) -> Mapping {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Temporary directory holding defaults files.
pub struct DefaultsDir {
    dir: TempDir,
}

impl DefaultsDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("defaults dir"),
        }
    }

    /// Directory with the `sample` defaults used across the store tests.
    pub fn with_sample() -> Self {
        let dir = Self::new();
        dir.write(
            "sample.json5",
            r#"{
                // Defaults for the sample segment.
                bar: "Bar",
                two_level: { a: "A", b: "B" },
                three_level: { c: "C", d: { e: "Eheheh!" } },
            }"#,
        );
        dir
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the directory, returning its full path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("defaults parent");
        }
        fs::write(&path, contents).expect("write defaults");
        path
    }
}

impl Default for DefaultsDir {
    fn default() -> Self {
        Self::new()
    }
}
