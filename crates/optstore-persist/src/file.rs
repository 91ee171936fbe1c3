//! File-backed option storage, one JSON record per option.

use crate::backend::{Mapping, OptionBackend, validate_name};
use crate::error::PersistError;
use chrono::{DateTime, Utc};
use directories::BaseDirs;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const DEFAULT_ROOT_DIR: &str = ".optstore";
const DEFAULT_OPTIONS_DIR: &str = "options";

/// On-disk representation of a persisted option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionRecord {
    /// Option name the record was written under.
    pub name: String,
    /// Time of the last write.
    pub updated_at: DateTime<Utc>,
    /// Stored mapping.
    pub value: Mapping,
}

/// Option backend storing `<name>.json` files under a root directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `root`, creating the directory if needed.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, PersistError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        info!("initialized file option backend (root={})", root.display());
        Ok(Self { root })
    }

    /// Create a backend under the default root.
    pub fn open_default() -> Result<Self, PersistError> {
        Self::new(Self::default_root()?)
    }

    /// Default root: `~/.optstore/options`, or under the cwd without a home dir.
    pub fn default_root() -> Result<PathBuf, PersistError> {
        if let Some(home) = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()) {
            return Ok(home.join(DEFAULT_ROOT_DIR).join(DEFAULT_OPTIONS_DIR));
        }
        let cwd = std::env::current_dir()?;
        Ok(cwd.join(DEFAULT_ROOT_DIR).join(DEFAULT_OPTIONS_DIR))
    }

    /// Root directory for option files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn option_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }

    fn temp_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json.tmp"))
    }

    /// Load the full record for an option, if a valid one exists.
    pub fn load_record(&self, name: &str) -> Result<Option<OptionRecord>, PersistError> {
        validate_name(name)?;
        let path = self.option_path(name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(PersistError::Io(err)),
        };
        match serde_json::from_str::<OptionRecord>(&contents) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                warn!(
                    "invalid option record ignored (path={}): {err}",
                    path.display()
                );
                Ok(None)
            }
        }
    }
}

impl OptionBackend for FileBackend {
    fn read(&self, name: &str) -> Result<Mapping, PersistError> {
        let value = self
            .load_record(name)?
            .map(|record| record.value)
            .unwrap_or_default();
        debug!("read option (name={name}, keys={})", value.len());
        Ok(value)
    }

    fn write(&self, name: &str, value: &Mapping) -> Result<(), PersistError> {
        validate_name(name)?;
        let record = OptionRecord {
            name: name.to_string(),
            updated_at: Utc::now(),
            value: value.clone(),
        };
        let serialized = serde_json::to_string_pretty(&record)?;
        let path = self.option_path(name);
        let temp_path = self.temp_path(name);
        {
            let mut file = OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(&temp_path)?;
            file.write_all(serialized.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &path)?;
        debug!("wrote option (name={name}, path={})", path.display());
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<bool, PersistError> {
        validate_name(name)?;
        match fs::remove_file(self.option_path(name)) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(PersistError::Io(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FileBackend;
    use crate::{OptionBackend, PersistError};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn write_then_read_round_trips_through_disk() {
        let dir = tempdir().expect("dir");
        let backend = FileBackend::new(dir.path()).expect("backend");
        let value = json!({ "sample": { "two_level": { "b": "BDB" } } })
            .as_object()
            .cloned()
            .expect("object");

        backend.write("sample", &value).expect("write");

        let reopened = FileBackend::new(dir.path()).expect("reopen");
        assert_eq!(reopened.read("sample").expect("read"), value);
        let record = reopened
            .load_record("sample")
            .expect("record")
            .expect("present");
        assert_eq!(record.name, "sample");
        assert!(!dir.path().join("sample.json.tmp").exists());
    }

    #[test]
    fn corrupt_record_reads_empty() {
        let dir = tempdir().expect("dir");
        std::fs::write(dir.path().join("broken.json"), "not-json").expect("write");
        let backend = FileBackend::new(dir.path()).expect("backend");

        assert!(backend.read("broken").expect("read").is_empty());
    }

    #[test]
    fn rejects_names_escaping_root() {
        let dir = tempdir().expect("dir");
        let backend = FileBackend::new(dir.path()).expect("backend");

        let err = backend.read("../outside").unwrap_err();
        assert!(matches!(err, PersistError::InvalidName(_)));
    }
}
