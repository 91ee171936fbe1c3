//! The layered option store.
//!
//! Values resolve from a single in-memory overlay. The overlay starts as the
//! persisted snapshot for the configured option name, and defaults files are
//! merged into it one top-level segment at a time the first time a key under
//! that segment is missing. Snapshot data for a segment is layered over the
//! file defaults when the file is read, and `set` writes straight into the
//! overlay, so precedence is: `set` > snapshot > file defaults.

mod builder;


pub use builder::LayeredStoreBuilder;

use crate::hooks::{NoopHooks, StoreHooks};
use crate::loader::{self, DEFAULT_FILE_EXTENSION};
use crate::merge::merge_values;
use crate::path::{self, KeyPath};
use crate::StoreError;
use log::{debug, info};
use optstore_persist::{Mapping, OptionBackend};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Which entries of the loaded-file registry to clear.
#[derive(Debug, Clone, Copy)]
pub enum FileSelection<'a> {
    /// Forget every loaded file.
    All,
    /// Forget one identifier.
    One(&'a str),
    /// Forget each listed identifier.
    Subset(&'a [&'a str]),
}

/// Dot-path option store layering runtime values, a persisted snapshot, and
/// lazily loaded defaults files.
pub struct LayeredStore {
    overlay: Mapping,
    snapshot: Mapping,
    loaded_files: Vec<String>,
    search_paths: Vec<PathBuf>,
    option_name: Option<String>,
    file_extension: String,
    backend: Arc<dyn OptionBackend>,
    hooks: Arc<dyn StoreHooks>,
}

impl fmt::Debug for LayeredStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredStore")
            .field("overlay", &self.overlay)
            .field("snapshot", &self.snapshot)
            .field("loaded_files", &self.loaded_files)
            .field("search_paths", &self.search_paths)
            .field("option_name", &self.option_name)
            .field("file_extension", &self.file_extension)
            .finish_non_exhaustive()
    }
}

impl LayeredStore {
    /// Create an empty store with no option name and no search paths.
    pub fn new(backend: Arc<dyn OptionBackend>) -> Self {
        Self {
            overlay: Mapping::new(),
            snapshot: Mapping::new(),
            loaded_files: Vec::new(),
            search_paths: Vec::new(),
            option_name: None,
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            backend,
            hooks: Arc::new(NoopHooks),
        }
    }

    /// Start configuring a store.
    pub fn builder(backend: Arc<dyn OptionBackend>) -> LayeredStoreBuilder {
        LayeredStoreBuilder::new(backend)
    }

    /// Read a value, loading the defaults file for the key's top-level
    /// segment if the key is not yet present.
    pub fn get(&mut self, key: &str) -> Result<Option<Value>, StoreError> {
        self.get_with_default(key, None)
    }

    /// Read a value, returning `default` when it is absent from every layer.
    pub fn get_or(&mut self, key: &str, default: Value) -> Result<Value, StoreError> {
        Ok(self
            .get_with_default(key, Some(default))?
            .unwrap_or(Value::Null))
    }

    /// Read a value and decode it into `T`.
    pub fn get_as<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, StoreError> {
        self.get(key)?
            .map(serde_json::from_value)
            .transpose()
            .map_err(StoreError::from)
    }

    /// Whether `key` resolves to a non-null value.
    pub fn has(&mut self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some_and(|value| !value.is_null()))
    }

    fn get_with_default(
        &mut self,
        key: &str,
        default: Option<Value>,
    ) -> Result<Option<Value>, StoreError> {
        let path = KeyPath::parse(key)?;
        if let Some(value) = self.hooks.shortcut(key) {
            debug!("get answered by shortcut (key={key})");
            return Ok(Some(value));
        }
        let mut value = path::resolve(&self.overlay, &path).cloned();
        if value.is_none() {
            let identifier = loader::defaults_file_name(path.root(), &self.file_extension);
            self.load(&identifier)?;
            value = path::resolve(&self.overlay, &path).cloned().or(default);
        }
        Ok(self.hooks.filter_get(value, key))
    }

    /// Write a value. A key without dots replaces the whole top-level
    /// segment; a dotted key writes into nested mappings, creating them.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let path = KeyPath::parse(key)?;
        path::set_path(&mut self.overlay, &path, value)
    }

    /// Overwrite a key with null so it reads as absent.
    pub fn unset(&mut self, key: &str) -> Result<(), StoreError> {
        self.set(key, Value::Null)
    }

    /// Merge a defaults file into the overlay.
    ///
    /// `identifier` is either a path to an existing file or a file name looked
    /// up in the search paths. Identifiers already loaded are skipped, as are
    /// ones that match no file. Returns the merged mapping stored under the
    /// file's segment when a file was read.
    pub fn load(&mut self, identifier: &str) -> Result<Option<Value>, StoreError> {
        if identifier.is_empty() {
            return Err(StoreError::InvalidArgument(
                "file identifier must be a non-empty string".to_string(),
            ));
        }
        if self.loaded_files.iter().any(|loaded| loaded == identifier) {
            debug!("defaults already loaded (id={identifier})");
            return Ok(None);
        }

        let direct = Path::new(identifier);
        let path = if direct.is_file() {
            direct.to_path_buf()
        } else {
            match loader::find_in_dirs(&self.search_paths(Some(identifier)), identifier) {
                Some(path) => path,
                None => {
                    debug!("no defaults file found (id={identifier})");
                    return Ok(None);
                }
            }
        };

        let merged = self.load_file(&path)?;
        self.loaded_files.push(identifier.to_string());
        Ok(Some(merged))
    }

    fn load_file(&mut self, path: &Path) -> Result<Value, StoreError> {
        let mut options = Value::Object(loader::read_defaults(path)?);
        let segment = loader::segment_name(path)?;
        let stored = self.snapshot.get(&segment);
        if let Some(stored @ Value::Object(_)) = stored {
            debug!("layering snapshot over defaults (segment={segment})");
            merge_values(&mut options, stored);
        }
        // Overlay values that differ from the snapshot were set at runtime and
        // must win. An unchanged non-mapping snapshot value does not hide the file.
        if let Some(current) = self
            .overlay
            .get(&segment)
            .filter(|value| !value.is_null() && Some(*value) != stored)
        {
            merge_values(&mut options, current);
        }
        self.overlay.insert(segment.clone(), options.clone());
        info!(
            "loaded defaults (segment={segment}, path={})",
            path.display()
        );
        Ok(options)
    }

    /// Search directories for `key`, after the `directories` hook.
    pub fn search_paths(&self, key: Option<&str>) -> Vec<PathBuf> {
        self.hooks.directories(self.search_paths.clone(), key)
    }

    /// Replace the search directories.
    pub fn set_search_paths<I, P>(&mut self, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Append a search directory. The directory must exist.
    pub fn add_search_path(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, StoreError> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(StoreError::InvalidArgument(format!(
                "search path is not a directory: {}",
                path.display()
            )));
        }
        self.search_paths.push(path.to_path_buf());
        Ok(self)
    }

    /// Replace the snapshot and overlay with the option stored under `name`.
    /// An absent or empty option leaves the store unchanged.
    pub fn load_snapshot(&mut self, name: &str) -> Result<(), StoreError> {
        if name.is_empty() {
            return Err(StoreError::InvalidArgument(
                "option name must be a non-empty string".to_string(),
            ));
        }
        let stored = self.backend.read(name)?;
        if stored.is_empty() {
            debug!("no stored option (name={name})");
            return Ok(());
        }
        info!("loaded snapshot (name={name}, segments={})", stored.len());
        self.overlay = stored.clone();
        self.snapshot = stored;
        Ok(())
    }

    /// Write the overlay to the backend under `name`, or the configured
    /// option name when `name` is `None`.
    pub fn persist(&self, name: Option<&str>) -> Result<(), StoreError> {
        let name = name
            .or(self.option_name.as_deref())
            .filter(|name| !name.is_empty())
            .ok_or(StoreError::MissingOptionName)?;
        let mut save = self.overlay.clone();
        for skipped in self.hooks.skip_on_persist() {
            save.remove(&skipped);
        }
        self.backend.write(name, &save)?;
        info!("persisted overlay (name={name}, segments={})", save.len());
        Ok(())
    }

    /// The snapshot last read from the backend.
    pub fn snapshot(&self) -> &Mapping {
        &self.snapshot
    }

    /// The live overlay every read resolves against.
    pub fn overlay(&self) -> &Mapping {
        &self.overlay
    }

    /// Identifiers of defaults files already merged, in load order.
    pub fn loaded_files(&self) -> &[String] {
        &self.loaded_files
    }

    /// Name the overlay persists under by default.
    pub fn option_name(&self) -> Option<&str> {
        self.option_name.as_deref()
    }

    /// Clear the overlay, the snapshot, and the loaded-file registry.
    pub fn reset(&mut self) {
        self.overlay.clear();
        self.snapshot.clear();
        self.loaded_files.clear();
    }

    /// Forget the snapshot; values already merged into the overlay stay.
    pub fn reset_snapshot(&mut self) {
        self.snapshot.clear();
    }

    /// Forget loaded files so the next miss reads them again.
    pub fn reset_loaded_files(&mut self, which: FileSelection<'_>) {
        match which {
            FileSelection::All => self.loaded_files.clear(),
            FileSelection::One(id) => self.loaded_files.retain(|loaded| loaded != id),
            FileSelection::Subset(ids) => self
                .loaded_files
                .retain(|loaded| !ids.contains(&loaded.as_str())),
        }
    }
}
