//! Builder for assembling a `LayeredStore`.

use super::LayeredStore;
use crate::StoreError;
use crate::hooks::StoreHooks;
use log::debug;
use optstore_persist::OptionBackend;
use std::path::PathBuf;
use std::sync::Arc;

/// Builder for a `LayeredStore` with an option name, hooks, and search paths.
pub struct LayeredStoreBuilder {
    store: LayeredStore,
}

impl LayeredStoreBuilder {
    /// Create a builder seeded with an empty store on `backend`.
    pub fn new(backend: Arc<dyn OptionBackend>) -> Self {
        Self {
            store: LayeredStore::new(backend),
        }
    }

    /// Name the option the snapshot is read from and the overlay persists to.
    pub fn option_name(mut self, name: impl Into<String>) -> Self {
        self.store.option_name = Some(name.into());
        self
    }

    /// Install host hooks.
    pub fn hooks(mut self, hooks: Arc<dyn StoreHooks>) -> Self {
        self.store.hooks = hooks;
        self
    }

    /// Append a search directory. Existence is not checked.
    pub fn search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store.search_paths.push(path.into());
        self
    }

    /// Append several search directories in order.
    pub fn search_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.store
            .search_paths
            .extend(paths.into_iter().map(Into::into));
        self
    }

    /// Extension used to turn a segment name into a defaults file name.
    /// An empty extension searches for the bare segment name.
    pub fn file_extension(mut self, extension: impl Into<String>) -> Self {
        let extension: String = extension.into();
        self.store.file_extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Finish the store, reading the snapshot when an option name was given.
    pub fn build(self) -> Result<LayeredStore, StoreError> {
        let mut store = self.store;
        if let Some(name) = store.option_name.clone() {
            store.load_snapshot(&name)?;
        }
        debug!(
            "built layered store (option={:?}, search_paths={})",
            store.option_name,
            store.search_paths.len()
        );
        Ok(store)
    }
}
