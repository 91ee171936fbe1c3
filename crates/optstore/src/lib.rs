//! Layered dot-path option storage.
//!
//! This crate re-exports the store and the persistence backends, plus a small
//! logging helper and a constructor for the common file-backed setup.

/// Re-export for convenience.
pub use optstore_core as core;
/// Re-export for convenience.
pub use optstore_persist as persist;

pub use optstore_core::{
    ErrorKind, FileSelection, LayeredStore, LayeredStoreBuilder, NoopHooks, StoreError,
    StoreHooks,
};
pub use optstore_persist::{FileBackend, Mapping, MemoryBackend, OptionBackend};

use log::debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}

/// Open a store persisting to the default file backend root, reading its
/// snapshot from `option_name` and defaults from `search_paths`.
pub fn open_default<I, P>(option_name: &str, search_paths: I) -> Result<LayeredStore, StoreError>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    open_at(FileBackend::default_root()?, option_name, search_paths)
}

/// Open a store persisting to a file backend under `root`.
pub fn open_at<I, P>(
    root: impl AsRef<Path>,
    option_name: &str,
    search_paths: I,
) -> Result<LayeredStore, StoreError>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let backend = FileBackend::new(root)?;
    debug!(
        "opening store on file backend (root={})",
        backend.root().display()
    );
    LayeredStore::builder(Arc::new(backend))
        .option_name(option_name)
        .search_paths(search_paths)
        .build()
}
