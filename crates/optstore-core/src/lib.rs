//! Layered dot-path option storage.
//!
//! This crate owns the `LayeredStore`, which resolves dot-separated keys
//! against runtime values, a persisted snapshot, and defaults files loaded on
//! demand from a list of search directories.

mod error;
mod hooks;
mod loader;
mod merge;
mod path;
mod store;

/// Public error type and its classification.
pub use error::{ErrorKind, StoreError};
/// Host interception points.
pub use hooks::{NoopHooks, StoreHooks};
/// Default defaults-file extension.
pub use loader::DEFAULT_FILE_EXTENSION;
/// Recursive value merge.
pub use merge::merge_values;
/// Key path parsing and walks.
pub use path::{KeyPath, SEGMENT_SEPARATOR, resolve, set_path};
/// The store and its builder.
pub use store::{FileSelection, LayeredStore, LayeredStoreBuilder};
/// Re-exported so hosts can implement backends without a direct dependency.
pub use optstore_persist::{Mapping, OptionBackend};
