//! Interception points the host can plug into the layered store.

use serde_json::Value;
use std::path::PathBuf;

/// Host callbacks invoked synchronously at fixed points of store operations.
///
/// Every method has a pass-through default, so implementors only override the
/// points they care about.
pub trait StoreHooks: Send + Sync {
    /// Answer a `get` before any layer is consulted. Returning `Some`
    /// short-circuits resolution and the `filter_get` hook.
    fn shortcut(&self, key: &str) -> Option<Value> {
        let _ = key;
        None
    }

    /// Adjust the search directories used for a lookup. `key` is the file
    /// identifier being loaded, or `None` when the caller asked for the plain
    /// list.
    fn directories(&self, paths: Vec<PathBuf>, key: Option<&str>) -> Vec<PathBuf> {
        let _ = key;
        paths
    }

    /// Post-process the value `get` is about to return.
    fn filter_get(&self, value: Option<Value>, key: &str) -> Option<Value> {
        let _ = key;
        value
    }

    /// Top-level segments left out when the overlay is persisted.
    fn skip_on_persist(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Hooks that change nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl StoreHooks for NoopHooks {}
