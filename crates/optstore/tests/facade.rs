//! Tests for the public facade.

use optstore::{FileBackend, LayeredStore, OptionBackend, init_logging, open_at};
use optstore_test_utils::DefaultsDir;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

/// Logging setup tolerates repeated calls.
#[test]
fn init_logging_is_repeatable() {
    init_logging();
    init_logging();
}

/// Re-exported types assemble a store that persists through the file backend.
#[test]
fn facade_types_build_a_working_store() {
    let options = TempDir::new().expect("options");
    let defaults = DefaultsDir::with_sample();
    let backend = Arc::new(FileBackend::new(options.path()).expect("backend"));

    let mut store = LayeredStore::builder(backend.clone())
        .option_name("app")
        .search_path(defaults.path())
        .build()
        .expect("store");
    assert_eq!(store.get("sample.bar").expect("get"), Some(json!("Bar")));
    store.persist(None).expect("persist");

    let stored = backend.read("app").expect("read");
    assert_eq!(stored.get("sample").and_then(|s| s.get("bar")), Some(&json!("Bar")));
}

/// A store opened on a backend root reads back what an earlier store persisted.
#[test]
fn open_at_reopens_persisted_options() {
    let options = TempDir::new().expect("options");
    let defaults = DefaultsDir::with_sample();

    let mut first = open_at(options.path(), "app", [defaults.path()]).expect("first");
    first.set("sample.bar", json!("saved")).expect("set");
    first.persist(None).expect("persist");

    let mut second = open_at(options.path(), "app", [defaults.path()]).expect("second");
    assert_eq!(second.option_name(), Some("app"));
    assert_eq!(second.get("sample.bar").expect("get"), Some(json!("saved")));
    assert_eq!(
        second.get("sample.two_level.a").expect("get"),
        Some(json!("A"))
    );
    assert!(options.path().join("app.json").is_file());
}
