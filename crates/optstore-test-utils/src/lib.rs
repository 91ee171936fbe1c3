//! Test helpers shared across optstore crates.

pub mod backend;
pub mod fixtures;
pub mod hooks;

pub use backend::RecordingBackend;
pub use fixtures::{DefaultsDir, mapping};
pub use hooks::StubHooks;
