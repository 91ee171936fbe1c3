//! Persisted option storage for optstore.
//!
//! An option is a named JSON mapping. The layered store reads one option as
//! its snapshot and writes its overlay back under the same name.

pub mod backend;
pub mod error;
pub mod file;
pub mod memory;

/// Backend trait and the mapping type it stores.
pub use backend::{Mapping, OptionBackend};
/// Persistence error type.
pub use error::PersistError;
/// File-backed option storage.
pub use file::{FileBackend, OptionRecord};
/// In-memory option storage.
pub use memory::MemoryBackend;
