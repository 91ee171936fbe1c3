//! IO helpers for reading defaults files from disk.

use crate::StoreError;
use log::debug;
use optstore_persist::Mapping;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension appended to a segment name to find its defaults file.
pub const DEFAULT_FILE_EXTENSION: &str = "json5";

/// File identifier searched for when `segment` is first read.
pub(crate) fn defaults_file_name(segment: &str, extension: &str) -> String {
    if extension.is_empty() {
        return segment.to_string();
    }
    format!("{segment}.{extension}")
}

/// Parse a defaults file into a mapping. JSON5 is read as data only.
pub(crate) fn read_defaults(path: &Path) -> Result<Mapping, StoreError> {
    debug!("reading defaults file (path={})", path.display());
    let contents = fs::read_to_string(path)?;
    match json5::from_str::<Value>(&contents)? {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}

/// Top-level segment a defaults file populates: its name without extension.
pub(crate) fn segment_name(path: &Path) -> Result<String, StoreError> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| {
            StoreError::InvalidArgument(format!(
                "defaults path has no file name: {}",
                path.display()
            ))
        })
}

/// First directory in `dirs` that holds a file named `identifier`.
pub(crate) fn find_in_dirs(dirs: &[PathBuf], identifier: &str) -> Option<PathBuf> {
    dirs.iter().map(|dir| dir.join(identifier)).find(|path| {
        let found = path.is_file();
        if !found {
            debug!("defaults file not in search path (path={})", path.display());
        }
        found
    })
}
