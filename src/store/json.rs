// src/store/json.rs
// Atomic JSON file I/O shared by the player store and the battle ledger.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};

/// Read and deserialize the whole file; a missing file yields the default.
pub fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| Error::Persistence(format!("failed to read {}: {}", path.display(), e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| Error::Persistence(format!("failed to parse {}: {}", path.display(), e)))
}

/// Serialize and write atomically: temp file, fsync, rename over the target.
pub fn write<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Persistence(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }
    }

    let json = serde_json::to_string_pretty(data)
        .map_err(|e| Error::Persistence(format!("failed to serialize: {}", e)))?;

    let tmp = path.with_extension("tmp");
    let mut file = File::create(&tmp)
        .map_err(|e| Error::Persistence(format!("failed to create {}: {}", tmp.display(), e)))?;
    file.write_all(json.as_bytes())
        .map_err(|e| Error::Persistence(format!("failed to write {}: {}", tmp.display(), e)))?;
    file.sync_all()
        .map_err(|e| Error::Persistence(format!("failed to sync {}: {}", tmp.display(), e)))?;

    fs::rename(&tmp, path).map_err(|e| {
        Error::Persistence(format!("failed to move {} into place: {}", tmp.display(), e))
    })
}
