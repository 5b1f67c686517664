// src/store/queue.rs

use std::fs;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// FIFO of pending attack targets over a newline-delimited file.
///
/// Every operation reads the whole file, drops blanks and duplicates, and
/// mutations rewrite it. Single-writer by design; do not share the file
/// across processes.
pub struct AttackQueue {
    path: PathBuf,
}

impl AttackQueue {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Current snapshot: original order, blanks removed, first occurrence wins.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let text = fs::read_to_string(&self.path).map_err(|e| {
            Error::Persistence(format!("failed to read {}: {}", self.path.display(), e))
        })?;

        let mut entries: Vec<String> = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || entries.iter().any(|e| e == line) {
                continue;
            }
            entries.push(line.to_string());
        }
        Ok(entries)
    }

    /// Append unless blank or already queued. Returns whether the entry
    /// was added.
    pub fn enqueue(&self, target: &str) -> Result<bool> {
        let target = target.trim();
        if target.is_empty() {
            return Ok(false);
        }
        let mut entries = self.list()?;
        if entries.iter().any(|e| e == target) {
            return Ok(false);
        }
        entries.push(target.to_string());
        self.write(&entries)?;
        Ok(true)
    }

    /// Pop the oldest entry; `None` on an empty queue is not an error.
    pub fn dequeue(&self) -> Result<Option<String>> {
        let mut entries = self.list()?;
        if entries.is_empty() {
            return Ok(None);
        }
        let next = entries.remove(0);
        self.write(&entries)?;
        Ok(Some(next))
    }

    fn write(&self, entries: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::Persistence(format!("failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        let mut text = entries.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        fs::write(&self.path, text).map_err(|e| {
            Error::Persistence(format!("failed to write {}: {}", self.path.display(), e))
        })
    }
}
