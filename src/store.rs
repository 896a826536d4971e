//! Persistence boundary for config files.
//!
//! The session never touches the file system directly; it reads and writes
//! whole documents through a [`TextStore`].

use crate::error::StoreError;
use std::collections::HashMap;
use std::path::PathBuf;

/// Whole-text load/save keyed by an opaque handle.
pub trait TextStore {
    fn load_text(&self, handle: &str) -> Result<String, StoreError>;
    fn save_text(&mut self, handle: &str, text: &str) -> Result<(), StoreError>;
}

/// Files under a root directory; handles are paths relative to it.
#[derive(Clone, Debug)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsStore { root: root.into() }
    }

    fn path(&self, handle: &str) -> PathBuf {
        self.root.join(handle)
    }

    /// Handles of the `.xml` files directly under the root, sorted.
    pub fn list_xml(&self) -> Result<Vec<String>, StoreError> {
        let entries = std::fs::read_dir(&self.root).map_err(|source| StoreError {
            handle: self.root.display().to_string(),
            source,
        })?;
        let mut handles = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError {
                handle: self.root.display().to_string(),
                source,
            })?;
            let path = entry.path();
            let is_xml = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
            if is_xml && path.is_file() {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    handles.push(name.to_string());
                }
            }
        }
        handles.sort();
        Ok(handles)
    }
}

impl TextStore for FsStore {
    fn load_text(&self, handle: &str) -> Result<String, StoreError> {
        std::fs::read_to_string(self.path(handle)).map_err(|source| StoreError {
            handle: handle.to_string(),
            source,
        })
    }

    fn save_text(&mut self, handle: &str, text: &str) -> Result<(), StoreError> {
        std::fs::write(self.path(handle), text).map_err(|source| StoreError {
            handle: handle.to_string(),
            source,
        })
    }
}

/// In-memory store, mainly for tests and previews.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    files: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn with_file(mut self, handle: &str, text: &str) -> Self {
        self.files.insert(handle.to_string(), text.to_string());
        self
    }

    pub fn get(&self, handle: &str) -> Option<&str> {
        self.files.get(handle).map(String::as_str)
    }
}

impl TextStore for MemoryStore {
    fn load_text(&self, handle: &str) -> Result<String, StoreError> {
        self.files.get(handle).cloned().ok_or_else(|| StoreError {
            handle: handle.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        })
    }

    fn save_text(&mut self, handle: &str, text: &str) -> Result<(), StoreError> {
        self.files.insert(handle.to_string(), text.to_string());
        Ok(())
    }
}
