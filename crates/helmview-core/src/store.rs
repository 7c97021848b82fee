//! Key-value settings storage
//!
//! User-level settings (last release name, last namespace) go through an
//! injected store interface instead of an ambient global, so callers can
//! swap the backing for tests or run without persistence at all.

use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Injected persistence interface
pub trait KeyValueStore {
    /// Read a value, None if absent
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a value
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// JSON-file-backed store
///
/// The whole document is loaded eagerly and written back on every mutation.
/// A missing or unreadable file starts empty rather than erroring; settings
/// are convenience state, not data the caller can recover from losing.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open a store at the given path, creating parent directories lazily
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = std::fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str::<JsonValue>(&content).ok())
            .and_then(|value| match value {
                JsonValue::Object(map) => Some(
                    map.into_iter()
                        .filter_map(|(k, v)| match v {
                            JsonValue::String(s) => Some((k, s)),
                            _ => None,
                        })
                        .collect(),
                ),
                _ => None,
            })
            .unwrap_or_default();

        Self { path, entries }
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let map: serde_json::Map<String, JsonValue> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), JsonValue::String(v.clone())))
            .collect();
        let content = serde_json::to_string_pretty(&JsonValue::Object(map))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let mut store = FileStore::open(&path);
        assert!(store.get("release").is_none());

        store.set("release", "myapp").unwrap();
        store.set("namespace", "staging").unwrap();
        assert_eq!(store.get("release").as_deref(), Some("myapp"));

        // A fresh store reads what the first one wrote
        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("release").as_deref(), Some("myapp"));
        assert_eq!(reopened.get("namespace").as_deref(), Some("staging"));
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let mut store = FileStore::open(&path);
        store.set("key", "value").unwrap();
        store.remove("key").unwrap();
        assert!(store.get("key").is_none());

        let reopened = FileStore::open(&path);
        assert!(reopened.get("key").is_none());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json at all{{").unwrap();

        let store = FileStore::open(&path);
        assert!(store.get("anything").is_none());
    }
}
