//! User settings persistence
//!
//! Remembered defaults (last release name, last namespace) live in a JSON
//! file under the platform config directory, behind the injected
//! `KeyValueStore` interface so commands never touch the path directly.

use helmview_core::FileStore;
use std::path::PathBuf;

pub const LAST_RELEASE: &str = "last-release";
pub const LAST_NAMESPACE: &str = "last-namespace";

fn settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("helmview")
        .join("settings.json")
}

/// Open the user settings store
pub fn open() -> FileStore {
    FileStore::open(settings_path())
}
