//! Storage backends for preferences.
//!
//! A backend is a flat string key/value map. Operations are best-effort:
//! an unavailable or unwritable backing store logs and no-ops rather than
//! failing the caller.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

pub trait PrefsBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Volatile backend for tests and environments without a config directory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefsBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.lock().remove(key);
    }
}

/// Backend persisting all preferences as one JSON object file.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<config_dir>/skycast/preferences.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("skycast").join("preferences.json"))
    }

    fn read_all(&self) -> HashMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                tracing::warn!("Failed to read preferences file {}: {}", self.path.display(), e);
                return HashMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(
                    "Preferences file {} is not valid JSON, starting empty: {}",
                    self.path.display(),
                    e
                );
                HashMap::new()
            }
        }
    }

    fn write_all(&self, values: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!("Failed to create preferences directory: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(values) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    tracing::warn!(
                        "Failed to write preferences file {}: {}",
                        self.path.display(),
                        e
                    );
                }
            }
            Err(e) => tracing::warn!("Failed to serialize preferences: {}", e),
        }
    }
}

impl PrefsBackend for FileBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.read_all().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.read_all();
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values);
    }

    fn remove(&self, key: &str) {
        let mut values = self.read_all();
        if values.remove(key).is_some() {
            self.write_all(&values);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn memory_backend_round_trip() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("k"), None);
        backend.set("k", "v");
        assert_eq!(backend.get("k").as_deref(), Some("v"));
        backend.remove("k");
        assert_eq!(backend.get("k"), None);
    }

    #[test]
    fn file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("prefs.json"));
        backend.set("lang", "de");
        backend.set("loc", "Berlin, DE");
        assert_eq!(backend.get("lang").as_deref(), Some("de"));

        // A fresh backend over the same file sees the persisted values.
        let reopened = FileBackend::new(dir.path().join("prefs.json"));
        assert_eq!(reopened.get("loc").as_deref(), Some("Berlin, DE"));
        reopened.remove("loc");
        assert_eq!(reopened.get("loc"), None);
        assert_eq!(reopened.get("lang").as_deref(), Some("de"));
    }

    #[test]
    fn corrupted_file_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json at all").unwrap();
        let backend = FileBackend::new(&path);
        assert_eq!(backend.get("anything"), None);
        // Writing recovers the file.
        backend.set("k", "v");
        assert_eq!(backend.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn missing_file_is_empty_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("nope").join("prefs.json"));
        assert_eq!(backend.get("k"), None);
    }
}
