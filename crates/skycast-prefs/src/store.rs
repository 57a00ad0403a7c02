//! User preference store: language, last searched location, recent searches.
//!
//! Uses the storage keys the web app used, so an imported preferences blob
//! keeps working. All writes are best-effort (see [`crate::backend`]).

use crate::backend::{MemoryBackend, PrefsBackend};

/// Language codes the app ships translations for.
pub const SUPPORTED_LANGUAGES: [&str; 11] = [
    "en", "es", "fr", "de", "it", "pt", "ru", "zh", "ja", "ko", "tr",
];

pub const DEFAULT_LANGUAGE: &str = "en";

const LANGUAGE_KEY: &str = "weather-app-language";
const LAST_LOCATION_KEY: &str = "weather-app-last-location";
const RECENT_SEARCHES_KEY: &str = "weather-app-recent-searches";

/// Most-recent-first cap on stored searches.
const MAX_RECENT_SEARCHES: usize = 3;

pub struct PreferenceStore {
    backend: Box<dyn PrefsBackend>,
}

impl PreferenceStore {
    pub fn new(backend: Box<dyn PrefsBackend>) -> Self {
        Self { backend }
    }

    /// Store backed by process memory only.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    pub fn is_supported_language(code: &str) -> bool {
        SUPPORTED_LANGUAGES.contains(&code)
    }

    /// The selected language, or "en" when unset or not a supported code.
    pub fn language(&self) -> String {
        match self.backend.get(LANGUAGE_KEY) {
            Some(code) if Self::is_supported_language(&code) => code,
            Some(code) => {
                tracing::debug!("Ignoring unsupported stored language {code:?}");
                DEFAULT_LANGUAGE.to_string()
            }
            None => DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn set_language(&self, code: &str) {
        self.backend.set(LANGUAGE_KEY, code);
    }

    pub fn last_location(&self) -> Option<String> {
        self.backend.get(LAST_LOCATION_KEY)
    }

    pub fn set_last_location(&self, label: &str) {
        self.backend.set(LAST_LOCATION_KEY, label);
    }

    /// Recent search labels, most recent first. Absent or unparsable stored
    /// data yields an empty list, never an error.
    pub fn recent_searches(&self) -> Vec<String> {
        let Some(raw) = self.backend.get(RECENT_SEARCHES_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                tracing::debug!("Could not parse stored recent searches: {}", e);
                Vec::new()
            }
        }
    }

    /// Record a search: case-insensitive dedupe, newest first, capped at 3.
    /// The most recently used literal spelling wins.
    pub fn add_recent_search(&self, label: &str) {
        let normalized = label.to_lowercase();
        let mut list = self.recent_searches();
        list.retain(|entry| entry.to_lowercase() != normalized);
        list.insert(0, label.to_string());
        list.truncate(MAX_RECENT_SEARCHES);
        self.persist_recent(&list);
    }

    /// Remove an exact-match label; unknown labels are a no-op.
    pub fn remove_recent_search(&self, label: &str) {
        let list = self.recent_searches();
        let filtered: Vec<String> = list.iter().filter(|e| *e != label).cloned().collect();
        if filtered.len() != list.len() {
            self.persist_recent(&filtered);
        }
    }

    fn persist_recent(&self, list: &[String]) {
        match serde_json::to_string(list) {
            Ok(json) => self.backend.set(RECENT_SEARCHES_KEY, &json),
            Err(e) => tracing::warn!("Failed to serialize recent searches: {}", e),
        }
    }
}
