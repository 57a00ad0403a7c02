//! Preference storage for Skycast
//!
//! Persists the selected language, the last searched location, and up to
//! three recent search labels behind a pluggable storage backend.

pub mod backend;
pub mod store;

pub use backend::{FileBackend, MemoryBackend, PrefsBackend};
pub use store::{PreferenceStore, DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES};
