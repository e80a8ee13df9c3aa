//! Save/load of every persisted collection
//!
//! Features:
//! - Tasks, notes and pomodoro settings as JSON, language as a bare code
//! - Timestamp reconstruction for notes
//! - Default-merge for settings written by older versions
//! - Missing storage, absent keys and corrupt payloads degrade to defaults
//!
//! Getters never fail. Each has a `load_*` twin returning `Loaded`, which
//! records whether the value came from storage or is a fallback.

pub mod codec;

use crate::consts;
use crate::i18n::Language;
use crate::note::Note;
use crate::platform::{KeyValueStore, StorageError};
use crate::settings::PomodoroSettings;
use crate::task::Task;

use codec::{CodecError, Collection};

/// Storage keys for each collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub tasks: String,
    pub notes: String,
    pub pomodoro_settings: String,
    pub language: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            tasks: consts::TASKS_KEY.to_string(),
            notes: consts::NOTES_KEY.to_string(),
            pomodoro_settings: consts::POMODORO_SETTINGS_KEY.to_string(),
            language: consts::LANGUAGE_KEY.to_string(),
        }
    }
}

impl StorageKeys {
    /// Default keys, each prefixed with `prefix`
    pub fn with_prefix(prefix: &str) -> Self {
        let d = Self::default();
        Self {
            tasks: format!("{}{}", prefix, d.tasks),
            notes: format!("{}{}", prefix, d.notes),
            pomodoro_settings: format!("{}{}", prefix, d.pomodoro_settings),
            language: format!("{}{}", prefix, d.language),
        }
    }
}

/// Why a fallback value was handed out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No storage medium in this context (server render, native build)
    NoStorage,
    /// Key never written, or written empty
    Missing,
    /// Stored payload could not be decoded
    Malformed(String),
    /// The medium refused the read
    ReadFailed(StorageError),
}

/// A loaded value and where it came from
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    Stored(T),
    Fallback { value: T, reason: FallbackReason },
}

impl<T> Loaded<T> {
    pub fn into_inner(self) -> T {
        match self {
            Loaded::Stored(value) | Loaded::Fallback { value, .. } => value,
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Loaded::Stored(value) | Loaded::Fallback { value, .. } => value,
        }
    }

    pub fn is_stored(&self) -> bool {
        matches!(self, Loaded::Stored(_))
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Loaded::Stored(_) => None,
            Loaded::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Persistence gateway over a key-value store
///
/// Without a store every read yields the fallback and every write is dropped.
#[derive(Debug)]
pub struct Gateway<S> {
    store: Option<S>,
    keys: StorageKeys,
}

impl<S: KeyValueStore> Gateway<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Some(store),
            keys: StorageKeys::default(),
        }
    }

    /// Gateway for a context with no storage medium
    pub fn unavailable() -> Self {
        Self {
            store: None,
            keys: StorageKeys::default(),
        }
    }

    pub fn with_keys(mut self, keys: StorageKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    /// Raw non-empty payload under `key`
    fn read_raw(&self, key: &str) -> Result<String, FallbackReason> {
        let store = self.store.as_ref().ok_or(FallbackReason::NoStorage)?;
        match store.get_item(key) {
            Ok(Some(raw)) if !raw.is_empty() => Ok(raw),
            Ok(_) => Err(FallbackReason::Missing),
            Err(e) => {
                log::warn!("{}", e);
                Err(FallbackReason::ReadFailed(e))
            }
        }
    }

    fn load_with<T>(
        &self,
        key: &str,
        decode: impl FnOnce(&str) -> Result<T, CodecError>,
        fallback: impl FnOnce() -> T,
    ) -> Loaded<T> {
        let raw = match self.read_raw(key) {
            Ok(raw) => raw,
            Err(reason) => {
                return Loaded::Fallback {
                    value: fallback(),
                    reason,
                };
            }
        };

        match decode(&raw) {
            Ok(value) => Loaded::Stored(value),
            Err(e) => {
                log::error!("Failed to parse {} from LocalStorage: {}", key, e);
                Loaded::Fallback {
                    value: fallback(),
                    reason: FallbackReason::Malformed(e.to_string()),
                }
            }
        }
    }

    /// Overwrite `key`; failures are logged and dropped
    fn write_raw(&self, key: &str, collection: Collection, encoded: Result<String, CodecError>) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        let payload = match encoded {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };
        match store.set_item(key, &payload) {
            Ok(()) => log::debug!("Saved {} ({} bytes)", collection, payload.len()),
            Err(e) => log::warn!("{}", e),
        }
    }

    // === Tasks ===

    pub fn load_tasks(&self) -> Loaded<Vec<Task>> {
        self.load_with(&self.keys.tasks, codec::decode_tasks, Vec::new)
    }

    pub fn get_tasks(&self) -> Vec<Task> {
        self.load_tasks().into_inner()
    }

    /// Replace the whole task list
    pub fn save_tasks(&self, tasks: &[Task]) {
        self.write_raw(&self.keys.tasks, Collection::Tasks, codec::encode_tasks(tasks));
    }

    /// Replace the task list from its JSON form, as sent by the page scripts
    pub fn save_tasks_json(&self, json: &str) -> Result<(), CodecError> {
        let tasks = codec::decode_tasks(json)?;
        self.save_tasks(&tasks);
        Ok(())
    }

    // === Notes ===

    pub fn load_notes(&self) -> Loaded<Vec<Note>> {
        self.load_with(&self.keys.notes, codec::decode_notes, Vec::new)
    }

    pub fn get_notes(&self) -> Vec<Note> {
        self.load_notes().into_inner()
    }

    /// Replace the whole note list
    pub fn save_notes(&self, notes: &[Note]) {
        self.write_raw(&self.keys.notes, Collection::Notes, codec::encode_notes(notes));
    }

    pub fn save_notes_json(&self, json: &str) -> Result<(), CodecError> {
        let notes = codec::decode_notes(json)?;
        self.save_notes(&notes);
        Ok(())
    }

    // === Pomodoro settings ===

    pub fn load_pomodoro_settings(&self) -> Loaded<PomodoroSettings> {
        self.load_with(
            &self.keys.pomodoro_settings,
            codec::decode_settings,
            PomodoroSettings::default,
        )
    }

    pub fn get_pomodoro_settings(&self) -> PomodoroSettings {
        self.load_pomodoro_settings().into_inner()
    }

    /// Store `settings` as given, no merge with what was there
    pub fn save_pomodoro_settings(&self, settings: &PomodoroSettings) {
        self.write_raw(
            &self.keys.pomodoro_settings,
            Collection::PomodoroSettings,
            codec::encode_settings(settings),
        );
    }

    /// Store a complete settings record given as JSON
    pub fn save_pomodoro_settings_json(&self, json: &str) -> Result<(), CodecError> {
        let settings = codec::decode_complete_settings(json)?;
        self.save_pomodoro_settings(&settings);
        Ok(())
    }

    // === Language ===

    pub fn load_language(&self) -> Loaded<Language> {
        self.load_with(&self.keys.language, codec::decode_language, Language::default)
    }

    pub fn get_language(&self) -> Language {
        self.load_language().into_inner()
    }

    pub fn save_language(&self, language: Language) {
        self.write_raw(
            &self.keys.language,
            Collection::Language,
            Ok(codec::encode_language(language)),
        );
    }
}

#[cfg(target_arch = "wasm32")]
impl Gateway<crate::platform::LocalStorage> {
    /// Gateway over `window.localStorage`, unavailable when there is none
    pub fn browser() -> Self {
        match crate::platform::LocalStorage::from_window() {
            Some(storage) => Self::new(storage),
            None => {
                log::warn!("LocalStorage unavailable, nothing will be persisted");
                Self::unavailable()
            }
        }
    }
}
