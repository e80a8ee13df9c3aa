//! Platform abstraction layer
//!
//! The key-value storage medium behind the persistence gateway:
//! - `KeyValueStore`: get/set-by-key port
//! - `MemoryStore`: in-process store (native builds, tests)
//! - `LocalStorage`: browser `window.localStorage` (WASM only)

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;

/// Failure reported by a storage medium
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The medium refused to return a value (e.g. access denied)
    #[error("failed to read `{key}`: {reason}")]
    Read { key: String, reason: String },
    /// The medium refused to store a value (e.g. quota exceeded)
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
}

/// A string-keyed, string-valued store shared by every consumer in a session
pub trait KeyValueStore {
    /// Raw value under `key`, `None` when the key was never written
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value under `key`
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

/// In-memory storage
///
/// Single-threaded like the browser medium it stands in for.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys written so far
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// LocalStorage of the current window, `None` outside a browser context
    /// or when the page is denied storage access
    pub fn from_window() -> Option<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;
        Some(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(|e| StorageError::Read {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}
