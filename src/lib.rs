//! Muslim Task Manager - local persistence core
//!
//! Core modules:
//! - `persistence`: Save/load of tasks, notes and settings with hydration
//! - `platform`: Key-value storage port (LocalStorage on web)
//! - `task`, `note`, `settings`: Persisted records
//! - `i18n`: Language preference, text direction, string lookup
//! - `pomodoro`: Work/break sequencing
//! - `worship`: Predefined worship tasks

pub mod i18n;
pub mod logging;
pub mod note;
pub mod persistence;
pub mod platform;
pub mod pomodoro;
pub mod settings;
pub mod task;
pub mod worship;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use i18n::{Language, LanguageContext, TextDirection, Translations};
pub use note::Note;
pub use persistence::{FallbackReason, Gateway, Loaded, StorageKeys};
pub use platform::{KeyValueStore, MemoryStore, StorageError};
pub use settings::PomodoroSettings;
pub use task::{Priority, Task, Weekday};

/// Storage key constants
pub mod consts {
    /// Task list
    pub const TASKS_KEY: &str = "muslim_task_manager_tasks";
    /// Note list
    pub const NOTES_KEY: &str = "muslim_task_manager_notes";
    /// Pomodoro settings record
    pub const POMODORO_SETTINGS_KEY: &str = "muslim_task_manager_pomodoro_settings";
    /// UI language, shared with the page shell so it carries no app prefix
    pub const LANGUAGE_KEY: &str = "language";
}
