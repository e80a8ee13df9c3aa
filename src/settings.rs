//! Pomodoro timer settings
//!
//! Persisted as a single JSON object in LocalStorage. Older payloads may lack
//! fields, so reads go through `PartialPomodoroSettings` and are merged onto
//! the defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pomodoro timer preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSettings {
    // === Durations (minutes) ===
    /// Length of a focus session
    pub work_duration: u32,
    /// Length of a short break
    pub short_break_duration: u32,
    /// Length of a long break
    pub long_break_duration: u32,

    // === Cycle ===
    /// Work sessions between long breaks
    pub long_break_interval: u32,
    /// Start breaks without user input
    pub auto_start_breaks: bool,
    /// Start the next work session without user input
    pub auto_start_pomodoros: bool,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_duration: 25,
            short_break_duration: 5,
            long_break_duration: 15,

            long_break_interval: 4,
            auto_start_breaks: true,
            auto_start_pomodoros: false,
        }
    }
}

/// Settings as found in storage, every field optional
///
/// Fields are kept as raw JSON so that a bad value (wrong type, fraction,
/// zero, negative, oversized) is discarded on its own instead of failing
/// the whole payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialPomodoroSettings {
    pub work_duration: Option<Value>,
    pub short_break_duration: Option<Value>,
    pub long_break_duration: Option<Value>,
    pub long_break_interval: Option<Value>,
    pub auto_start_breaks: Option<Value>,
    pub auto_start_pomodoros: Option<Value>,
}

/// Keep `value` only if it is a positive whole number that fits a `u32`
fn positive(field: &str, value: Option<&Value>) -> Option<u32> {
    let value = value?;
    let whole = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
            .map(|f| f as u64)
    });
    match whole.and_then(|v| u32::try_from(v).ok()) {
        Some(v) if v > 0 => Some(v),
        _ => {
            log::warn!("Ignoring unusable pomodoro setting {}={}", field, value);
            None
        }
    }
}

fn flag(field: &str, value: Option<&Value>) -> Option<bool> {
    let value = value?;
    let flag = value.as_bool();
    if flag.is_none() {
        log::warn!("Ignoring unusable pomodoro setting {}={}", field, value);
    }
    flag
}

impl PomodoroSettings {
    /// Defaults with every usable field of `stored` laid over them
    pub fn merged(stored: &PartialPomodoroSettings) -> Self {
        let d = Self::default();
        Self {
            work_duration: positive("workDuration", stored.work_duration.as_ref())
                .unwrap_or(d.work_duration),
            short_break_duration: positive("shortBreakDuration", stored.short_break_duration.as_ref())
                .unwrap_or(d.short_break_duration),
            long_break_duration: positive("longBreakDuration", stored.long_break_duration.as_ref())
                .unwrap_or(d.long_break_duration),
            long_break_interval: positive("longBreakInterval", stored.long_break_interval.as_ref())
                .unwrap_or(d.long_break_interval),
            auto_start_breaks: flag("autoStartBreaks", stored.auto_start_breaks.as_ref())
                .unwrap_or(d.auto_start_breaks),
            auto_start_pomodoros: flag("autoStartPomodoros", stored.auto_start_pomodoros.as_ref())
                .unwrap_or(d.auto_start_pomodoros),
        }
    }
}
