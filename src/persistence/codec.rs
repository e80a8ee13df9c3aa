//! Encode/decode pairs for every persisted record
//!
//! Notes are the only entity whose in-memory shape differs from the stored
//! one: timestamps are ISO-8601 strings on disk and `DateTime<Utc>` in memory.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::i18n::Language;
use crate::note::Note;
use crate::settings::{PartialPomodoroSettings, PomodoroSettings};
use crate::task::Task;

/// Which persisted dataset a payload belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Tasks,
    Notes,
    PomodoroSettings,
    Language,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Collection::Tasks => "tasks",
            Collection::Notes => "notes",
            Collection::PomodoroSettings => "pomodoro settings",
            Collection::Language => "language",
        })
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed {collection} payload: {source}")]
    Decode {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {collection}: {source}")]
    Encode {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed {collection} payload: expected a JSON {expected}")]
    Shape {
        collection: Collection,
        expected: &'static str,
    },

    #[error("unknown language code `{0}`")]
    UnknownLanguage(String),
}

impl CodecError {
    fn decode(collection: Collection) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| CodecError::Decode { collection, source }
    }

    fn encode(collection: Collection) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| CodecError::Encode { collection, source }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised timestamp {0}")]
pub struct TimestampError(pub String);

// === Lenient fields ===

/// Any JSON scalar as text; `null` as empty
pub(crate) fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// JSON booleans as-is, anything else false
pub(crate) fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// Decode a JSON array entry by entry
///
/// Only a payload that isn't an array fails. Entries that aren't objects
/// are skipped with a warning.
fn decode_entries<T: DeserializeOwned>(json: &str, collection: Collection) -> Result<Vec<T>, CodecError> {
    let entries = match serde_json::from_str::<Value>(json).map_err(CodecError::decode(collection))? {
        Value::Array(entries) => entries,
        _ => {
            return Err(CodecError::Shape {
                collection,
                expected: "array",
            });
        }
    };

    let total = entries.len();
    let decoded: Vec<T> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            if !entry.is_object() {
                log::warn!("Skipping {} entry {}: not an object", collection, i);
                return None;
            }
            match serde_json::from_value(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    log::warn!("Skipping {} entry {}: {}", collection, i, e);
                    None
                }
            }
        })
        .collect();
    log::debug!("Decoded {}/{} {}", decoded.len(), total, collection);
    Ok(decoded)
}

// === Tasks ===

pub fn encode_tasks(tasks: &[Task]) -> Result<String, CodecError> {
    serde_json::to_string(tasks).map_err(CodecError::encode(Collection::Tasks))
}

pub fn decode_tasks(json: &str) -> Result<Vec<Task>, CodecError> {
    decode_entries(json, Collection::Tasks)
}

// === Notes ===

/// Note as stored: timestamps left raw until reconstructed
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    content: String,
    #[serde(default)]
    created_at: Value,
    #[serde(default)]
    updated_at: Value,
}

/// Timestamp in the form `Date.prototype.toISOString` writes
pub fn encode_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Rebuild a timestamp from its stored form
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as UTC), a
/// bare `YYYY-MM-DD` (midnight UTC) or a number of epoch milliseconds.
pub fn decode_timestamp(raw: &Value) -> Result<DateTime<Utc>, TimestampError> {
    let invalid = || TimestampError(raw.to_string());
    match raw {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(at) = DateTime::parse_from_rfc3339(s) {
                return Ok(at.with_timezone(&Utc));
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                return Ok(naive.and_utc());
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
                .ok_or_else(invalid)
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// `decode_timestamp` cut to milliseconds, clamping anything unreadable to
/// the Unix epoch
fn reconstruct_timestamp(note_id: &str, field: &str, raw: &Value) -> DateTime<Utc> {
    match decode_timestamp(raw) {
        Ok(at) => at.trunc_subsecs(3),
        Err(e) => {
            log::warn!("Note {}: {} ({}), using epoch", note_id, e, field);
            DateTime::<Utc>::default()
        }
    }
}

impl From<NoteRecord> for Note {
    fn from(record: NoteRecord) -> Self {
        let created_at = reconstruct_timestamp(&record.id, "createdAt", &record.created_at);
        let updated_at = reconstruct_timestamp(&record.id, "updatedAt", &record.updated_at);
        Note {
            id: record.id,
            title: record.title,
            content: record.content,
            created_at,
            updated_at: updated_at.max(created_at),
        }
    }
}

impl From<&Note> for NoteRecord {
    fn from(note: &Note) -> Self {
        NoteRecord {
            id: note.id.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
            created_at: Value::String(encode_timestamp(&note.created_at)),
            updated_at: Value::String(encode_timestamp(&note.updated_at)),
        }
    }
}

pub fn encode_notes(notes: &[Note]) -> Result<String, CodecError> {
    let records: Vec<NoteRecord> = notes.iter().map(NoteRecord::from).collect();
    serde_json::to_string(&records).map_err(CodecError::encode(Collection::Notes))
}

pub fn decode_notes(json: &str) -> Result<Vec<Note>, CodecError> {
    let records: Vec<NoteRecord> = decode_entries(json, Collection::Notes)?;
    Ok(records.into_iter().map(Note::from).collect())
}

// === Pomodoro settings ===

pub fn encode_settings(settings: &PomodoroSettings) -> Result<String, CodecError> {
    serde_json::to_string(settings).map_err(CodecError::encode(Collection::PomodoroSettings))
}

/// Decode and merge onto the defaults
///
/// Only a payload that isn't an object fails; unusable fields are dropped
/// one by one.
pub fn decode_settings(json: &str) -> Result<PomodoroSettings, CodecError> {
    let collection = Collection::PomodoroSettings;
    let value: Value = serde_json::from_str(json).map_err(CodecError::decode(collection))?;
    if !value.is_object() {
        return Err(CodecError::Shape {
            collection,
            expected: "object",
        });
    }
    let partial: PartialPomodoroSettings =
        serde_json::from_value(value).map_err(CodecError::decode(collection))?;
    Ok(PomodoroSettings::merged(&partial))
}

/// Decode a complete record, as the page scripts send on save
pub fn decode_complete_settings(json: &str) -> Result<PomodoroSettings, CodecError> {
    serde_json::from_str(json).map_err(CodecError::decode(Collection::PomodoroSettings))
}

// === Language ===

/// Stored as the bare code, not as JSON
pub fn encode_language(language: Language) -> String {
    language.code().to_string()
}

pub fn decode_language(raw: &str) -> Result<Language, CodecError> {
    Language::from_code(raw.trim()).ok_or_else(|| CodecError::UnknownLanguage(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_encode_timestamp_matches_iso_string() {
        let at = Utc.with_ymd_and_hms(2024, 5, 10, 14, 30, 0).unwrap();
        assert_eq!(encode_timestamp(&at), "2024-05-10T14:30:00.000Z");
    }

    #[test]
    fn test_decode_timestamp_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 10, 14, 30, 0).unwrap();
        assert_eq!(decode_timestamp(&json!("2024-05-10T14:30:00.000Z")), Ok(expected));
        assert_eq!(decode_timestamp(&json!("2024-05-10T16:30:00+02:00")), Ok(expected));
        assert_eq!(decode_timestamp(&json!("2024-05-10T14:30:00")), Ok(expected));
        assert_eq!(
            decode_timestamp(&json!(expected.timestamp_millis())),
            Ok(expected)
        );
        assert_eq!(
            decode_timestamp(&json!("2024-05-10")),
            Ok(Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_decode_timestamp_rejects_garbage() {
        assert!(decode_timestamp(&json!("yesterday")).is_err());
        assert!(decode_timestamp(&json!(null)).is_err());
        assert!(decode_timestamp(&json!(true)).is_err());
    }

    #[test]
    fn test_malformed_timestamp_clamps_to_epoch() {
        let json = r#"[{"id":"n1","title":"t","content":"c","createdAt":"not a date","updatedAt":"also not"}]"#;
        let notes = decode_notes(json).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].created_at, DateTime::<Utc>::default());
        assert_eq!(notes[0].updated_at, DateTime::<Utc>::default());
    }

    #[test]
    fn test_updated_at_raised_to_created_at() {
        let json = r#"[{"id":"n1","title":"t","content":"c","createdAt":"2024-01-02T00:00:00.000Z","updatedAt":"garbage"}]"#;
        let notes = decode_notes(json).unwrap();
        assert_eq!(notes[0].updated_at, notes[0].created_at);
    }

    #[test]
    fn test_missing_timestamps_keep_note() {
        let notes = decode_notes(r#"[{"id":"n1","title":"t"}]"#).unwrap();
        assert_eq!(notes[0].content, "");
        assert_eq!(notes[0].created_at, DateTime::<Utc>::default());
    }

    #[test]
    fn test_encoded_notes_use_string_timestamps() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let encoded = encode_notes(&[Note::new_at("1", "a", "b", at)]).unwrap();
        let raw: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(raw[0]["createdAt"], "2024-01-01T00:00:00.000Z");
        assert_eq!(raw[0]["updatedAt"], "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_decode_errors_name_collection() {
        let err = decode_tasks("{not json").unwrap_err();
        assert!(err.to_string().starts_with("malformed tasks payload"));
        let err = decode_settings("[25, 5]").unwrap_err();
        assert!(matches!(
            err,
            CodecError::Shape { collection: Collection::PomodoroSettings, .. }
        ));
        assert!(matches!(
            decode_tasks(r#"{"id":"1"}"#),
            Err(CodecError::Shape { collection: Collection::Tasks, .. })
        ));
        assert!(decode_complete_settings(r#"{"workDuration":50}"#).is_err());
    }

    #[test]
    fn test_odd_task_entry_keeps_list() {
        let json = r#"[
            {"id":"1","title":"Fajr","priority":"high","day":"monday","completed":false},
            {"id":"2","title":"Plan","priority":"urgent","day":"Tuesday","position":"top"},
            42,
            {"title":"no id","day":"friday"}
        ]"#;
        let tasks = decode_tasks(json).unwrap();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].title, "Fajr");
        assert_eq!(tasks[1].priority.as_str(), "urgent");
        assert_eq!(tasks[1].position, Some(json!("top")));
        assert_eq!(tasks[2].id, "");
    }

    #[test]
    fn test_note_without_title_keeps_list() {
        let json = r#"[
            {"id":"n1","content":"untitled","createdAt":"2024-01-01T00:00:00.000Z","updatedAt":"2024-01-01T00:00:00.000Z"},
            {"id":"n2","title":"Second","content":"x","createdAt":"2024-01-02T00:00:00.000Z","updatedAt":"2024-01-02T00:00:00.000Z"}
        ]"#;
        let notes = decode_notes(json).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "");
        assert_eq!(notes[1].title, "Second");
    }

    #[test]
    fn test_sub_millisecond_input_truncated() {
        let json = r#"[{"id":"n1","title":"t","createdAt":"2024-01-01T00:00:00.123456789Z","updatedAt":"2024-01-01T00:00:00.123999Z"}]"#;
        let note = &decode_notes(json).unwrap()[0];
        assert_eq!(note.created_at.timestamp_subsec_nanos(), 123_000_000);
        assert_eq!(note.updated_at, note.created_at);
    }

    #[test]
    fn test_language_codec() {
        assert_eq!(encode_language(Language::Ar), "ar");
        assert_eq!(decode_language("ar").unwrap(), Language::Ar);
        assert!(matches!(decode_language("fr"), Err(CodecError::UnknownLanguage(_))));
    }
}
