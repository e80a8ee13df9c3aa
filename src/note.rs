//! Notes
//!
//! Timestamps are real `DateTime<Utc>` values in memory; their string form
//! only exists inside `persistence::codec`. Both are kept at millisecond
//! precision, the resolution of the stored form.

use chrono::{DateTime, SubsecRound, Utc};

/// A single note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Never earlier than `created_at`
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a note stamped with the current time
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new_at(id, title, content, Utc::now())
    }

    /// Create a note with an explicit creation time (cut to milliseconds)
    pub fn new_at(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        let at = at.trunc_subsecs(3);
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            created_at: at,
            updated_at: at,
        }
    }

    /// Replace title/content and bump `updated_at` to `at`
    ///
    /// `at` earlier than `created_at` is raised to `created_at`.
    pub fn edit(&mut self, title: impl Into<String>, content: impl Into<String>, at: DateTime<Utc>) {
        self.title = title.into();
        self.content = content.into();
        self.updated_at = at.trunc_subsecs(3).max(self.created_at);
    }
}
