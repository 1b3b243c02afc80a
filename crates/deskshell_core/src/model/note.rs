//! Note domain model.
//!
//! # Responsibility
//! - Define the committed note record and the editor scratch draft.
//!
//! # Invariants
//! - `id` is stable for the note lifetime and time-ordered at creation.
//! - `created_at` never changes after creation; `updated_at >= created_at`.
//! - `tags` keep input order; duplicates are allowed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable note identifier (UUIDv7, ordered by creation time).
pub type NoteId = Uuid;

/// Note grouping shown as a colored badge in the notes panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteCategory {
    #[default]
    Personal,
    Work,
    Meeting,
    Idea,
    Todo,
}

impl NoteCategory {
    pub const ALL: [NoteCategory; 5] = [
        NoteCategory::Personal,
        NoteCategory::Work,
        NoteCategory::Meeting,
        NoteCategory::Idea,
        NoteCategory::Todo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Meeting => "meeting",
            Self::Idea => "idea",
            Self::Todo => "todo",
        }
    }
}

/// Committed note record as persisted in local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub category: NoteCategory,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Note {
    /// Builds a new note from a draft with a fresh id and both timestamps at `now_ms`.
    pub fn from_draft(draft: &NoteDraft, now_ms: i64) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            category: draft.category,
            created_at: now_ms,
            updated_at: now_ms,
            tags: draft.tags.clone(),
        }
    }

    /// Copies editable draft fields into this note and refreshes `updated_at`.
    ///
    /// `id` and `created_at` are left untouched.
    pub fn apply_draft(&mut self, draft: &NoteDraft, now_ms: i64) {
        self.title = draft.title.clone();
        self.content = draft.content.clone();
        self.category = draft.category;
        self.tags = draft.tags.clone();
        self.updated_at = now_ms.max(self.created_at);
    }

    /// Case-insensitive match of an already-lowercased needle against
    /// title, content, and every tag.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Uncommitted editor copy of a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub category: NoteCategory,
    pub tags: Vec<String>,
}

impl NoteDraft {
    /// Loads the editable fields of a committed note.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            category: note.category,
            tags: note.tags.clone(),
        }
    }

    /// Returns whether both title and content are blank after trimming.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }
}

/// Splits comma-separated tag input, trimming entries and dropping empties.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
