//! Note filtering and list projections.

use crate::model::note::{Note, NoteCategory};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

const PREVIEW_MAX_CHARS: usize = 100;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Returns notes whose title, content, or any tag contains `query`
/// case-insensitively, preserving collection order.
///
/// An empty query returns the whole collection.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    filter_notes_by(notes, query, None)
}

/// Like [`filter_notes`], additionally restricted to one category.
pub fn filter_notes_by<'a>(
    notes: &'a [Note],
    query: &str,
    category: Option<NoteCategory>,
) -> Vec<&'a Note> {
    let needle = query.to_lowercase();
    notes
        .iter()
        .filter(|note| category.map_or(true, |wanted| note.category == wanted))
        .filter(|note| needle.is_empty() || note.matches_lowercase(&needle))
        .collect()
}

/// Number of notes per category; every category is present.
pub fn category_counts(notes: &[Note]) -> BTreeMap<NoteCategory, usize> {
    let mut counts = NoteCategory::ALL
        .iter()
        .map(|category| (*category, 0))
        .collect::<BTreeMap<_, _>>();
    for note in notes {
        *counts.entry(note.category).or_insert(0) += 1;
    }
    counts
}

/// One-line list preview: whitespace collapsed, first 100 chars.
pub fn content_preview(content: &str) -> Option<String> {
    let normalized = WHITESPACE_RE.replace_all(content, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut preview = trimmed.chars().take(PREVIEW_MAX_CHARS).collect::<String>();
    if trimmed.chars().count() > PREVIEW_MAX_CHARS {
        preview.push_str("...");
    }
    Some(preview)
}
