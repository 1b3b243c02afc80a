//! Note store over key-value storage.

use crate::host::{Advisory, Clock};
use crate::model::note::{Note, NoteCategory, NoteDraft, NoteId};
use crate::notes::filter::{category_counts, filter_notes, filter_notes_by};
use crate::storage::{load_json, save_json, KeyValueStore};
use log::{info, warn};
use std::collections::BTreeMap;

/// Advisory code raised when saving a blank draft.
pub const NOTE_EMPTY_CODE: &str = "note_empty";

/// Result of committing the scratch draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(NoteId),
    Updated(NoteId),
    /// Nothing changed; the advisory should be shown to the user.
    Rejected(Advisory),
}

pub struct NoteStore<S: KeyValueStore, C: Clock> {
    store: S,
    key: String,
    clock: C,
    notes: Vec<Note>,
    selected: Option<NoteId>,
    draft: NoteDraft,
    editing: bool,
}

impl<S: KeyValueStore, C: Clock> NoteStore<S, C> {
    /// Loads the stored collection; corrupt data loads as empty.
    pub fn load(store: S, key: impl Into<String>, clock: C) -> Self {
        let key = key.into();
        let notes = load_json::<Vec<Note>, _>(&store, &key).unwrap_or_default();
        info!(
            "event=notes_load module=notes status=ok key={key} count={}",
            notes.len()
        );
        Self {
            store,
            key,
            clock,
            notes,
            selected: None,
            draft: NoteDraft::default(),
            editing: false,
        }
    }

    /// Collection in canonical newest-first order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn selected_id(&self) -> Option<NoteId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Note> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    /// Mutable scratch draft for editor bindings.
    pub fn draft_mut(&mut self) -> &mut NoteDraft {
        &mut self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Starts a new blank draft: clears selection and enters edit mode.
    pub fn create(&mut self) {
        self.draft = NoteDraft::default();
        self.selected = None;
        self.editing = true;
    }

    /// Enters edit mode for the selected note, or a blank draft otherwise.
    pub fn edit(&mut self) {
        if self.selected().is_none() {
            self.selected = None;
            self.draft = NoteDraft::default();
        }
        self.editing = true;
    }

    /// Replaces the scratch draft with `draft` and commits it.
    pub fn save(&mut self, draft: NoteDraft) -> SaveOutcome {
        self.draft = draft;
        self.save_draft()
    }

    /// Commits the current scratch draft.
    ///
    /// A blank draft (title and content empty after trimming) is rejected
    /// without touching state. With a selection the selected note is updated
    /// in place; otherwise a new note is prepended and becomes the selection.
    pub fn save_draft(&mut self) -> SaveOutcome {
        if self.draft.is_blank() {
            warn!("event=note_save module=notes status=rejected reason=empty");
            return SaveOutcome::Rejected(Advisory::warning(
                NOTE_EMPTY_CODE,
                "Please enter a title or some content before saving.",
            ));
        }

        let now_ms = self.clock.now_ms();
        let existing = self
            .selected
            .and_then(|id| self.notes.iter_mut().find(|note| note.id == id));

        let outcome = match existing {
            Some(note) => {
                note.apply_draft(&self.draft, now_ms);
                self.draft = NoteDraft::from_note(note);
                SaveOutcome::Updated(note.id)
            }
            None => {
                let note = Note::from_draft(&self.draft, now_ms);
                let id = note.id;
                self.notes.insert(0, note);
                self.selected = Some(id);
                SaveOutcome::Created(id)
            }
        };

        self.editing = false;
        info!(
            "event=note_save module=notes status=ok kind={} count={}",
            if matches!(outcome, SaveOutcome::Created(_)) {
                "created"
            } else {
                "updated"
            },
            self.notes.len()
        );
        self.persist();
        outcome
    }

    /// Removes a note. Deleting the selected note clears selection and edit mode.
    ///
    /// Returns whether a note was removed.
    pub fn delete(&mut self, id: NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() == before {
            warn!("event=note_delete module=notes status=ignored reason=not_found");
            return false;
        }

        if self.selected == Some(id) {
            self.selected = None;
            self.draft = NoteDraft::default();
            self.editing = false;
        }
        info!(
            "event=note_delete module=notes status=ok count={}",
            self.notes.len()
        );
        self.persist();
        true
    }

    /// Selects a note for viewing and loads it into the draft.
    ///
    /// Returns `false` and changes nothing when `id` is unknown.
    pub fn select(&mut self, id: NoteId) -> bool {
        let Some(note) = self.get(id) else {
            return false;
        };
        self.draft = NoteDraft::from_note(note);
        self.selected = Some(id);
        self.editing = false;
        true
    }

    /// Drops scratch changes and leaves edit mode.
    pub fn cancel(&mut self) {
        self.draft = self
            .selected()
            .map(NoteDraft::from_note)
            .unwrap_or_default();
        self.editing = false;
    }

    pub fn filter(&self, query: &str) -> Vec<&Note> {
        filter_notes(&self.notes, query)
    }

    pub fn filter_by(&self, query: &str, category: Option<NoteCategory>) -> Vec<&Note> {
        filter_notes_by(&self.notes, query, category)
    }

    pub fn category_counts(&self) -> BTreeMap<NoteCategory, usize> {
        category_counts(&self.notes)
    }

    fn persist(&self) {
        save_json(&self.store, &self.key, &self.notes);
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteStore, SaveOutcome};
    use crate::host::Clock;
    use crate::model::note::NoteDraft;
    use crate::storage::MemoryKeyValueStore;
    use std::cell::Cell;

    struct StepClock(Cell<i64>);

    impl Clock for StepClock {
        fn now_ms(&self) -> i64 {
            let now = self.0.get();
            self.0.set(now + 10);
            now
        }
    }

    fn draft(title: &str, content: &str) -> NoteDraft {
        NoteDraft {
            title: title.to_string(),
            content: content.to_string(),
            ..NoteDraft::default()
        }
    }

    #[test]
    fn edit_without_selection_starts_blank_draft() {
        let store = MemoryKeyValueStore::new();
        let mut notes = NoteStore::load(&store, "notes", StepClock(Cell::new(0)));
        notes.draft_mut().title = "leftover".to_string();
        notes.edit();
        assert!(notes.is_editing());
        assert!(notes.draft().title.is_empty());
    }

    #[test]
    fn update_refreshes_updated_at_only() {
        let store = MemoryKeyValueStore::new();
        let mut notes = NoteStore::load(&store, "notes", StepClock(Cell::new(100)));
        let SaveOutcome::Created(id) = notes.save(draft("Plan", "Q1")) else {
            panic!("expected create");
        };
        let SaveOutcome::Updated(updated) = notes.save(draft("Plan", "Q1 and Q2")) else {
            panic!("expected update");
        };
        assert_eq!(updated, id);

        let note = notes.get(id).expect("note exists");
        assert_eq!(note.created_at, 100);
        assert_eq!(note.updated_at, 110);
        assert_eq!(note.content, "Q1 and Q2");
        assert_eq!(notes.notes().len(), 1);
    }
}
