//! Local note collection with a single selection cursor and editor draft.
//!
//! # Responsibility
//! - CRUD over the note collection with write-through persistence.
//! - Case-insensitive filtering across title, content and tags.
//!
//! # Invariants
//! - Collection order is newest-first by creation; new notes are prepended.
//! - The whole collection is written after every create/save/delete.
//! - At most one note is selected; the draft is a separate scratch copy.

pub mod filter;
pub mod store;
