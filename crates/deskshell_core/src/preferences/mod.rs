//! Persisted user preferences.
//!
//! # Responsibility
//! - Own the single preference record and write it through on every change.
//!
//! # Invariants
//! - `get()` always returns a shape-complete record.
//! - Every mutation serializes the entire record, never one section.
//! - Missing or corrupt stored data loads as defaults without surfacing an error.

pub mod store;
