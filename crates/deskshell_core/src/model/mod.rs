//! Domain model shared by the dashboard subsystems.
//!
//! # Responsibility
//! - Define the typed shapes persisted to local storage (preferences, notes).
//! - Define the closed identifier sets used by overlays and keyboard handling.
//!
//! # Invariants
//! - Persisted shapes are always complete; missing fields decode as defaults.

pub mod keyboard;
pub mod note;
pub mod overlay;
pub mod preferences;
