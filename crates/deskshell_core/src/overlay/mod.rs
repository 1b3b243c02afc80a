//! Named overlay visibility.
//!
//! # Responsibility
//! - Track which modal panels are visible, addressed by `OverlayId`.
//!
//! # Invariants
//! - Overlays are independent; opening one never closes another.
//! - Visibility is in-memory only; every session starts with all closed.

pub mod registry;
