//! Persisted boolean panels (docked side panel).

pub mod toggle;
