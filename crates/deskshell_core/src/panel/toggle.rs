//! Two-state persisted panel flag.
//!
//! # Responsibility
//! - Resolve the initial open state once at construction.
//! - Write the new state through to storage on every transition.
//!
//! # Invariants
//! - A persisted value always wins over the viewport default.
//! - The viewport is consulted exactly once, at construction.

use crate::storage::{load_json, save_json, KeyValueStore};
use log::info;

/// Default desktop breakpoint in CSS pixels.
pub const DEFAULT_DESKTOP_BREAKPOINT: u32 = 1024;

/// Where the initial state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialState {
    Persisted,
    Viewport,
}

pub struct PanelToggle<S: KeyValueStore> {
    store: S,
    key: String,
    is_open: bool,
    initial: InitialState,
}

impl<S: KeyValueStore> PanelToggle<S> {
    /// Loads the persisted flag or falls back to `viewport_width >= breakpoint`.
    pub fn load(store: S, key: impl Into<String>, viewport_width: u32, breakpoint: u32) -> Self {
        let key = key.into();
        let (is_open, initial) = match load_json::<bool, _>(&store, &key) {
            Some(persisted) => (persisted, InitialState::Persisted),
            None => (viewport_width >= breakpoint, InitialState::Viewport),
        };
        info!(
            "event=panel_init module=panel status=ok key={key} open={is_open} source={:?}",
            initial
        );
        Self {
            store,
            key,
            is_open,
            initial,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn initial_state(&self) -> InitialState {
        self.initial
    }

    pub fn open(&mut self) {
        self.set(true);
    }

    pub fn close(&mut self) {
        self.set(false);
    }

    pub fn toggle(&mut self) {
        self.set(!self.is_open);
    }

    fn set(&mut self, value: bool) {
        self.is_open = value;
        save_json(&self.store, &self.key, &value);
    }
}
