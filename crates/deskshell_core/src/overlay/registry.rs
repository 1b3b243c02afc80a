//! In-memory overlay registry.

use crate::model::overlay::OverlayId;
use log::{debug, warn};
use std::collections::BTreeMap;

/// Mapping from overlay id to visibility.
///
/// An id missing from the map is closed. `open` always writes an explicit
/// `true`; `toggle` is derived from `is_open` so it cannot desync.
#[derive(Debug, Clone, Default)]
pub struct OverlayRegistry {
    visibility: BTreeMap<OverlayId, bool>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, id: &OverlayId) -> bool {
        self.visibility.get(id).copied().unwrap_or(false)
    }

    pub fn open(&mut self, id: OverlayId) {
        debug!("event=overlay_open module=overlay status=ok id={id}");
        self.visibility.insert(id, true);
    }

    pub fn close(&mut self, id: OverlayId) {
        debug!("event=overlay_close module=overlay status=ok id={id}");
        self.visibility.insert(id, false);
    }

    pub fn toggle(&mut self, id: OverlayId) {
        if self.is_open(&id) {
            self.close(id);
        } else {
            self.open(id);
        }
    }

    /// Closes every overlay.
    pub fn close_all(&mut self) {
        self.visibility.clear();
    }

    /// Currently visible overlays, sorted by id. Carries no z-order.
    pub fn open_ids(&self) -> Vec<OverlayId> {
        self.visibility
            .iter()
            .filter(|(_, visible)| **visible)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn any_open(&self) -> bool {
        self.visibility.values().any(|visible| *visible)
    }

    /// String-keyed `is_open` for triggers; malformed ids read as closed.
    pub fn is_open_named(&self, id: &str) -> bool {
        id.parse::<OverlayId>()
            .map(|parsed| self.is_open(&parsed))
            .unwrap_or(false)
    }

    /// String-keyed `open`; malformed ids are a logged no-op.
    pub fn open_named(&mut self, id: &str) {
        if let Some(parsed) = parse_or_log(id, "open") {
            self.open(parsed);
        }
    }

    /// String-keyed `close`; malformed ids are a logged no-op.
    pub fn close_named(&mut self, id: &str) {
        if let Some(parsed) = parse_or_log(id, "close") {
            self.close(parsed);
        }
    }

    /// String-keyed `toggle`; malformed ids are a logged no-op.
    pub fn toggle_named(&mut self, id: &str) {
        if let Some(parsed) = parse_or_log(id, "toggle") {
            self.toggle(parsed);
        }
    }
}

fn parse_or_log(id: &str, operation: &str) -> Option<OverlayId> {
    match id.parse::<OverlayId>() {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!("event=overlay_{operation} module=overlay status=ignored error={err}");
            None
        }
    }
}
