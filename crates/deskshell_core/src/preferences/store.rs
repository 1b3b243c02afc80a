//! Preference store over key-value storage.

use crate::model::preferences::{
    push_bounded_recent, Preferences, SectionPatch, COMMAND_HISTORY_MAX, RECENT_SEARCHES_MAX,
};
use crate::storage::{load_json, save_json, KeyValueStore};
use log::{debug, info};

pub struct PreferencesStore<S: KeyValueStore> {
    store: S,
    key: String,
    prefs: Preferences,
}

impl<S: KeyValueStore> PreferencesStore<S> {
    /// Loads stored preferences, falling back to defaults when absent or corrupt.
    pub fn load(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let prefs = match load_json::<Preferences, _>(&store, &key) {
            Some(prefs) => {
                info!("event=preferences_load module=preferences status=ok key={key}");
                prefs
            }
            None => {
                info!("event=preferences_load module=preferences status=defaults key={key}");
                Preferences::default()
            }
        };
        Self { store, key, prefs }
    }

    pub fn get(&self) -> &Preferences {
        &self.prefs
    }

    /// Merges `patch` into its section; other sections and keys are untouched.
    pub fn update_section<P: SectionPatch>(&mut self, patch: P) {
        if patch.is_empty() {
            debug!(
                "event=preferences_update module=preferences status=noop section={}",
                P::SECTION.as_str()
            );
            return;
        }
        patch.merge_into(&mut self.prefs);
        debug!(
            "event=preferences_update module=preferences status=ok section={}",
            P::SECTION.as_str()
        );
        self.persist();
    }

    /// Records a search term, most-recent-first, capped at 10.
    pub fn add_recent_search(&mut self, term: &str) {
        if push_bounded_recent(&mut self.prefs.recent_searches, term, RECENT_SEARCHES_MAX) {
            self.persist();
        }
    }

    /// Records a command palette entry, most-recent-first, capped at 20.
    pub fn add_command_history(&mut self, entry: &str) {
        if push_bounded_recent(
            &mut self.prefs.command_palette_history,
            entry,
            COMMAND_HISTORY_MAX,
        ) {
            self.persist();
        }
    }

    pub fn clear_recent_searches(&mut self) {
        if self.prefs.recent_searches.is_empty() {
            return;
        }
        self.prefs.recent_searches.clear();
        self.persist();
    }

    /// Flips membership of `id` in the favorite set. Returns the new membership.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        let id = id.trim();
        if id.is_empty() {
            return false;
        }
        let favorites = &mut self.prefs.favorite_dialogs;
        let now_favorite = if let Some(position) = favorites.iter().position(|fav| fav == id) {
            favorites.remove(position);
            false
        } else {
            favorites.push(id.to_string());
            true
        };
        self.persist();
        now_favorite
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        let id = id.trim();
        self.prefs.favorite_dialogs.iter().any(|fav| fav == id)
    }

    /// Restores the default record wholesale.
    pub fn reset(&mut self) {
        self.prefs = Preferences::default();
        info!("event=preferences_reset module=preferences status=ok");
        self.persist();
    }

    fn persist(&self) {
        save_json(&self.store, &self.key, &self.prefs);
    }
}
