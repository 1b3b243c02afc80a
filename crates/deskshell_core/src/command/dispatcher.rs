//! Palette state machine and the global shortcut listener.

use crate::command::action::{ActionContext, ShellEffect};
use crate::command::search::{flatten_groups, search_commands, CommandGroup};
use crate::command::table::CommandTable;
use crate::model::keyboard::{KeyEvent, Shortcut};
use crate::overlay::registry::OverlayRegistry;
use log::{debug, info, warn};

/// What the host should do with a keydown after the dispatcher saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not ours; let the browser handle it.
    Ignored,
    /// Consumed; suppress the default action.
    Handled,
    /// Consumed; invoke the highlighted command with this id.
    Activate(String),
}

impl KeyOutcome {
    pub fn prevent_default(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Process-wide keydown listener for the palette shortcut.
///
/// Attaching is idempotent; a second attach while attached registers nothing.
#[derive(Debug, Clone)]
pub struct ShortcutListener {
    shortcut: Shortcut,
    attached: bool,
    registrations: u32,
}

impl ShortcutListener {
    pub fn new(shortcut: Shortcut) -> Self {
        Self {
            shortcut,
            attached: false,
            registrations: 0,
        }
    }

    /// Returns `true` when this call registered the listener.
    pub fn attach(&mut self) -> bool {
        if self.attached {
            return false;
        }
        self.attached = true;
        self.registrations += 1;
        info!(
            "event=shortcut_attach module=command status=ok shortcut={}",
            self.shortcut.label()
        );
        true
    }

    /// Returns `true` when this call removed the listener.
    pub fn detach(&mut self) -> bool {
        if !self.attached {
            return false;
        }
        self.attached = false;
        info!("event=shortcut_detach module=command status=ok");
        true
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Number of times the listener was actually registered.
    pub fn registrations(&self) -> u32 {
        self.registrations
    }

    pub fn shortcut(&self) -> &Shortcut {
        &self.shortcut
    }
}

pub struct CommandDispatcher {
    table: CommandTable,
    listener: ShortcutListener,
    recent_limit: usize,
    palette_open: bool,
    query: String,
    highlighted: usize,
}

impl CommandDispatcher {
    pub fn new(table: CommandTable, shortcut: Shortcut, recent_limit: usize) -> Self {
        Self {
            table,
            listener: ShortcutListener::new(shortcut),
            recent_limit,
            palette_open: false,
            query: String::new(),
            highlighted: 0,
        }
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    pub fn listener(&self) -> &ShortcutListener {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut ShortcutListener {
        &mut self.listener
    }

    pub fn is_palette_open(&self) -> bool {
        self.palette_open
    }

    /// Opens the palette with an empty query.
    pub fn open_palette(&mut self) {
        self.palette_open = true;
        self.query.clear();
        self.highlighted = 0;
    }

    pub fn close_palette(&mut self) {
        self.palette_open = false;
        self.query.clear();
        self.highlighted = 0;
    }

    pub fn toggle_palette(&mut self) {
        if self.palette_open {
            self.close_palette();
        } else {
            self.open_palette();
        }
        debug!(
            "event=palette_toggle module=command status=ok open={}",
            self.palette_open
        );
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the query and resets the highlight to the first result.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.highlighted = 0;
    }

    /// Index of the highlighted entry in the flattened results.
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Grouped results for the current query.
    pub fn results<'a>(&'a self, history: &[String]) -> Vec<CommandGroup<'a>> {
        self.search(&self.query, history)
    }

    /// Grouped results for an arbitrary query.
    pub fn search<'a>(&'a self, query: &str, history: &[String]) -> Vec<CommandGroup<'a>> {
        search_commands(&self.table, history, self.recent_limit, query)
    }

    /// Id of the highlighted entry for the current query, if any.
    pub fn highlighted_id(&self, history: &[String]) -> Option<String> {
        let groups = self.results(history);
        flatten_groups(&groups)
            .get(self.highlighted)
            .map(|entry| entry.id.clone())
    }

    /// Routes one keydown. Nothing is handled while the listener is detached.
    ///
    /// `Mod+K` toggles the palette. While open, arrows move the highlight
    /// (wrapping), `Enter` activates it and `Escape` closes the palette.
    pub fn handle_key(&mut self, event: &KeyEvent, history: &[String]) -> KeyOutcome {
        if !self.listener.is_attached() {
            return KeyOutcome::Ignored;
        }
        if self.listener.shortcut().matches(event) {
            self.toggle_palette();
            return KeyOutcome::Handled;
        }
        if !self.palette_open {
            return KeyOutcome::Ignored;
        }

        match event.key.as_str() {
            "Escape" => {
                self.close_palette();
                KeyOutcome::Handled
            }
            "ArrowDown" | "ArrowUp" => {
                let count = {
                    let groups = self.results(history);
                    flatten_groups(&groups).len()
                };
                if count > 0 {
                    let current = self.highlighted.min(count - 1);
                    self.highlighted = if event.key == "ArrowDown" {
                        (current + 1) % count
                    } else {
                        (current + count - 1) % count
                    };
                }
                KeyOutcome::Handled
            }
            "Enter" => match self.highlighted_id(history) {
                Some(id) => KeyOutcome::Activate(id),
                None => KeyOutcome::Handled,
            },
            _ => KeyOutcome::Ignored,
        }
    }

    /// Runs the command `id` and then closes the palette.
    ///
    /// Returns the effects the action requested, or `None` (palette left as
    /// is) when `id` is not in the table.
    pub fn invoke(&mut self, id: &str, overlays: &mut OverlayRegistry) -> Option<Vec<ShellEffect>> {
        let Some(entry) = self.table.get(id) else {
            warn!("event=command_invoke module=command status=ignored reason=unknown_id id={id}");
            return None;
        };
        let action = entry.action.clone();

        let mut ctx = ActionContext::new(overlays);
        action.invoke(&mut ctx);
        let effects = ctx.into_effects();

        self.close_palette();
        info!(
            "event=command_invoke module=command status=ok id={id} effects={}",
            effects.len()
        );
        Some(effects)
    }
}
