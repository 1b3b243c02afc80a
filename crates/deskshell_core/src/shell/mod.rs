//! Dashboard shell facade.
//!
//! # Responsibility
//! - Own exactly one instance of each subsystem and hand them to panels.
//! - Apply shell effects requested by palette actions.
//! - Scope the keyboard listener to an explicit mount.
//!
//! # Invariants
//! - The palette shortcut listener is attached at most once per mount and
//!   detached when the mount guard drops.
//! - Validation advisories reach the host toast surface; storage failures
//!   only reach the log.

mod mount;

pub use mount::MountedDashboard;

use crate::command::action::ShellEffect;
use crate::command::dispatcher::{CommandDispatcher, KeyOutcome};
use crate::command::search::CommandGroup;
use crate::command::table::{builtin_commands, CommandEntry, CommandTable, CommandTableError};
use crate::config::{ConfigError, ShellConfig};
use crate::host::{Clock, Host, SystemClock};
use crate::model::keyboard::KeyEvent;
use crate::model::note::NoteDraft;
use crate::model::overlay::OverlayId;
use crate::notes::store::{NoteStore, SaveOutcome};
use crate::overlay::registry::OverlayRegistry;
use crate::panel::toggle::PanelToggle;
use crate::preferences::store::PreferencesStore;
use crate::storage::KeyValueStore;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Dashboard construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    Config(ConfigError),
    CommandTable(CommandTableError),
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::CommandTable(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ShellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::CommandTable(err) => Some(err),
        }
    }
}

impl From<ConfigError> for ShellError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<CommandTableError> for ShellError {
    fn from(value: CommandTableError) -> Self {
        Self::CommandTable(value)
    }
}

pub struct Dashboard<S: KeyValueStore, C: Clock = SystemClock> {
    host: Rc<dyn Host>,
    overlays: OverlayRegistry,
    side_panel: PanelToggle<Rc<S>>,
    preferences: PreferencesStore<Rc<S>>,
    notes: NoteStore<Rc<S>, C>,
    commands: CommandDispatcher,
}

impl<S: KeyValueStore> Dashboard<S, SystemClock> {
    /// Builds a dashboard with the built-in command table and the system clock.
    pub fn new(
        config: ShellConfig,
        storage: Rc<S>,
        host: Rc<dyn Host>,
    ) -> Result<Self, ShellError> {
        Self::with_parts(config, storage, host, SystemClock, builtin_commands())
    }
}

impl<S: KeyValueStore, C: Clock> Dashboard<S, C> {
    /// Builds a dashboard from explicit parts.
    ///
    /// Reads the viewport width once to resolve the side panel default.
    pub fn with_parts(
        config: ShellConfig,
        storage: Rc<S>,
        host: Rc<dyn Host>,
        clock: C,
        commands: Vec<CommandEntry>,
    ) -> Result<Self, ShellError> {
        let shortcut = config.validate()?;
        let table = CommandTable::new(commands)?;

        let side_panel = PanelToggle::load(
            Rc::clone(&storage),
            config.side_panel_key.as_str(),
            host.viewport_width(),
            config.desktop_breakpoint,
        );
        let preferences =
            PreferencesStore::load(Rc::clone(&storage), config.preferences_key.as_str());
        let notes = NoteStore::load(Rc::clone(&storage), config.notes_key.as_str(), clock);
        let commands = CommandDispatcher::new(table, shortcut, config.recent_command_display_limit);

        info!(
            "event=shell_init module=shell status=ok commands={} notes={}",
            commands.table().len(),
            notes.notes().len()
        );

        Ok(Self {
            host,
            overlays: OverlayRegistry::new(),
            side_panel,
            preferences,
            notes,
            commands,
        })
    }

    /// Attaches the keyboard listener for the lifetime of the returned guard.
    pub fn mount(&mut self) -> MountedDashboard<'_, S, C> {
        MountedDashboard::new(self)
    }

    pub fn overlays(&self) -> &OverlayRegistry {
        &self.overlays
    }

    pub fn overlays_mut(&mut self) -> &mut OverlayRegistry {
        &mut self.overlays
    }

    pub fn is_overlay_open(&self, id: &OverlayId) -> bool {
        self.overlays.is_open(id)
    }

    pub fn open_overlay(&mut self, id: OverlayId) {
        self.overlays.open(id);
    }

    pub fn close_overlay(&mut self, id: OverlayId) {
        self.overlays.close(id);
    }

    pub fn toggle_overlay(&mut self, id: OverlayId) {
        self.overlays.toggle(id);
    }

    pub fn side_panel(&self) -> &PanelToggle<Rc<S>> {
        &self.side_panel
    }

    pub fn side_panel_mut(&mut self) -> &mut PanelToggle<Rc<S>> {
        &mut self.side_panel
    }

    pub fn preferences(&self) -> &PreferencesStore<Rc<S>> {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut PreferencesStore<Rc<S>> {
        &mut self.preferences
    }

    pub fn notes(&self) -> &NoteStore<Rc<S>, C> {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut NoteStore<Rc<S>, C> {
        &mut self.notes
    }

    /// Commits `draft` and forwards a rejection advisory to the host.
    pub fn save_note(&mut self, draft: NoteDraft) -> SaveOutcome {
        let outcome = self.notes.save(draft);
        if let SaveOutcome::Rejected(advisory) = &outcome {
            self.host.advise(advisory);
        }
        outcome
    }

    pub fn commands(&self) -> &CommandDispatcher {
        &self.commands
    }

    pub fn is_palette_open(&self) -> bool {
        self.commands.is_palette_open()
    }

    pub fn toggle_palette(&mut self) {
        self.commands.toggle_palette();
    }

    pub fn set_palette_query(&mut self, query: impl Into<String>) {
        self.commands.set_query(query);
    }

    /// Grouped palette results for the current query, `recent` from history.
    pub fn palette_results(&self) -> Vec<CommandGroup<'_>> {
        self.commands
            .results(&self.preferences.get().command_palette_history)
    }

    /// Invokes a palette entry, records it in history, and closes the palette.
    ///
    /// A non-blank query is also recorded as a recent search. Returns `false`
    /// for an unknown id.
    pub fn select_command(&mut self, id: &str) -> bool {
        let query = self.commands.query().trim().to_string();
        let Some(effects) = self.commands.invoke(id, &mut self.overlays) else {
            return false;
        };

        self.preferences.add_command_history(id);
        if !query.is_empty() {
            self.preferences.add_recent_search(&query);
        }
        for effect in effects {
            self.apply_effect(effect);
        }
        true
    }

    /// Routes a keydown; a no-op unless the dashboard is mounted.
    pub fn handle_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        let outcome = self
            .commands
            .handle_key(event, &self.preferences.get().command_palette_history);
        if let KeyOutcome::Activate(id) = &outcome {
            self.select_command(id);
        }
        outcome
    }

    fn apply_effect(&mut self, effect: ShellEffect) {
        debug!("event=shell_effect module=shell status=apply effect={:?}", effect);
        match effect {
            ShellEffect::ToggleSidePanel => self.side_panel.toggle(),
            ShellEffect::NavigateTo(section) => self.host.navigate(&section),
            ShellEffect::NewNoteDraft => self.notes.create(),
            ShellEffect::Advise(advisory) => self.host.advise(&advisory),
        }
    }

    fn attach_listener(&mut self) -> bool {
        self.commands.listener_mut().attach()
    }

    fn detach_listener(&mut self) -> bool {
        self.commands.listener_mut().detach()
    }
}
