//! Core state machinery for the deskshell office intranet dashboard.
//! The UI renders panels; this crate owns every cross-panel invariant.

pub mod command;
pub mod config;
pub mod db;
pub mod host;
pub mod logging;
pub mod model;
pub mod notes;
pub mod overlay;
pub mod panel;
pub mod preferences;
pub mod shell;
pub mod storage;

pub use command::action::{ActionContext, CommandAction, ShellEffect};
pub use command::dispatcher::{CommandDispatcher, KeyOutcome, ShortcutListener};
pub use command::search::{flatten_groups, search_commands, CommandGroup};
pub use command::table::{
    builtin_commands, CommandCategory, CommandEntry, CommandTable, CommandTableError,
};
pub use config::{ConfigError, ShellConfig};
pub use host::{Advisory, AdvisoryLevel, Clock, HeadlessHost, Host, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::keyboard::{parse_shortcut, KeyEvent, PrimaryModifier, Shortcut, ShortcutError};
pub use model::note::{parse_tags, Note, NoteCategory, NoteDraft, NoteId};
pub use model::overlay::{OverlayId, OverlayIdError};
pub use model::preferences::{
    AccessibilityPatch, AccessibilitySettings, DisplayPatch, DisplaySettings, EmailDigest,
    NotificationSettings, NotificationsPatch, PreferenceSection, Preferences, PrivacyPatch,
    PrivacySettings, SectionPatch, COMMAND_HISTORY_MAX, RECENT_SEARCHES_MAX,
};
pub use notes::filter::{category_counts, content_preview, filter_notes, filter_notes_by};
pub use notes::store::{NoteStore, SaveOutcome, NOTE_EMPTY_CODE};
pub use overlay::registry::OverlayRegistry;
pub use panel::toggle::{InitialState, PanelToggle, DEFAULT_DESKTOP_BREAKPOINT};
pub use preferences::store::PreferencesStore;
pub use shell::{Dashboard, MountedDashboard, ShellError};
pub use storage::{
    load_json, save_json, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError,
    StorageResult,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
