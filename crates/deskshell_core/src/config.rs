//! Shell configuration.
//!
//! # Invariants
//! - Storage keys are non-blank and pairwise distinct.
//! - The palette shortcut parses as a valid declaration.

use crate::logging::default_log_level;
use crate::model::keyboard::{parse_shortcut, Shortcut, ShortcutError};
use crate::panel::toggle::DEFAULT_DESKTOP_BREAKPOINT;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const PREFERENCES_STORAGE_KEY: &str = "intranet-preferences";
pub const SIDE_PANEL_STORAGE_KEY: &str = "intranet-side-panel-open";
pub const NOTES_STORAGE_KEY: &str = "intranet-notes";
pub const DEFAULT_PALETTE_SHORTCUT: &str = "Mod+K";
pub const DEFAULT_RECENT_COMMAND_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Viewport width at or above which the side panel starts open.
    pub desktop_breakpoint: u32,
    /// Maximum entries shown in the palette `recent` group.
    pub recent_command_display_limit: usize,
    pub palette_shortcut: String,
    pub preferences_key: String,
    pub side_panel_key: String,
    pub notes_key: String,
    pub log_level: &'static str,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            desktop_breakpoint: DEFAULT_DESKTOP_BREAKPOINT,
            recent_command_display_limit: DEFAULT_RECENT_COMMAND_LIMIT,
            palette_shortcut: DEFAULT_PALETTE_SHORTCUT.to_string(),
            preferences_key: PREFERENCES_STORAGE_KEY.to_string(),
            side_panel_key: SIDE_PANEL_STORAGE_KEY.to_string(),
            notes_key: NOTES_STORAGE_KEY.to_string(),
            log_level: default_log_level(),
        }
    }
}

impl ShellConfig {
    /// Validates the configuration and returns the parsed palette shortcut.
    pub fn validate(&self) -> Result<Shortcut, ConfigError> {
        if self.desktop_breakpoint == 0 {
            return Err(ConfigError::ZeroBreakpoint);
        }

        let keys = [
            ("preferences_key", self.preferences_key.as_str()),
            ("side_panel_key", self.side_panel_key.as_str()),
            ("notes_key", self.notes_key.as_str()),
        ];
        for (field, key) in keys {
            if key.trim().is_empty() {
                return Err(ConfigError::BlankStorageKey(field));
            }
        }
        for (index, (_, key)) in keys.iter().enumerate() {
            if keys[index + 1..].iter().any(|(_, other)| other == key) {
                return Err(ConfigError::DuplicateStorageKey(key.to_string()));
            }
        }

        parse_shortcut(&self.palette_shortcut).map_err(ConfigError::Shortcut)
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroBreakpoint,
    BlankStorageKey(&'static str),
    DuplicateStorageKey(String),
    Shortcut(ShortcutError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroBreakpoint => write!(f, "desktop_breakpoint must be greater than zero"),
            Self::BlankStorageKey(field) => write!(f, "{field} must not be blank"),
            Self::DuplicateStorageKey(key) => write!(f, "storage key used twice: {key}"),
            Self::Shortcut(err) => write!(f, "invalid palette shortcut: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Shortcut(err) => Some(err),
            _ => None,
        }
    }
}
