//! Keyboard events and shortcut declarations.
//!
//! # Invariants
//! - Key matching is exact on the DOM `key` value (`"k"` never matches `"K"`).
//! - Modifiers not named by a shortcut are not checked.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static KEY_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:[a-z0-9/.,;]|escape|esc|enter|tab|space|arrow(?:up|down|left|right)|f(?:1[0-2]|[1-9]))$")
        .expect("valid key token regex")
});

/// One keydown as delivered by the host runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyEvent {
    /// DOM `KeyboardEvent.key` value, e.g. `"k"`, `"Escape"`, `"ArrowDown"`.
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Primary modifier required by a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryModifier {
    Ctrl,
    Meta,
    /// Ctrl or Meta, whichever the platform uses.
    Mod,
}

/// Parsed shortcut declaration such as `Mod+K`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub key: String,
    pub primary: Option<PrimaryModifier>,
    pub shift: bool,
    pub alt: bool,
}

impl Shortcut {
    /// Returns whether `event` triggers this shortcut.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if event.key != self.key {
            return false;
        }
        let primary_ok = match self.primary {
            None => true,
            Some(PrimaryModifier::Ctrl) => event.ctrl,
            Some(PrimaryModifier::Meta) => event.meta,
            Some(PrimaryModifier::Mod) => event.ctrl || event.meta,
        };
        primary_ok && (!self.shift || event.shift) && (!self.alt || event.alt)
    }

    /// Display label, e.g. `Mod+K`.
    pub fn label(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        match self.primary {
            Some(PrimaryModifier::Ctrl) => parts.push("Ctrl".to_string()),
            Some(PrimaryModifier::Meta) => parts.push("Meta".to_string()),
            Some(PrimaryModifier::Mod) => parts.push("Mod".to_string()),
            None => {}
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        if self.alt {
            parts.push("Alt".to_string());
        }
        if self.key.chars().count() == 1 {
            parts.push(self.key.to_uppercase());
        } else {
            parts.push(self.key.clone());
        }
        parts.join("+")
    }
}

/// Shortcut declaration parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutError {
    Empty,
    UnknownModifier(String),
    InvalidKey(String),
}

impl Display for ShortcutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "shortcut must not be empty"),
            Self::UnknownModifier(value) => write!(f, "unknown shortcut modifier: {value}"),
            Self::InvalidKey(value) => write!(f, "invalid shortcut key: {value}"),
        }
    }
}

impl Error for ShortcutError {}

/// Parses a `+`-separated declaration like `Mod+K` or `Ctrl+Shift+N`.
///
/// Single-character keys normalize to lowercase so they compare against the
/// unshifted DOM key; named keys normalize to DOM names (`Escape`, `ArrowUp`).
pub fn parse_shortcut(value: &str) -> Result<Shortcut, ShortcutError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ShortcutError::Empty);
    }

    let tokens = trimmed.split('+').map(str::trim).collect::<Vec<_>>();
    let (key_token, modifiers) = match tokens.split_last() {
        Some((key, modifiers)) => (*key, modifiers),
        None => return Err(ShortcutError::Empty),
    };

    let mut shortcut = Shortcut {
        key: normalize_key(key_token)?,
        primary: None,
        shift: false,
        alt: false,
    };

    for modifier in modifiers {
        match modifier.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => shortcut.primary = Some(PrimaryModifier::Ctrl),
            "cmd" | "meta" => shortcut.primary = Some(PrimaryModifier::Meta),
            "mod" => shortcut.primary = Some(PrimaryModifier::Mod),
            "shift" => shortcut.shift = true,
            "alt" | "option" => shortcut.alt = true,
            _ => return Err(ShortcutError::UnknownModifier(modifier.to_string())),
        }
    }

    Ok(shortcut)
}

fn normalize_key(token: &str) -> Result<String, ShortcutError> {
    if !KEY_TOKEN_RE.is_match(token) {
        return Err(ShortcutError::InvalidKey(token.to_string()));
    }
    let lower = token.to_ascii_lowercase();
    let normalized = match lower.as_str() {
        "escape" | "esc" => "Escape".to_string(),
        "enter" => "Enter".to_string(),
        "tab" => "Tab".to_string(),
        "space" => " ".to_string(),
        "arrowup" => "ArrowUp".to_string(),
        "arrowdown" => "ArrowDown".to_string(),
        "arrowleft" => "ArrowLeft".to_string(),
        "arrowright" => "ArrowRight".to_string(),
        other if other.len() > 1 && other.starts_with('f') => other.to_ascii_uppercase(),
        other => other.to_string(),
    };
    Ok(normalized)
}
