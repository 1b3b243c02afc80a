//! Overlay identifiers.
//!
//! Known panels form a closed enumeration so a typo cannot produce an
//! unreachable overlay. `Custom` admits panels added by the host later; its
//! value is validated on parse.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Identifier of one independently shown/hidden modal panel.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OverlayId {
    Directory,
    Calendar,
    ServiceDesk,
    Notes,
    Settings,
    Announcements,
    KnowledgeBase,
    TimeOff,
    RoomBooking,
    Expenses,
    Help,
    Profile,
    /// Host-registered panel outside the built-in set.
    Custom(String),
}

const BUILTIN_OVERLAYS: &[OverlayId] = &[
    OverlayId::Directory,
    OverlayId::Calendar,
    OverlayId::ServiceDesk,
    OverlayId::Notes,
    OverlayId::Settings,
    OverlayId::Announcements,
    OverlayId::KnowledgeBase,
    OverlayId::TimeOff,
    OverlayId::RoomBooking,
    OverlayId::Expenses,
    OverlayId::Help,
    OverlayId::Profile,
];

impl OverlayId {
    /// Stable string key used by triggers and favorites.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Directory => "directory",
            Self::Calendar => "calendar",
            Self::ServiceDesk => "service-desk",
            Self::Notes => "notes",
            Self::Settings => "settings",
            Self::Announcements => "announcements",
            Self::KnowledgeBase => "knowledge-base",
            Self::TimeOff => "time-off",
            Self::RoomBooking => "room-booking",
            Self::Expenses => "expenses",
            Self::Help => "help",
            Self::Profile => "profile",
            Self::Custom(value) => value.as_str(),
        }
    }

    /// Built-in panels in declaration order.
    pub fn builtin() -> &'static [OverlayId] {
        BUILTIN_OVERLAYS
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl Display for OverlayId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlayId {
    type Err = OverlayIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        if normalized.is_empty() {
            return Err(OverlayIdError::Empty);
        }
        if let Some(known) = BUILTIN_OVERLAYS
            .iter()
            .find(|overlay| overlay.as_str() == normalized)
        {
            return Ok(known.clone());
        }
        if !is_valid_custom_id(normalized) {
            return Err(OverlayIdError::Malformed(normalized.to_string()));
        }
        Ok(Self::Custom(normalized.to_string()))
    }
}

/// Overlay identifier parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayIdError {
    Empty,
    Malformed(String),
}

impl Display for OverlayIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "overlay id must not be empty"),
            Self::Malformed(value) => write!(f, "overlay id is malformed: {value}"),
        }
    }
}

impl Error for OverlayIdError {}

fn is_valid_custom_id(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
