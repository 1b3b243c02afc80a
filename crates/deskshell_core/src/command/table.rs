//! Static command table and the built-in entries.

use crate::command::action::{CommandAction, ShellEffect};
use crate::host::Advisory;
use crate::model::overlay::OverlayId;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Advisory code shown when `report-issue` opens the service desk.
pub const REPORT_ISSUE_HINT_CODE: &str = "report_issue_hint";

/// Palette group, iterated in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandCategory {
    Recent,
    Navigation,
    Dialogs,
    Actions,
}

impl CommandCategory {
    /// Fixed rendering order.
    pub const ORDER: [CommandCategory; 4] = [
        CommandCategory::Recent,
        CommandCategory::Navigation,
        CommandCategory::Dialogs,
        CommandCategory::Actions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Recent => "Recent",
            Self::Navigation => "Navigation",
            Self::Dialogs => "Dialogs",
            Self::Actions => "Actions",
        }
    }
}

/// One invocable palette entry.
#[derive(Debug, Clone)]
pub struct CommandEntry {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: CommandCategory,
    pub keywords: Vec<String>,
    pub action: CommandAction,
    /// Display-only shortcut hint.
    pub shortcut: Option<String>,
}

impl CommandEntry {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: CommandCategory,
        action: CommandAction,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            category,
            keywords: Vec::new(),
            action,
            shortcut: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|keyword| keyword.to_string()).collect();
        self
    }

    pub fn shortcut(mut self, label: impl Into<String>) -> Self {
        self.shortcut = Some(label.into());
        self
    }

    /// Case-insensitive substring match on title, description, or any keyword.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(needle))
            || self
                .keywords
                .iter()
                .any(|keyword| keyword.to_lowercase().contains(needle))
    }
}

/// Command table construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandTableError {
    InvalidCommandId(String),
    DuplicateCommandId(String),
    /// `recent` entries are derived from history, never declared.
    RecentCategoryDeclared(String),
}

impl Display for CommandTableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCommandId(value) => write!(f, "command id is invalid: {value}"),
            Self::DuplicateCommandId(value) => write!(f, "command id already declared: {value}"),
            Self::RecentCategoryDeclared(value) => {
                write!(f, "command `{value}` cannot be declared in the recent category")
            }
        }
    }
}

impl Error for CommandTableError {}

/// Immutable, validated table of palette entries.
#[derive(Debug, Clone)]
pub struct CommandTable {
    entries: Vec<CommandEntry>,
}

impl CommandTable {
    /// Validates ids (non-blank, unique) and categories.
    pub fn new(entries: Vec<CommandEntry>) -> Result<Self, CommandTableError> {
        let mut seen = BTreeSet::new();
        for entry in &entries {
            let id = entry.id.trim();
            if id.is_empty() || id != entry.id {
                return Err(CommandTableError::InvalidCommandId(entry.id.clone()));
            }
            if entry.category == CommandCategory::Recent {
                return Err(CommandTableError::RecentCategoryDeclared(entry.id.clone()));
            }
            if !seen.insert(id) {
                return Err(CommandTableError::DuplicateCommandId(entry.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn open_overlay(id: OverlayId) -> CommandAction {
    CommandAction::new(move |ctx| ctx.overlays().open(id.clone()))
}

fn navigate(section: &'static str) -> CommandAction {
    CommandAction::new(move |ctx| ctx.emit(ShellEffect::NavigateTo(section.to_string())))
}

/// Built-in dashboard commands.
pub fn builtin_commands() -> Vec<CommandEntry> {
    use CommandCategory::{Actions, Dialogs, Navigation};

    vec![
        CommandEntry::new("nav-home", "Go to Dashboard", Navigation, navigate("home"))
            .description("Back to the top of the intranet home page")
            .keywords(&["home", "start", "overview"]),
        CommandEntry::new(
            "nav-announcements",
            "Company Announcements",
            Navigation,
            navigate("announcements"),
        )
        .description("Latest news from leadership and HR")
        .keywords(&["news", "updates"]),
        CommandEntry::new("nav-quick-links", "Quick Links", Navigation, navigate("quick-links"))
            .description("Frequently used tools and portals")
            .keywords(&["shortcuts", "tools", "portal"]),
        CommandEntry::new("nav-events", "Upcoming Events", Navigation, navigate("events"))
            .description("Town halls, trainings and socials")
            .keywords(&["calendar", "schedule"]),
        CommandEntry::new(
            "open-directory",
            "Employee Directory",
            Dialogs,
            open_overlay(OverlayId::Directory),
        )
        .description("Find colleagues and contact details")
        .keywords(&["people", "contacts", "phone", "email"]),
        CommandEntry::new("open-calendar", "Calendar", Dialogs, open_overlay(OverlayId::Calendar))
            .description("Meetings and team schedule")
            .keywords(&["meetings", "schedule", "events"]),
        CommandEntry::new(
            "open-service-desk",
            "Service Desk",
            Dialogs,
            open_overlay(OverlayId::ServiceDesk),
        )
        .description("Open and track support tickets")
        .keywords(&["it", "support", "ticket", "helpdesk"]),
        CommandEntry::new("open-notes", "My Notes", Dialogs, open_overlay(OverlayId::Notes))
            .description("Personal notes and to-dos")
            .keywords(&["memo", "todo", "journal"]),
        CommandEntry::new(
            "open-knowledge-base",
            "Knowledge Base",
            Dialogs,
            open_overlay(OverlayId::KnowledgeBase),
        )
        .description("Policies, guides and how-to articles")
        .keywords(&["wiki", "docs", "policy", "faq"]),
        CommandEntry::new("open-time-off", "Time Off", Dialogs, open_overlay(OverlayId::TimeOff))
            .description("Leave balance and requests")
            .keywords(&["vacation", "leave", "pto", "holiday"]),
        CommandEntry::new(
            "open-room-booking",
            "Room Booking",
            Dialogs,
            open_overlay(OverlayId::RoomBooking),
        )
        .description("Reserve meeting rooms")
        .keywords(&["room", "reserve", "space"]),
        CommandEntry::new("open-expenses", "Expenses", Dialogs, open_overlay(OverlayId::Expenses))
            .description("Submit and review expense claims")
            .keywords(&["receipt", "reimbursement", "claim"]),
        CommandEntry::new("open-settings", "Settings", Dialogs, open_overlay(OverlayId::Settings))
            .description("Notifications, display and privacy preferences")
            .keywords(&["preferences", "options", "accessibility"])
            .shortcut("Mod+,"),
        CommandEntry::new("open-help", "Help Center", Dialogs, open_overlay(OverlayId::Help))
            .keywords(&["support", "guide", "shortcuts"]),
        CommandEntry::new(
            "new-note",
            "New Note",
            Actions,
            CommandAction::new(|ctx| {
                ctx.overlays().open(OverlayId::Notes);
                ctx.emit(ShellEffect::NewNoteDraft);
            }),
        )
        .description("Start a blank note")
        .keywords(&["create", "write", "memo"]),
        CommandEntry::new(
            "request-vpn",
            "Request VPN Access",
            Actions,
            open_overlay(OverlayId::ServiceDesk),
        )
        .description("Remote network access for working from home")
        .keywords(&["vpn", "remote", "network"]),
        CommandEntry::new(
            "report-issue",
            "Report an IT Issue",
            Actions,
            CommandAction::new(|ctx| {
                ctx.overlays().open(OverlayId::ServiceDesk);
                ctx.emit(ShellEffect::Advise(Advisory::info(
                    REPORT_ISSUE_HINT_CODE,
                    "Describe the problem and the Service Desk will follow up.",
                )));
            }),
        )
        .description("Hardware, software or access problems")
        .keywords(&["broken", "bug", "laptop", "password"]),
        CommandEntry::new(
            "toggle-side-panel",
            "Toggle Side Panel",
            Actions,
            CommandAction::new(|ctx| ctx.emit(ShellEffect::ToggleSidePanel)),
        )
        .keywords(&["sidebar", "layout"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::{
        builtin_commands, CommandAction, CommandCategory, CommandEntry, CommandTable,
        CommandTableError,
    };

    fn noop() -> CommandAction {
        CommandAction::new(|_| {})
    }

    #[test]
    fn builtin_table_is_valid() {
        let table = CommandTable::new(builtin_commands()).expect("builtin table validates");
        assert!(table.get("open-notes").is_some());
        assert!(table
            .entries()
            .iter()
            .all(|entry| entry.category != CommandCategory::Recent));
    }

    #[test]
    fn rejects_duplicate_blank_and_recent_entries() {
        let duplicate = CommandTable::new(vec![
            CommandEntry::new("a", "A", CommandCategory::Actions, noop()),
            CommandEntry::new("a", "A again", CommandCategory::Dialogs, noop()),
        ]);
        assert_eq!(
            duplicate.unwrap_err(),
            CommandTableError::DuplicateCommandId("a".to_string())
        );

        let blank = CommandTable::new(vec![CommandEntry::new(
            " ",
            "Blank",
            CommandCategory::Actions,
            noop(),
        )]);
        assert!(matches!(blank, Err(CommandTableError::InvalidCommandId(_))));

        let recent = CommandTable::new(vec![CommandEntry::new(
            "r",
            "R",
            CommandCategory::Recent,
            noop(),
        )]);
        assert!(matches!(recent, Err(CommandTableError::RecentCategoryDeclared(_))));
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        let entry = CommandEntry::new("x", "Service Desk", CommandCategory::Dialogs, noop())
            .description("Open Tickets")
            .keywords(&["IT"]);
        assert!(entry.matches_lowercase("desk"));
        assert!(entry.matches_lowercase("tickets"));
        assert!(entry.matches_lowercase("it"));
        assert!(!entry.matches_lowercase("vpn"));
    }
}
