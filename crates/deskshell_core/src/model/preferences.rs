//! User preference model.
//!
//! # Responsibility
//! - Define the fixed-shape nested preference record and its defaults.
//! - Define one patch type per section with a dedicated merge.
//! - Define the bounded most-recent-first history policy.
//!
//! # Invariants
//! - Every section and list is always present; decoding fills gaps with
//!   defaults instead of leaving fields undefined.
//! - A patch only touches its own section and only the keys it sets.

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in `recent_searches`.
pub const RECENT_SEARCHES_MAX: usize = 10;
/// Maximum number of entries kept in `command_palette_history`.
pub const COMMAND_HISTORY_MAX: usize = 20;

/// Email digest cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailDigest {
    None,
    Daily,
    Weekly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub show_desktop_notifications: bool,
    pub sound_enabled: bool,
    pub email_digest: EmailDigest,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            show_desktop_notifications: true,
            sound_enabled: true,
            email_digest: EmailDigest::Daily,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettings {
    pub compact_mode: bool,
    pub animations_enabled: bool,
    pub reduced_motion: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            compact_mode: false,
            animations_enabled: true,
            reduced_motion: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrivacySettings {
    pub online_status: bool,
    pub activity_status: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            online_status: true,
            activity_status: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilitySettings {
    pub high_contrast: bool,
    pub large_text: bool,
    pub screen_reader: bool,
}

/// Complete persisted preference record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub notifications: NotificationSettings,
    pub display: DisplaySettings,
    pub privacy: PrivacySettings,
    pub accessibility: AccessibilitySettings,
    /// Most-recent-first, de-duplicated, at most [`RECENT_SEARCHES_MAX`].
    pub recent_searches: Vec<String>,
    /// Most-recent-first command ids, at most [`COMMAND_HISTORY_MAX`].
    pub command_palette_history: Vec<String>,
    /// Favorite overlay ids; membership only, order carries no meaning.
    pub favorite_dialogs: Vec<String>,
}

/// The four nested sections of [`Preferences`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceSection {
    Notifications,
    Display,
    Privacy,
    Accessibility,
}

impl PreferenceSection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notifications => "notifications",
            Self::Display => "display",
            Self::Privacy => "privacy",
            Self::Accessibility => "accessibility",
        }
    }
}

/// Partial update for exactly one preference section.
pub trait SectionPatch {
    /// Section this patch merges into.
    const SECTION: PreferenceSection;

    /// Merges set keys into the owning section of `prefs`.
    fn merge_into(&self, prefs: &mut Preferences);

    /// Returns whether the patch sets no key.
    fn is_empty(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationsPatch {
    pub show_desktop_notifications: Option<bool>,
    pub sound_enabled: Option<bool>,
    pub email_digest: Option<EmailDigest>,
}

impl SectionPatch for NotificationsPatch {
    const SECTION: PreferenceSection = PreferenceSection::Notifications;

    fn merge_into(&self, prefs: &mut Preferences) {
        let section = &mut prefs.notifications;
        merge_field(&mut section.show_desktop_notifications, self.show_desktop_notifications);
        merge_field(&mut section.sound_enabled, self.sound_enabled);
        merge_field(&mut section.email_digest, self.email_digest);
    }

    fn is_empty(&self) -> bool {
        self.show_desktop_notifications.is_none()
            && self.sound_enabled.is_none()
            && self.email_digest.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayPatch {
    pub compact_mode: Option<bool>,
    pub animations_enabled: Option<bool>,
    pub reduced_motion: Option<bool>,
}

impl SectionPatch for DisplayPatch {
    const SECTION: PreferenceSection = PreferenceSection::Display;

    fn merge_into(&self, prefs: &mut Preferences) {
        let section = &mut prefs.display;
        merge_field(&mut section.compact_mode, self.compact_mode);
        merge_field(&mut section.animations_enabled, self.animations_enabled);
        merge_field(&mut section.reduced_motion, self.reduced_motion);
    }

    fn is_empty(&self) -> bool {
        self.compact_mode.is_none()
            && self.animations_enabled.is_none()
            && self.reduced_motion.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrivacyPatch {
    pub online_status: Option<bool>,
    pub activity_status: Option<bool>,
}

impl SectionPatch for PrivacyPatch {
    const SECTION: PreferenceSection = PreferenceSection::Privacy;

    fn merge_into(&self, prefs: &mut Preferences) {
        let section = &mut prefs.privacy;
        merge_field(&mut section.online_status, self.online_status);
        merge_field(&mut section.activity_status, self.activity_status);
    }

    fn is_empty(&self) -> bool {
        self.online_status.is_none() && self.activity_status.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessibilityPatch {
    pub high_contrast: Option<bool>,
    pub large_text: Option<bool>,
    pub screen_reader: Option<bool>,
}

impl SectionPatch for AccessibilityPatch {
    const SECTION: PreferenceSection = PreferenceSection::Accessibility;

    fn merge_into(&self, prefs: &mut Preferences) {
        let section = &mut prefs.accessibility;
        merge_field(&mut section.high_contrast, self.high_contrast);
        merge_field(&mut section.large_text, self.large_text);
        merge_field(&mut section.screen_reader, self.screen_reader);
    }

    fn is_empty(&self) -> bool {
        self.high_contrast.is_none() && self.large_text.is_none() && self.screen_reader.is_none()
    }
}

fn merge_field<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Records `entry` in a bounded most-recent-first history.
///
/// The entry is trimmed; blank entries are ignored. An existing equal entry is
/// moved to the front instead of duplicated, and the oldest entries beyond
/// `max` are evicted. Returns whether the list changed.
pub fn push_bounded_recent(list: &mut Vec<String>, entry: &str, max: usize) -> bool {
    let entry = entry.trim();
    if entry.is_empty() || max == 0 {
        return false;
    }
    if list.first().map(String::as_str) == Some(entry) {
        return false;
    }

    list.retain(|existing| existing != entry);
    list.insert(0, entry.to_string());
    list.truncate(max);
    true
}

#[cfg(test)]
mod tests {
    use super::{
        push_bounded_recent, DisplayPatch, EmailDigest, Preferences, SectionPatch,
        RECENT_SEARCHES_MAX,
    };

    #[test]
    fn bounded_recent_moves_duplicates_to_front() {
        let mut list = vec!["b".to_string(), "a".to_string()];
        assert!(push_bounded_recent(&mut list, "a", RECENT_SEARCHES_MAX));
        assert_eq!(list, vec!["a".to_string(), "b".to_string()]);
        assert!(!push_bounded_recent(&mut list, " a ", RECENT_SEARCHES_MAX));
    }

    #[test]
    fn bounded_recent_ignores_blank_entries() {
        let mut list = Vec::new();
        assert!(!push_bounded_recent(&mut list, "   ", 3));
        assert!(list.is_empty());
    }

    #[test]
    fn bounded_recent_evicts_oldest() {
        let mut list = Vec::new();
        for term in ["one", "two", "three", "four"] {
            push_bounded_recent(&mut list, term, 3);
        }
        assert_eq!(list, vec!["four", "three", "two"]);
    }

    #[test]
    fn patch_only_sets_present_keys() {
        let mut prefs = Preferences::default();
        let patch = DisplayPatch {
            reduced_motion: Some(true),
            ..DisplayPatch::default()
        };
        patch.merge_into(&mut prefs);
        assert!(prefs.display.reduced_motion);
        assert!(prefs.display.animations_enabled);
        assert!(!prefs.display.compact_mode);
        assert!(DisplayPatch::default().is_empty());
    }

    #[test]
    fn partial_json_decodes_to_shape_complete_record() {
        let prefs: Preferences =
            serde_json::from_str(r#"{"display":{"compactMode":true},"recentSearches":["vpn"]}"#)
                .expect("partial preferences decode");
        assert!(prefs.display.compact_mode);
        assert!(prefs.display.animations_enabled);
        assert_eq!(prefs.notifications.email_digest, EmailDigest::Daily);
        assert_eq!(prefs.recent_searches, vec!["vpn".to_string()]);
        assert!(prefs.favorite_dialogs.is_empty());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(Preferences::default()).expect("serialize");
        assert_eq!(json["notifications"]["emailDigest"], "daily");
        assert_eq!(json["display"]["animationsEnabled"], true);
        assert!(json["commandPaletteHistory"].as_array().is_some());
    }
}
