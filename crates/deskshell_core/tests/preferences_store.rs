use deskshell_core::{
    load_json, AccessibilityPatch, DisplayPatch, EmailDigest, KeyValueStore, MemoryKeyValueStore,
    NotificationsPatch, Preferences, PreferencesStore, PrivacyPatch, COMMAND_HISTORY_MAX,
    RECENT_SEARCHES_MAX,
};
use std::rc::Rc;

const KEY: &str = "intranet-preferences";

fn fresh() -> (Rc<MemoryKeyValueStore>, PreferencesStore<Rc<MemoryKeyValueStore>>) {
    let storage = Rc::new(MemoryKeyValueStore::new());
    let store = PreferencesStore::load(Rc::clone(&storage), KEY);
    (storage, store)
}

fn stored(storage: &MemoryKeyValueStore) -> Preferences {
    load_json::<Preferences, _>(storage, KEY).expect("preferences persisted")
}

#[test]
fn missing_or_corrupt_storage_loads_defaults() {
    let (_, store) = fresh();
    assert_eq!(store.get(), &Preferences::default());

    let storage = MemoryKeyValueStore::new();
    storage.set(KEY, "{\"display\": [oops").unwrap();
    let store = PreferencesStore::load(&storage, KEY);
    assert_eq!(store.get(), &Preferences::default());
}

#[test]
fn update_section_leaves_other_sections_byte_identical() {
    let (storage, mut store) = fresh();
    store.update_section(NotificationsPatch {
        email_digest: Some(EmailDigest::Weekly),
        ..NotificationsPatch::default()
    });
    store.update_section(PrivacyPatch {
        online_status: Some(false),
        ..PrivacyPatch::default()
    });

    let before = storage.get(KEY).unwrap().unwrap();
    let before_json: serde_json::Value = serde_json::from_str(&before).unwrap();

    store.update_section(DisplayPatch {
        compact_mode: Some(true),
        ..DisplayPatch::default()
    });

    let after = storage.get(KEY).unwrap().unwrap();
    let after_json: serde_json::Value = serde_json::from_str(&after).unwrap();
    for section in ["notifications", "privacy", "accessibility"] {
        assert_eq!(
            serde_json::to_string(&before_json[section]).unwrap(),
            serde_json::to_string(&after_json[section]).unwrap(),
            "section {section} changed"
        );
    }
    assert_eq!(after_json["display"]["compactMode"], true);
    assert_eq!(after_json["display"]["animationsEnabled"], true);
    assert!(store.get().display.compact_mode);
}

#[test]
fn every_mutation_writes_the_whole_record() {
    let (storage, mut store) = fresh();
    store.update_section(AccessibilityPatch {
        large_text: Some(true),
        ..AccessibilityPatch::default()
    });
    store.add_recent_search("payroll");
    store.toggle_favorite("calendar");

    let persisted = stored(&storage);
    assert_eq!(&persisted, store.get());
    assert!(persisted.accessibility.large_text);
    assert_eq!(persisted.recent_searches, vec!["payroll".to_string()]);
    assert_eq!(persisted.favorite_dialogs, vec!["calendar".to_string()]);
}

#[test]
fn eleven_recent_searches_keep_ten_most_recent_first() {
    let (storage, mut store) = fresh();
    for idx in 0..11 {
        store.add_recent_search(&format!("term-{idx}"));
    }

    let expected = (1..11)
        .rev()
        .map(|idx| format!("term-{idx}"))
        .collect::<Vec<_>>();
    assert_eq!(store.get().recent_searches.len(), RECENT_SEARCHES_MAX);
    assert_eq!(store.get().recent_searches, expected);
    assert_eq!(stored(&storage).recent_searches, expected);
}

#[test]
fn repeated_search_moves_to_front_without_duplicates() {
    let (_, mut store) = fresh();
    store.add_recent_search("vpn");
    store.add_recent_search("payroll");
    store.add_recent_search("vpn");
    assert_eq!(
        store.get().recent_searches,
        vec!["vpn".to_string(), "payroll".to_string()]
    );

    store.clear_recent_searches();
    assert!(store.get().recent_searches.is_empty());
}

#[test]
fn command_history_is_capped_at_twenty() {
    let (_, mut store) = fresh();
    for idx in 0..25 {
        store.add_command_history(&format!("cmd-{idx}"));
    }
    let history = &store.get().command_palette_history;
    assert_eq!(history.len(), COMMAND_HISTORY_MAX);
    assert_eq!(history.first().map(String::as_str), Some("cmd-24"));
    assert_eq!(history.last().map(String::as_str), Some("cmd-5"));
}

#[test]
fn reset_restores_exact_defaults_and_persists_them() {
    let (storage, mut store) = fresh();
    store.update_section(DisplayPatch {
        reduced_motion: Some(true),
        animations_enabled: Some(false),
        ..DisplayPatch::default()
    });
    store.add_command_history("open-notes");
    store.toggle_favorite("directory");

    store.reset();
    assert_eq!(store.get(), &Preferences::default());
    assert_eq!(stored(&storage), Preferences::default());
}

#[test]
fn reload_sees_previous_session_state() {
    let storage = Rc::new(MemoryKeyValueStore::new());
    {
        let mut store = PreferencesStore::load(Rc::clone(&storage), KEY);
        store.toggle_favorite("service-desk");
        store.add_recent_search("expenses");
    }

    let store = PreferencesStore::load(Rc::clone(&storage), KEY);
    assert!(store.is_favorite("service-desk"));
    assert_eq!(store.get().recent_searches, vec!["expenses".to_string()]);
}

#[test]
fn failed_writes_keep_in_memory_state() {
    let (storage, mut store) = fresh();
    storage.fail_writes(true);
    store.add_recent_search("offline");

    assert_eq!(store.get().recent_searches, vec!["offline".to_string()]);
    assert_eq!(storage.get(KEY).unwrap(), None);
}
