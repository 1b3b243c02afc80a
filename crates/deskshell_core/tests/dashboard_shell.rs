use deskshell_core::{
    builtin_commands, Advisory, AdvisoryLevel, Clock, CommandCategory, Dashboard, Host,
    InitialState, KeyEvent, KeyOutcome, KeyValueStore, MemoryKeyValueStore, NoteDraft,
    OverlayId, SaveOutcome, ShellConfig, ShellError,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct RecordingHost {
    width: u32,
    advisories: RefCell<Vec<Advisory>>,
    navigations: RefCell<Vec<String>>,
}

impl RecordingHost {
    fn with_width(width: u32) -> Rc<Self> {
        Rc::new(Self {
            width,
            ..Self::default()
        })
    }
}

impl Host for RecordingHost {
    fn viewport_width(&self) -> u32 {
        self.width
    }

    fn advise(&self, advisory: &Advisory) {
        self.advisories.borrow_mut().push(advisory.clone());
    }

    fn navigate(&self, section: &str) {
        self.navigations.borrow_mut().push(section.to_string());
    }
}

struct FixedClock(Cell<i64>);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0.get()
    }
}

type Shell = Dashboard<MemoryKeyValueStore, FixedClock>;

fn shell_with(storage: &Rc<MemoryKeyValueStore>, host: &Rc<RecordingHost>) -> Shell {
    let host: Rc<dyn Host> = host.clone();
    Dashboard::with_parts(
        ShellConfig::default(),
        Rc::clone(storage),
        host,
        FixedClock(Cell::new(1_700_000_000_000)),
        builtin_commands(),
    )
    .expect("valid shell")
}

fn fresh_shell() -> (Rc<MemoryKeyValueStore>, Rc<RecordingHost>, Shell) {
    let storage = Rc::new(MemoryKeyValueStore::new());
    let host = RecordingHost::with_width(1280);
    let shell = shell_with(&storage, &host);
    (storage, host, shell)
}

fn ctrl_k() -> KeyEvent {
    KeyEvent::new("k").with_ctrl()
}

#[test]
fn shortcut_is_ignored_until_mounted() {
    let (_, _, mut shell) = fresh_shell();
    assert_eq!(shell.handle_key(&ctrl_k()), KeyOutcome::Ignored);
    assert!(!shell.is_palette_open());
    assert!(!shell.commands().listener().is_attached());
}

#[test]
fn mounted_shortcut_toggles_palette_and_prevents_default() {
    let (_, _, mut shell) = fresh_shell();
    {
        let mut mounted = shell.mount();
        assert!(mounted.commands().listener().is_attached());

        let outcome = mounted.handle_key(&ctrl_k());
        assert_eq!(outcome, KeyOutcome::Handled);
        assert!(outcome.prevent_default());
        assert!(mounted.is_palette_open());

        let meta = KeyEvent::new("k").with_meta();
        assert_eq!(mounted.handle_key(&meta), KeyOutcome::Handled);
        assert!(!mounted.is_palette_open());

        assert_eq!(mounted.handle_key(&KeyEvent::new("k")), KeyOutcome::Ignored);
        assert!(!mounted.is_palette_open());
    }

    assert!(!shell.commands().listener().is_attached());
    assert_eq!(shell.handle_key(&ctrl_k()), KeyOutcome::Ignored);
}

#[test]
fn remounting_registers_listener_once_per_mount() {
    let (_, _, mut shell) = fresh_shell();
    drop(shell.mount());
    {
        let mounted = shell.mount();
        assert!(mounted.commands().listener().is_attached());
    }
    assert_eq!(shell.commands().listener().registrations(), 2);
    assert!(!shell.commands().listener().is_attached());
}

#[test]
fn selecting_command_opens_overlay_and_records_usage() {
    let (_, _, mut shell) = fresh_shell();
    shell.toggle_palette();
    shell.set_palette_query("ticket");

    let results = shell.palette_results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].category, CommandCategory::Dialogs);
    assert_eq!(results[0].entries[0].id, "open-service-desk");

    assert!(shell.select_command("open-service-desk"));
    assert!(shell.is_overlay_open(&OverlayId::ServiceDesk));
    assert!(!shell.is_palette_open());
    assert_eq!(shell.commands().query(), "");

    let prefs = shell.preferences().get();
    assert_eq!(prefs.command_palette_history, vec!["open-service-desk".to_string()]);
    assert_eq!(prefs.recent_searches, vec!["ticket".to_string()]);
}

#[test]
fn unknown_command_keeps_palette_open() {
    let (_, _, mut shell) = fresh_shell();
    shell.toggle_palette();
    assert!(!shell.select_command("does-not-exist"));
    assert!(shell.is_palette_open());
    assert!(shell.preferences().get().command_palette_history.is_empty());
}

#[test]
fn recent_group_lists_used_commands_first() {
    let (_, _, mut shell) = fresh_shell();
    shell.toggle_palette();
    shell.select_command("open-calendar");
    shell.toggle_palette();
    shell.select_command("open-notes");

    shell.toggle_palette();
    let results = shell.palette_results();
    assert_eq!(results[0].category, CommandCategory::Recent);
    let recent = results[0]
        .entries
        .iter()
        .map(|entry| entry.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(recent, vec!["open-notes", "open-calendar"]);
    assert_eq!(results[1].category, CommandCategory::Navigation);
}

#[test]
fn enter_activates_highlighted_result() {
    let (_, _, mut shell) = fresh_shell();
    let mut mounted = shell.mount();
    mounted.handle_key(&ctrl_k());
    mounted.set_palette_query("vpn");

    let outcome = mounted.handle_key(&KeyEvent::new("Enter"));
    assert_eq!(outcome, KeyOutcome::Activate("request-vpn".to_string()));
    assert!(!mounted.is_palette_open());
    assert!(mounted.is_overlay_open(&OverlayId::ServiceDesk));
    assert_eq!(
        mounted.preferences().get().recent_searches,
        vec!["vpn".to_string()]
    );
}

#[test]
fn arrows_move_highlight_and_escape_closes() {
    let (_, _, mut shell) = fresh_shell();
    let mut mounted = shell.mount();
    mounted.handle_key(&ctrl_k());
    mounted.set_palette_query("");

    assert_eq!(mounted.handle_key(&KeyEvent::new("ArrowUp")), KeyOutcome::Handled);
    assert!(mounted.commands().highlighted() > 0);
    assert_eq!(mounted.handle_key(&KeyEvent::new("ArrowDown")), KeyOutcome::Handled);
    assert_eq!(mounted.commands().highlighted(), 0);

    assert_eq!(mounted.handle_key(&KeyEvent::new("Escape")), KeyOutcome::Handled);
    assert!(!mounted.is_palette_open());
    assert_eq!(mounted.handle_key(&KeyEvent::new("Escape")), KeyOutcome::Ignored);
}

#[test]
fn navigation_commands_reach_host() {
    let (_, host, mut shell) = fresh_shell();
    shell.toggle_palette();
    assert!(shell.select_command("nav-events"));
    assert_eq!(*host.navigations.borrow(), vec!["events".to_string()]);
    assert!(!shell.overlays().any_open());
}

#[test]
fn report_issue_opens_service_desk_with_hint() {
    let (_, host, mut shell) = fresh_shell();
    shell.toggle_palette();
    assert!(shell.select_command("report-issue"));
    assert!(shell.is_overlay_open(&OverlayId::ServiceDesk));

    let advisories = host.advisories.borrow();
    assert_eq!(advisories.len(), 1);
    assert_eq!(advisories[0].level, AdvisoryLevel::Info);
    assert_eq!(advisories[0].code, "report_issue_hint");
}

#[test]
fn toggle_side_panel_command_flips_and_persists_panel() {
    let (storage, _, mut shell) = fresh_shell();
    assert!(shell.side_panel().is_open());
    assert_eq!(shell.side_panel().initial_state(), InitialState::Viewport);

    shell.toggle_palette();
    assert!(shell.select_command("toggle-side-panel"));
    assert!(!shell.side_panel().is_open());
    assert_eq!(
        storage.get("intranet-side-panel-open").unwrap(),
        Some("false".to_string())
    );
}

#[test]
fn new_note_command_opens_notes_with_blank_draft() {
    let (_, _, mut shell) = fresh_shell();
    shell.notes_mut().draft_mut().title = "stale".to_string();

    shell.toggle_palette();
    assert!(shell.select_command("new-note"));
    assert!(shell.is_overlay_open(&OverlayId::Notes));
    assert!(shell.notes().is_editing());
    assert_eq!(shell.notes().draft(), &NoteDraft::default());
}

#[test]
fn rejected_note_save_reaches_host_advisory() {
    let (_, host, mut shell) = fresh_shell();
    shell.notes_mut().create();

    let outcome = shell.save_note(NoteDraft::default());
    assert!(matches!(outcome, SaveOutcome::Rejected(_)));
    let advisories = host.advisories.borrow();
    assert_eq!(advisories.len(), 1);
    assert_eq!(advisories[0].level, AdvisoryLevel::Warning);
    assert_eq!(advisories[0].code, "note_empty");
    assert!(shell.notes().notes().is_empty());
}

#[test]
fn saved_note_uses_shell_clock() {
    let (_, host, mut shell) = fresh_shell();
    let outcome = shell.save_note(NoteDraft {
        title: "Plan".to_string(),
        content: "Q1".to_string(),
        ..NoteDraft::default()
    });
    let SaveOutcome::Created(id) = outcome else {
        panic!("expected create");
    };
    let note = shell.notes().get(id).unwrap();
    assert_eq!(note.created_at, 1_700_000_000_000);
    assert!(host.advisories.borrow().is_empty());
}

#[test]
fn side_panel_defaults_follow_viewport_until_persisted() {
    let storage = Rc::new(MemoryKeyValueStore::new());
    let narrow = shell_with(&storage, &RecordingHost::with_width(800));
    assert!(!narrow.side_panel().is_open());
    assert_eq!(narrow.side_panel().initial_state(), InitialState::Viewport);

    let edge = shell_with(&storage, &RecordingHost::with_width(1024));
    assert!(edge.side_panel().is_open());

    storage.set("intranet-side-panel-open", "false").unwrap();
    let wide = shell_with(&storage, &RecordingHost::with_width(1920));
    assert!(!wide.side_panel().is_open());
    assert_eq!(wide.side_panel().initial_state(), InitialState::Persisted);
}

#[test]
fn state_survives_a_new_shell_over_same_storage() {
    let storage = Rc::new(MemoryKeyValueStore::new());
    let host = RecordingHost::with_width(1280);
    {
        let mut shell = shell_with(&storage, &host);
        shell.toggle_palette();
        shell.set_palette_query("kb");
        shell.select_command("open-knowledge-base");
        shell.side_panel_mut().close();
        shell.save_note(NoteDraft {
            title: "Kept".to_string(),
            ..NoteDraft::default()
        });
    }

    let shell = shell_with(&storage, &host);
    assert!(!shell.side_panel().is_open());
    assert_eq!(
        shell.preferences().get().command_palette_history,
        vec!["open-knowledge-base".to_string()]
    );
    assert_eq!(shell.notes().notes().len(), 1);
    assert!(!shell.overlays().any_open());
}

#[test]
fn invalid_config_is_rejected() {
    let storage = Rc::new(MemoryKeyValueStore::new());
    let host: Rc<dyn Host> = RecordingHost::with_width(1280);
    let config = ShellConfig {
        notes_key: "intranet-preferences".to_string(),
        ..ShellConfig::default()
    };
    let result = Dashboard::new(config, storage, host);
    assert!(matches!(result, Err(ShellError::Config(_))));
}
