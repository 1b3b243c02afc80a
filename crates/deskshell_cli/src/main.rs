//! CLI smoke entry point.
//!
//! # Responsibility
//! - Drive one headless dashboard session against real storage.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `deskshell_cli [db_path] [log_dir]`. Without `db_path` the session
//! runs on an in-memory database.

use deskshell_core::{
    flatten_groups, Dashboard, HeadlessHost, KeyEvent, NoteDraft, SaveOutcome, ShellConfig,
    SqliteKeyValueStore,
};
use log::info;
use std::env;
use std::process::ExitCode;
use std::rc::Rc;

const HEADLESS_VIEWPORT_WIDTH: u32 = 1280;

fn main() -> ExitCode {
    println!("deskshell_core ping={}", deskshell_core::ping());
    println!("deskshell_core version={}", deskshell_core::core_version());

    match run(env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let config = ShellConfig::default();
    if let Some(log_dir) = args.get(1) {
        let log_dir = env::current_dir()
            .map_err(|err| err.to_string())?
            .join(log_dir);
        deskshell_core::init_logging(config.log_level, log_dir).map_err(|err| err.to_string())?;
    }

    let storage = match args.first() {
        Some(path) => SqliteKeyValueStore::open(path),
        None => SqliteKeyValueStore::open_in_memory(),
    }
    .map_err(|err| err.to_string())?;

    let host = Rc::new(HeadlessHost {
        width: HEADLESS_VIEWPORT_WIDTH,
    });
    let mut shell =
        Dashboard::new(config, Rc::new(storage), host).map_err(|err| err.to_string())?;
    println!("side_panel open={}", shell.side_panel().is_open());
    println!("notes count={}", shell.notes().notes().len());

    let mut mounted = shell.mount();
    let outcome = mounted.handle_key(&KeyEvent::new("k").with_ctrl());
    println!(
        "shortcut outcome={outcome:?} palette_open={}",
        mounted.is_palette_open()
    );

    mounted.set_palette_query("support");
    let results = mounted.palette_results();
    for group in &results {
        let ids = group
            .entries
            .iter()
            .map(|entry| entry.id.as_str())
            .collect::<Vec<_>>();
        println!("group {} -> {}", group.category.label(), ids.join(","));
    }
    let first = flatten_groups(&results).first().map(|entry| entry.id.clone());
    drop(results);

    if let Some(id) = first {
        mounted.select_command(&id);
        println!("selected {id} open_overlays={:?}", mounted.overlays().open_ids());
    }

    let draft = NoteDraft {
        title: "CLI smoke".to_string(),
        content: "Created by deskshell_cli".to_string(),
        ..NoteDraft::default()
    };
    if let SaveOutcome::Created(id) = mounted.save_note(draft) {
        println!("note created id={id}");
    }

    let prefs = mounted.preferences().get();
    println!("recent_searches={:?}", prefs.recent_searches);
    println!("command_history={:?}", prefs.command_palette_history);
    info!("event=cli_run module=cli status=ok");
    Ok(())
}
