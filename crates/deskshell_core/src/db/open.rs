//! Connection bootstrap.
//!
//! # Invariants
//! - Every returned connection has a busy timeout and a current schema.
//! - File databases run in WAL journal mode.

use super::migrations::{apply_migrations, MigrationReport};
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where a connection points.
#[derive(Debug, Clone, Copy)]
pub enum OpenTarget<'a> {
    File(&'a Path),
    Memory,
}

impl OpenTarget<'_> {
    fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }

    fn connect(&self) -> DbResult<Connection> {
        let opened = match self {
            Self::File(path) => Connection::open(path),
            Self::Memory => Connection::open_in_memory(),
        };
        opened.map_err(|source| DbError::Open {
            target: match self {
                Self::File(path) => path.display().to_string(),
                Self::Memory => ":memory:".to_string(),
            },
            source,
        })
    }
}

/// Opens a database file, creating it if needed.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_target(OpenTarget::File(path.as_ref()))
}

/// Opens a private in-memory database.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_target(OpenTarget::Memory)
}

/// Opens `target`, configures the connection and brings its schema up to date.
///
/// # Side effects
/// - Emits one `db_open` event with the outcome and duration.
pub fn open_target(target: OpenTarget<'_>) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = target.mode();

    let opened = target.connect().and_then(|mut conn| {
        let report = configure(&mut conn, target)?;
        Ok((conn, report))
    });

    match opened {
        Ok((conn, report)) => {
            info!(
                "event=db_open module=db status=ok mode={mode} schema_from={} schema_to={} duration_ms={}",
                report.from,
                report.to,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn configure(conn: &mut Connection, target: OpenTarget<'_>) -> DbResult<MigrationReport> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    if let OpenTarget::File(_) = target {
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
    }
    apply_migrations(conn)
}
