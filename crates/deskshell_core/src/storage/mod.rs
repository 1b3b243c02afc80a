//! Local key-value persistence.
//!
//! # Responsibility
//! - Define the browser-style "local storage" contract used by every
//!   persisted surface (preferences, side panel flag, notes).
//! - Provide JSON load/save helpers that never surface failures to callers.
//!
//! # Invariants
//! - Values are whole JSON documents; a write always replaces the full value.
//! - Absent or malformed values load as `None`; callers fall back to defaults.

use crate::db::DbError;
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer error for key-value reads and writes.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Backend refused the write (quota, read-only, injected failure).
    WriteRejected(String),
    Serialize(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::WriteRejected(key) => write!(f, "storage write rejected for key `{key}`"),
            Self::Serialize(err) => write!(f, "failed to serialize value: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::WriteRejected(_) => None,
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Synchronous string key-value storage.
///
/// Methods take `&self` so one backend can be shared by several stores on the
/// single UI thread.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// Loads and decodes one JSON value.
///
/// Returns `None` when the key is absent, the backend read fails, or the
/// stored text does not decode as `T`. Failures are logged, never returned.
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("event=storage_read module=storage status=missing key={key}");
            return None;
        }
        Err(err) => {
            error!("event=storage_read module=storage status=error key={key} error={err}");
            return None;
        }
    };

    match serde_json::from_str::<T>(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                "event=storage_parse module=storage status=fallback key={key} bytes={} error={err}",
                raw.len()
            );
            None
        }
    }
}

/// Encodes and writes one JSON value, replacing any previous value.
///
/// Returns whether the write reached the backend. Failures are logged.
pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let result = serde_json::to_string(value)
        .map_err(StorageError::from)
        .and_then(|encoded| store.set(key, &encoded));

    match result {
        Ok(()) => {
            debug!("event=storage_write module=storage status=ok key={key}");
            true
        }
        Err(err) => {
            error!("event=storage_write module=storage status=error key={key} error={err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{load_json, save_json, KeyValueStore, MemoryKeyValueStore};
    use std::rc::Rc;

    #[test]
    fn load_json_returns_none_for_missing_and_malformed_values() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(load_json::<bool, _>(&store, "flag"), None);

        store.set("flag", "{not json").expect("memory write");
        assert_eq!(load_json::<bool, _>(&store, "flag"), None);
    }

    #[test]
    fn save_json_reports_rejected_writes() {
        let store = MemoryKeyValueStore::new();
        store.fail_writes(true);
        assert!(!save_json(&store, "flag", &true));
        assert_eq!(store.get("flag").expect("memory read"), None);
    }

    #[test]
    fn shared_handle_sees_writes_from_other_handles() {
        let store = Rc::new(MemoryKeyValueStore::new());
        let writer = Rc::clone(&store);
        assert!(save_json(&writer, "list", &vec![1, 2, 3]));
        assert_eq!(load_json::<Vec<i32>, _>(&store, "list"), Some(vec![1, 2, 3]));
    }
}
