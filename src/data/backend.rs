//! Key-value backends that hold the serialized ledger

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::app_state::AppStateStore;
use super::database::{Database, DatabaseError};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Lock poisoned")]
    LockPoisoned,
}

/// Which backend stores the ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// `app_state` table in `kitty.db`
    #[default]
    Sqlite,
    /// One `<key>.json` file per key
    Json,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Sqlite => "sqlite",
            BackendKind::Json => "json",
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" | "db" => Ok(BackendKind::Sqlite),
            "json" | "file" => Ok(BackendKind::Json),
            other => Err(format!("unknown storage backend '{other}'")),
        }
    }
}

/// A store addressed by string keys holding string values.
///
/// `write` replaces the whole value; a reader never observes a partial write.
pub trait StateBackend {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Read the raw value for `key`, `None` when absent
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value for `key`
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Open the configured backend rooted at `data_dir`
pub fn open_backend(
    kind: BackendKind,
    data_dir: &Path,
) -> Result<Box<dyn StateBackend>, StorageError> {
    match kind {
        BackendKind::Sqlite => {
            let db = Database::open(data_dir.join(crate::util::DATABASE_FILE))?;
            Ok(Box::new(SqliteBackend::new(db)))
        }
        BackendKind::Json => Ok(Box::new(JsonFileBackend::new(data_dir.join("state")))),
    }
}

/// Backend over the SQLite `app_state` table
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    store: AppStateStore,
}

impl SqliteBackend {
    pub fn new(db: Database) -> Self {
        Self {
            store: AppStateStore::new(db),
        }
    }
}

impl StateBackend for SqliteBackend {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.store.get(key)?)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(self.store.set(key, value)?)
    }
}

/// Backend keeping each key in its own JSON file
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateBackend for JsonFileBackend {
    fn name(&self) -> &'static str {
        "json"
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        // Write beside the target, then rename over it
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-process backend. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with a single entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let backend = Self::new();
        if let Ok(mut entries) = backend.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        backend
    }
}

impl StateBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
