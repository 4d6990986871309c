//! Data persistence layer for Kitty
//!
//! The ledger is stored as one JSON document under a fixed key in a
//! key-value backend: the SQLite `app_state` table by default, or a
//! directory of JSON files.

mod app_state;
mod backend;
mod database;
mod migrations;

pub use app_state::AppStateStore;
pub use backend::{
    open_backend, BackendKind, JsonFileBackend, MemoryBackend, SqliteBackend, StateBackend,
    StorageError,
};
pub use database::{Database, DatabaseError};
