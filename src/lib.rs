pub mod cli;
pub mod config;
pub mod data;
pub mod ledger;
pub mod ui;
pub mod util;

pub use config::Config;
pub use data::{open_backend, BackendKind, Database, StateBackend, StorageError};
pub use ledger::{Ledger, LedgerError, LedgerSettings, Member, Transaction};
pub use ui::App;
