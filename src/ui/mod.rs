//! Interactive terminal interface over the ledger

pub mod app;
pub mod components;
pub mod events;
mod terminal_guard;

pub use app::App;
pub use events::{InputMode, StatusKind, StatusMessage};
