//! Group savings ledger
//!
//! - `models`: member records and transaction history
//! - `store`: the `Ledger` owning the members, its mutation rules and persistence
//! - `format`: the shared timestamp, amount and history formatting
//! - `clock`: injectable time source for timestamps

mod clock;
mod error;
pub mod format;
mod models;
mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::LedgerError;
pub use format::{describe_transaction, format_amount, format_money, format_timestamp};
pub use models::{seed_members, validate_members, Member, Transaction, DEFAULT_SEED};
pub use store::{parse_amount, Ledger, LedgerSettings, DEFAULT_STORAGE_KEY};
