//! Ledger and binary fixtures

use std::path::Path;

use assert_cmd::Command;
use chrono::{Local, TimeZone};
use kitty::data::MemoryBackend;
use kitty::ledger::FixedClock;
use kitty::{Ledger, LedgerSettings, StateBackend};

/// Timestamp every fixture transaction is recorded at
pub const FIXED_TIMESTAMP: &str = "2024-01-01 09:30:00";

pub fn fixed_clock() -> FixedClock {
    FixedClock::new(Local.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap())
}

/// Ledger over `backend` with default settings and the fixed clock
pub fn ledger_on(backend: Box<dyn StateBackend>) -> Ledger {
    Ledger::load_with_clock(backend, LedgerSettings::default(), Box::new(fixed_clock()))
}

/// Seeded ledger held in memory
pub fn memory_ledger() -> Ledger {
    ledger_on(Box::new(MemoryBackend::new()))
}

/// The `kitty` binary pointed at `data_dir`
pub fn kitty(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kitty").expect("kitty binary should be built");
    cmd.arg("--data-dir").arg(data_dir).env_remove("RUST_LOG");
    cmd
}
