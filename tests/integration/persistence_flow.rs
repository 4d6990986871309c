//! Ledger persistence across reloads for every backend

use std::fs;

use kitty::data::{JsonFileBackend, MemoryBackend, SqliteBackend};
use kitty::{open_backend, BackendKind, Database, Member, StateBackend, Transaction};
use tempfile::tempdir;

use super::common::fixtures::{ledger_on, FIXED_TIMESTAMP};

fn run_scenario(backend: Box<dyn StateBackend>) -> Vec<Member> {
    let mut ledger = ledger_on(backend);
    ledger.deposit("Ali", "500").unwrap();
    ledger.deposit("Citra", "0.1").unwrap();
    ledger.deposit("Citra", "0.2").unwrap();
    ledger.add_member("Dedi").unwrap();
    ledger.remove_member("Budi").unwrap();
    ledger.members().to_vec()
}

#[test]
fn test_sqlite_ledger_survives_reopen() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("kitty.db");

    let expected = run_scenario(Box::new(SqliteBackend::new(
        Database::open(db_path.clone()).unwrap(),
    )));

    let reloaded = ledger_on(Box::new(SqliteBackend::new(
        Database::open(db_path.clone()).unwrap(),
    )));
    assert_eq!(reloaded.members(), expected.as_slice());
    assert_eq!(
        reloaded.total_savings(),
        expected.iter().map(|m| m.savings).sum::<f64>()
    );
}

#[test]
fn test_json_ledger_survives_reopen() {
    let dir = tempdir().unwrap();
    let state_dir = dir.path().join("state");

    let expected = run_scenario(Box::new(JsonFileBackend::new(state_dir.clone())));
    let reloaded = ledger_on(Box::new(JsonFileBackend::new(state_dir)));

    assert_eq!(reloaded.members(), expected.as_slice());
    let citra = reloaded.member("Citra").unwrap();
    assert_eq!(citra.transactions.len(), 2);
    assert_eq!(citra.transactions[0].timestamp(), FIXED_TIMESTAMP);
}

#[test]
fn test_open_backend_selects_storage() {
    let dir = tempdir().unwrap();

    let sqlite = open_backend(BackendKind::Sqlite, dir.path()).unwrap();
    assert_eq!(sqlite.name(), "sqlite");
    assert!(dir.path().join("kitty.db").exists());

    let json = open_backend(BackendKind::Json, dir.path()).unwrap();
    assert_eq!(json.name(), "json");

    let mut ledger = ledger_on(json);
    ledger.reset_all().unwrap();
    assert!(dir.path().join("state").join("users.json").exists());
}

#[test]
fn test_corrupt_file_falls_back_to_seed_without_overwriting() {
    let dir = tempdir().unwrap();
    let state_dir = dir.path().join("state");
    fs::create_dir_all(&state_dir).unwrap();
    let file = state_dir.join("users.json");
    fs::write(&file, "{ not json").unwrap();

    let ledger = ledger_on(Box::new(JsonFileBackend::new(state_dir)));
    let names: Vec<_> = ledger.members().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Ali", "Budi", "Citra"]);
    assert_eq!(ledger.total_savings(), 0.0);

    assert_eq!(fs::read_to_string(&file).unwrap(), "{ not json");
}

#[test]
fn test_invalid_records_fall_back_to_seed() {
    let duplicate_names = r#"[
        {"name":"Ali","savings":0,"transactions":[]},
        {"name":"Ali","savings":5,"transactions":[]}
    ]"#;
    let ledger = ledger_on(Box::new(MemoryBackend::with_entry("users", duplicate_names)));
    assert_eq!(ledger.members().len(), 3);
    assert_eq!(ledger.total_savings(), 0.0);
}

#[test]
fn test_reads_existing_snapshot_format() {
    let snapshot = r#"[
        {"name":"Ali","savings":1500,"transactions":[
            {"type":"deposit","amount":1000,"date":"2023-12-30 10:00:00"},
            {"type":"reset","date":"2023-12-31 10:00:00"},
            {"type":"deposit","amount":1500,"date":"2024-01-01 08:00:00"}
        ]},
        {"name":"Rina","savings":0}
    ]"#;
    let backend = MemoryBackend::with_entry("users", snapshot);
    let mut ledger = ledger_on(Box::new(backend.clone()));

    let ali = ledger.member("Ali").unwrap();
    assert_eq!(ali.savings, 1500.0);
    assert!(ali.transactions[1].is_reset());
    assert_eq!(ledger.member("Rina").unwrap().transactions, Vec::<Transaction>::new());
    assert_eq!(ledger.selected(), Some("Ali"));

    ledger.deposit("Rina", "250").unwrap();
    let reloaded = ledger_on(Box::new(backend));
    assert_eq!(reloaded.member("Rina").unwrap().savings, 250.0);
    assert_eq!(reloaded.member("Ali").unwrap().transactions.len(), 3);
}

#[test]
fn test_empty_collection_is_kept_on_reload() {
    let backend = MemoryBackend::new();
    let mut ledger = ledger_on(Box::new(backend.clone()));
    for name in ["Ali", "Budi", "Citra"] {
        ledger.remove_member(name).unwrap();
    }

    let reloaded = ledger_on(Box::new(backend));
    assert!(reloaded.is_empty());
    assert_eq!(reloaded.selected(), None);
}
