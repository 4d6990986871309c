//! End-to-end runs of the `kitty` binary against a temporary data directory

use std::fs;

use predicates::prelude::*;
use tempfile::tempdir;

use super::common::fixtures::kitty;

#[test]
fn test_group_scenario_through_cli() {
    let dir = tempdir().unwrap();

    kitty(dir.path())
        .args(["deposit", "Ali", "500"])
        .assert()
        .success()
        .stdout("Ali now has Rp500\n");

    kitty(dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ali: Rp500"))
        .stdout(predicate::str::contains("  + Deposit: Rp500 ("))
        .stdout(predicate::str::contains("Group total: Rp500"));

    kitty(dir.path()).arg("reset").assert().success();
    kitty(dir.path())
        .arg("total")
        .assert()
        .success()
        .stdout("Group total: Rp0\n");

    kitty(dir.path())
        .args(["add", "Dedi"])
        .assert()
        .success()
        .stdout("Added Dedi\n");

    kitty(dir.path())
        .args(["add", "Ali"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already used or invalid"));

    kitty(dir.path())
        .args(["remove", "Budi"])
        .assert()
        .success()
        .stdout("Removed Budi\n");

    kitty(dir.path())
        .arg("members")
        .assert()
        .success()
        .stdout("Ali: Rp0\nCitra: Rp0\nDedi: Rp0\n");
}

#[test]
fn test_show_is_the_default_command() {
    let dir = tempdir().unwrap();

    kitty(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Ali: Rp0\n  No transactions\n"))
        .stdout(predicate::str::ends_with("Group total: Rp0\n"));
}

#[test]
fn test_first_run_creates_config_and_database() {
    let dir = tempdir().unwrap();

    kitty(dir.path()).arg("total").assert().success();
    assert!(dir.path().join("config.toml").exists());
    assert!(dir.path().join("logs").join("kitty.log").exists());

    kitty(dir.path()).args(["deposit", "Citra", "10"]).assert().success();
    assert!(dir.path().join("kitty.db").exists());
}

#[test]
fn test_json_backend_stores_compatible_records() {
    let dir = tempdir().unwrap();

    kitty(dir.path())
        .args(["--backend", "json", "deposit", "Budi", "1234.5"])
        .assert()
        .success()
        .stdout("Budi now has Rp1.234,5\n");

    let raw = fs::read_to_string(dir.path().join("state").join("users.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored[1]["name"], "Budi");
    assert_eq!(stored[1]["savings"], 1234.5);
    assert_eq!(stored[1]["transactions"][0]["type"], "deposit");
    assert_eq!(stored[1]["transactions"][0]["amount"], 1234.5);
    assert!(stored[1]["transactions"][0]["date"].is_string());

    // The sqlite backend has its own copy and never saw the deposit
    kitty(dir.path())
        .arg("total")
        .assert()
        .success()
        .stdout("Group total: Rp0\n");
}

#[test]
fn test_rejected_input_changes_nothing() {
    let dir = tempdir().unwrap();

    for amount in ["abc", "0", "-5", ""] {
        kitty(dir.path())
            .args(["--backend", "json", "deposit", "Ali", amount])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("valid amount"));
    }

    kitty(dir.path())
        .args(["--backend", "json", "deposit", "Zed", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No member named 'Zed'"));

    kitty(dir.path())
        .args(["--backend", "json", "remove", "Zed"])
        .assert()
        .failure()
        .code(1);

    assert!(!dir.path().join("state").join("users.json").exists());
}

#[test]
fn test_config_file_sets_currency_and_seed() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[seed]\nmembers = [\"Eka\", \"Fajar\"]\n\n[display]\ncurrency = \"IDR \"\n",
    )
    .unwrap();

    kitty(dir.path())
        .arg("members")
        .assert()
        .success()
        .stdout("Eka: IDR 0\nFajar: IDR 0\n");
}

#[test]
fn test_unknown_backend_is_a_usage_error() {
    let dir = tempdir().unwrap();

    kitty(dir.path())
        .args(["--backend", "redis", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("redis"));
}
