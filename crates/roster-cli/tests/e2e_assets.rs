//! E2E CLI tests for the asset workflow:
//! - `roster init` idempotence
//! - `roster asset add` / `allocate` / `return`
//! - `roster list asset` filters and `roster show`
//! - error contract (`{"error": {...}}` with `E####` codes)
//!
//! Each test runs `roster` as a subprocess in an isolated temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the roster binary, rooted in `dir`.
fn roster(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("roster"));
    cmd.current_dir(dir);
    cmd.env("ROSTER_LOG", "error");
    cmd.env("XDG_CONFIG_HOME", dir.join(".user-config"));
    cmd.env_remove("FORMAT");
    cmd
}

fn init_console(dir: &Path) {
    roster(dir).arg("init").assert().success();
}

/// Run a command with `--json` and parse stdout.
fn json(dir: &Path, args: &[&str]) -> Value {
    let output = roster(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("command should not crash");
    assert!(
        output.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

/// Run a command expected to fail and parse the JSON error from stderr.
fn json_error(dir: &Path, args: &[&str]) -> Value {
    let output = roster(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("command should not crash");
    assert!(!output.status.success(), "{args:?} unexpectedly succeeded");
    let value: Value =
        serde_json::from_slice(&output.stderr).expect("stderr should be valid JSON");
    value["error"].clone()
}

fn add_asset(dir: &Path, id: &str, name: &str, serial: &str) {
    roster(dir)
        .args([
            "asset",
            "add",
            "--id",
            id,
            "--name",
            name,
            "--category",
            "Laptop",
            "--serial",
            serial,
            "--brand",
            "Acme",
            "--price",
            "2499",
            "--location",
            "HQ",
        ])
        .assert()
        .success();
}

fn seeded() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    init_console(dir.path());
    add_asset(dir.path(), "AST-LP-001", "MacBook Pro 16\"", "C02XK1Y2JG5H");
    add_asset(dir.path(), "AST-LP-002", "Dell XPS 15", "DXPS15-7788");
    dir
}

fn ids(listing: &Value) -> Vec<String> {
    listing
        .as_array()
        .expect("listing is an array")
        .iter()
        .map(|r| r["id"].as_str().expect("id").to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn init_creates_snapshot_and_config() {
    let dir = TempDir::new().expect("tempdir");
    let out = json(dir.path(), &["init"]);
    assert_eq!(out["initialized"], true);
    assert_eq!(out["config_written"], true);
    assert!(dir.path().join(".roster/console.json").exists());
    assert!(dir.path().join(".roster/config.toml").exists());

    let again = json(dir.path(), &["init"]);
    assert_eq!(again["initialized"], false);
    assert_eq!(again["config_written"], false);
}

#[test]
fn commands_before_init_report_not_initialized() {
    let dir = TempDir::new().expect("tempdir");
    let err = json_error(dir.path(), &["list", "asset"]);
    assert_eq!(err["error_code"], "E1001");

    roster(dir.path())
        .args(["stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1001]"));
}

#[test]
fn search_is_case_insensitive() {
    let dir = seeded();
    let hits = json(dir.path(), &["list", "asset", "--search", "MAC"]);
    assert_eq!(ids(&hits), ["AST-LP-001"]);

    let by_serial = json(dir.path(), &["list", "asset", "-s", "dxps15"]);
    assert_eq!(ids(&by_serial), ["AST-LP-002"]);

    let everything = json(dir.path(), &["list", "asset", "--status", "all"]);
    assert_eq!(ids(&everything), ["AST-LP-001", "AST-LP-002"]);
}

#[test]
fn allocate_then_return_round_trip() {
    let dir = seeded();
    let out = json(
        dir.path(),
        &[
            "asset",
            "allocate",
            "AST-LP-002",
            "--employee-name",
            "Priya Raman",
            "--employee-id",
            "EMP-099",
            "--job-id",
            "JOB-2024-0001",
        ],
    );
    assert_eq!(out["count"], 1);
    let allocation_id = out["allocations"][0].as_str().expect("allocation id").to_string();
    assert!(allocation_id.starts_with("ALLOC-"));
    assert!(allocation_id.ends_with("-AST-LP-002"));

    let asset = json(dir.path(), &["show", "asset", "AST-LP-002"]);
    assert_eq!(asset["status"], "Allocated");
    assert_eq!(asset["assigned_to"], "Priya Raman");
    assert_eq!(asset["job_id"], "JOB-2024-0001");

    let available = json(dir.path(), &["list", "asset", "--status", "available"]);
    assert_eq!(ids(&available), ["AST-LP-001"]);

    let returned = json(
        dir.path(),
        &["asset", "return", "--all-visible", "--search", "EMP-099", "--condition", "good"],
    );
    assert_eq!(returned["returned"], 1);
    assert_eq!(returned["condition"], "Good");

    let asset = json(dir.path(), &["show", "asset", "AST-LP-002"]);
    assert_eq!(asset["status"], "Returned");
    assert!(asset.get("assigned_to").is_none());
    assert!(asset.get("assigned_date").is_none());

    let allocation = json(dir.path(), &["show", "allocation", &allocation_id]);
    assert_eq!(allocation["status"], "Returned");
}

#[test]
fn allocation_needs_no_requisition_and_keeps_its_note() {
    let dir = seeded();
    let out = json(
        dir.path(),
        &[
            "asset",
            "allocate",
            "AST-LP-002",
            "--employee-name",
            "Priya Raman",
            "--employee-id",
            "EMP-099",
            "--notes",
            "charger included",
        ],
    );
    let allocation_id = out["allocations"][0].as_str().expect("allocation id").to_string();

    let asset = json(dir.path(), &["show", "asset", "AST-LP-002"]);
    assert_eq!(asset["status"], "Allocated");
    assert!(asset.get("job_id").is_none());

    json(dir.path(), &["asset", "return", &allocation_id]);

    let allocation = json(dir.path(), &["show", "allocation", &allocation_id]);
    assert_eq!(allocation["status"], "Returned");
    assert!(allocation.get("job_id").is_none());
    assert_eq!(allocation["notes"], "charger included");
    assert!(allocation.get("return_notes").is_none());
}

#[test]
fn explicit_ids_reject_filter_flags() {
    let dir = seeded();
    roster(dir.path())
        .args(["asset", "return", "ALLOC-1", "--status", "allocated"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn allocating_an_allocated_asset_writes_nothing() {
    let dir = seeded();
    let base = [
        "--employee-name",
        "Priya Raman",
        "--employee-id",
        "EMP-099",
        "--job-id",
        "JOB-2024-0001",
    ];
    let mut first = vec!["asset", "allocate", "AST-LP-002"];
    first.extend(base);
    json(dir.path(), &first);

    let mut batch = vec!["asset", "allocate", "AST-LP-001", "AST-LP-002"];
    batch.extend(base);
    let err = json_error(dir.path(), &batch);
    assert_eq!(err["error_code"], "E2002");

    let untouched = json(dir.path(), &["show", "asset", "AST-LP-001"]);
    assert_eq!(untouched["status"], "Available");
    let allocations = json(dir.path(), &["list", "allocation"]);
    assert_eq!(allocations.as_array().map(Vec::len), Some(1));
}

#[test]
fn empty_selection_is_rejected() {
    let dir = seeded();
    let err = json_error(
        dir.path(),
        &[
            "asset",
            "allocate",
            "--all-visible",
            "--search",
            "thinkpad",
            "--employee-name",
            "Priya Raman",
            "--employee-id",
            "EMP-099",
            "--job-id",
            "JOB-2024-0001",
        ],
    );
    assert_eq!(err["error_code"], "E2006");
    assert!(err["suggestion"].as_str().is_some());
}

#[test]
fn unknown_record_is_not_found() {
    let dir = seeded();
    let err = json_error(dir.path(), &["show", "asset", "AST-NOPE"]);
    assert_eq!(err["error_code"], "E2001");
    assert!(err["message"].as_str().expect("message").contains("AST-NOPE"));
}

#[test]
fn duplicate_asset_id_conflicts() {
    let dir = seeded();
    let err = json_error(
        dir.path(),
        &[
            "asset", "add", "--id", "AST-LP-001", "--name", "Spare", "--category", "Laptop",
            "--serial", "X",
        ],
    );
    assert_eq!(err["error_code"], "E2003");
}

#[test]
fn damaged_return_requires_notes() {
    let dir = seeded();
    json(
        dir.path(),
        &[
            "asset",
            "allocate",
            "AST-LP-001",
            "--employee-name",
            "Priya Raman",
            "--employee-id",
            "EMP-099",
            "--job-id",
            "JOB-2024-0001",
        ],
    );
    let err = json_error(
        dir.path(),
        &["asset", "return", "--all-visible", "--condition", "damaged"],
    );
    assert_eq!(err["error_code"], "E2005");

    let out = json(
        dir.path(),
        &[
            "asset",
            "return",
            "--all-visible",
            "--condition",
            "damaged",
            "--notes",
            "Cracked screen",
        ],
    );
    assert_eq!(out["returned"], 1);
    let asset = json(dir.path(), &["show", "asset", "AST-LP-001"]);
    assert_eq!(asset["status"], "Damaged");
}

#[test]
fn text_listing_has_header_and_rows() {
    let dir = seeded();
    roster(dir.path())
        .args(["list", "asset", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ID\tNAME\tTYPE"))
        .stdout(predicate::str::contains("AST-LP-002\tDell XPS 15\tHardware"));
}

#[test]
fn quiet_mutation_prints_nothing() {
    let dir = seeded();
    roster(dir.path())
        .args([
            "-q", "asset", "add", "--id", "AST-MN-001", "--name", "Dell U2720Q", "--category",
            "Monitor", "--serial", "MN-1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
