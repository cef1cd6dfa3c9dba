//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn leasedesk() -> Command {
    let mut cmd = Command::cargo_bin("leasedesk").unwrap();
    cmd.env_remove("DATABASE_URL")
        .env_remove("LEASEDESK_URL")
        .env("LEASEDESK_QUIET", "1");
    cmd
}

// === Help Tests ===

#[test]
fn test_top_level_help_lists_commands() {
    leasedesk()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("console"))
        .stdout(predicate::str::contains("admin"));
}

#[test]
fn test_list_help() {
    leasedesk()
        .args(["list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status filter"));
}

#[test]
fn test_memo_help() {
    leasedesk()
        .args(["memo", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remove the memo"));
}

#[test]
fn test_serve_help_mentions_offset() {
    leasedesk()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("utc-offset-hours"));
}

// === Argument Validation ===

#[test]
fn test_status_rejects_unknown_value() {
    leasedesk()
        .args(["status", "3", "archived"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid status value"));
}

#[test]
fn test_memo_requires_text_or_clear() {
    leasedesk().args(["memo", "3"]).assert().failure();
    leasedesk()
        .args(["memo", "3", "note", "--clear"])
        .assert()
        .failure();
}

#[test]
fn test_submit_rejects_malformed_phone() {
    leasedesk()
        .args([
            "submit",
            "--name",
            "Kim",
            "--phone",
            "0101234",
            "--rent-type",
            "lease",
            "--months",
            "36",
            "--business-type",
            "individual",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("three dash-separated parts"));
}

#[test]
fn test_serve_requires_database_url() {
    leasedesk()
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

// === Offline Behavior ===

#[test]
fn test_list_reports_unreachable_server() {
    leasedesk()
        .args(["--server", "http://127.0.0.1:9", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load inquiries"));
}

#[test]
fn test_admin_init_seeds_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("leasedesk.db");
    let url = format!("sqlite://{}", db.display());

    leasedesk()
        .args(["admin", "init", "--database-url", &url, "--password", "s3cret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Admin account initialized"));
    assert!(db.exists());

    // Re-running resets the password in place
    leasedesk()
        .args(["admin", "init", "--database-url", &url, "--password", "other"])
        .assert()
        .success();
}
