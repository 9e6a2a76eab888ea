//! End-to-end CLI tests
//!
//! Each test runs the `expman` binary against its own data directory,
//! selected through the `EXPENSE_MANAGER_DATA_DIR` override.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn expman(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("expman").unwrap();
    cmd.env("EXPENSE_MANAGER_DATA_DIR", data_dir);
    cmd
}

#[test]
fn no_arguments_prints_usage_hint() {
    let dir = TempDir::new().unwrap();

    expman(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("expman --help"));
}

#[test]
fn account_create_and_list() {
    let dir = TempDir::new().unwrap();

    expman(dir.path())
        .args(["account", "create", "Checking", "--balance", "1000.00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created account: Checking"))
        .stdout(predicate::str::contains("$1000.00"));

    expman(dir.path())
        .args(["account", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking"));
}

#[test]
fn first_account_is_selected_and_select_switches() {
    let dir = TempDir::new().unwrap();

    expman(dir.path())
        .args(["account", "create", "Checking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected: Yes"));

    expman(dir.path())
        .args(["account", "create", "Savings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected: No"));

    expman(dir.path())
        .args(["account", "select", "Savings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected account: Savings"));
}

#[test]
fn account_create_rejects_bad_balance() {
    let dir = TempDir::new().unwrap();

    expman(dir.path())
        .args(["account", "create", "Checking", "--balance", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid balance format"));
}

#[test]
fn missing_account_is_reported() {
    let dir = TempDir::new().unwrap();

    expman(dir.path())
        .args(["account", "show", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Account not found: Nope"));
}

#[test]
fn category_list_includes_default() {
    let dir = TempDir::new().unwrap();

    expman(dir.path())
        .args(["category", "create", "Groceries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created category: Groceries"));

    expman(dir.path())
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Uncategorized"))
        .stdout(predicate::str::contains("(default)"))
        .stdout(predicate::str::contains("Groceries"));
}

#[test]
fn transaction_add_uses_selected_account() {
    let dir = TempDir::new().unwrap();

    expman(dir.path())
        .args(["account", "create", "Checking"])
        .assert()
        .success();

    expman(dir.path())
        .args(["txn", "add", "expense", "12.50", "--description", "Lunch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded Expense of $12.50 on Checking"));

    expman(dir.path())
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch"))
        .stdout(predicate::str::contains("$12.50"));
}

#[test]
fn transaction_add_without_account_fails() {
    let dir = TempDir::new().unwrap();

    expman(dir.path())
        .args(["txn", "add", "expense", "12.50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No account selected"));
}

#[test]
fn transaction_add_rejects_negative_amount() {
    let dir = TempDir::new().unwrap();

    expman(dir.path())
        .args(["account", "create", "Checking"])
        .assert()
        .success();

    expman(dir.path())
        .args(["txn", "add", "expense", "--", "-5.00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount cannot be negative"));
}

#[test]
fn transaction_filters_by_kind() {
    let dir = TempDir::new().unwrap();

    expman(dir.path())
        .args(["account", "create", "Checking"])
        .assert()
        .success();
    expman(dir.path())
        .args(["txn", "add", "income", "2000.00", "--description", "Paycheck"])
        .assert()
        .success();
    expman(dir.path())
        .args(["txn", "add", "expense", "45.00", "--description", "Dinner"])
        .assert()
        .success();

    expman(dir.path())
        .args(["txn", "list", "--kind", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paycheck"))
        .stdout(predicate::str::contains("Dinner").not());
}

#[test]
fn transaction_totals_reports_net() {
    let dir = TempDir::new().unwrap();

    expman(dir.path())
        .args(["account", "create", "Checking"])
        .assert()
        .success();
    expman(dir.path())
        .args(["txn", "add", "income", "100.00"])
        .assert()
        .success();
    expman(dir.path())
        .args(["txn", "add", "expense", "40.00"])
        .assert()
        .success();

    expman(dir.path())
        .args(["txn", "totals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Income:"))
        .stdout(predicate::str::contains("$100.00"))
        .stdout(predicate::str::contains("$40.00"))
        .stdout(predicate::str::contains("$60.00"));
}

#[test]
fn date_range_flags_must_be_paired() {
    let dir = TempDir::new().unwrap();

    expman(dir.path())
        .args(["account", "create", "Checking"])
        .assert()
        .success();

    expman(dir.path())
        .args(["txn", "list", "--from", "2025-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--from and --to must be given together"));
}

#[test]
fn backup_export_and_preview() {
    let dir = TempDir::new().unwrap();
    let backup_dir = TempDir::new().unwrap();

    expman(dir.path())
        .args(["account", "create", "Checking", "--balance", "500.00"])
        .assert()
        .success();
    expman(dir.path())
        .args(["txn", "add", "expense", "25.00", "--description", "Groceries"])
        .assert()
        .success();

    expman(dir.path())
        .args(["backup", "export", "--dir"])
        .arg(backup_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup written to"));

    let backup_file = std::fs::read_dir(backup_dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .find(|e| e.path().extension().map_or(false, |ext| ext == "json"))
        .expect("export should produce a json file")
        .path();

    expman(dir.path())
        .args(["backup", "import"])
        .arg(&backup_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup file is valid"))
        .stdout(predicate::str::contains("no data was changed"));
}

#[test]
fn backup_import_confirm_restores_data() {
    let dir = TempDir::new().unwrap();
    let backup_dir = TempDir::new().unwrap();

    expman(dir.path())
        .args(["account", "create", "Checking"])
        .assert()
        .success();
    expman(dir.path())
        .args(["txn", "add", "expense", "25.00", "--description", "Groceries"])
        .assert()
        .success();

    expman(dir.path())
        .args(["backup", "export", "--dir"])
        .arg(backup_dir.path())
        .assert()
        .success();

    let backup_file = std::fs::read_dir(backup_dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .find(|e| e.path().extension().map_or(false, |ext| ext == "json"))
        .unwrap()
        .path();

    // Change the data after the export was taken
    expman(dir.path())
        .args(["account", "create", "Stray"])
        .assert()
        .success();

    expman(dir.path())
        .args(["backup", "import"])
        .arg(&backup_file)
        .arg("--confirm")
        .assert()
        .success()
        .stdout(predicate::str::contains("Import complete"));

    expman(dir.path())
        .args(["account", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking"))
        .stdout(predicate::str::contains("Stray").not());
}

#[test]
fn tampered_backup_is_rejected() {
    let dir = TempDir::new().unwrap();
    let backup_dir = TempDir::new().unwrap();

    expman(dir.path())
        .args(["account", "create", "Checking"])
        .assert()
        .success();

    expman(dir.path())
        .args(["backup", "export", "--dir"])
        .arg(backup_dir.path())
        .assert()
        .success();

    let backup_file = std::fs::read_dir(backup_dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .find(|e| e.path().extension().map_or(false, |ext| ext == "json"))
        .unwrap()
        .path();

    let contents = std::fs::read_to_string(&backup_file).unwrap();
    let tampered = contents.replace("Checking", "Tampered");
    std::fs::write(&backup_file, tampered).unwrap();

    expman(dir.path())
        .args(["backup", "import"])
        .arg(&backup_file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupted or has been tampered with"));
}

#[test]
fn config_shows_paths_and_settings() {
    let dir = TempDir::new().unwrap();

    expman(dir.path())
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Data directory:"))
        .stdout(predicate::str::contains("Backup directory:"))
        .stdout(predicate::str::contains("Currency symbol: $"));
}

#[test]
fn config_set_and_clear_backup_dir() {
    let dir = TempDir::new().unwrap();
    let backup_dir = TempDir::new().unwrap();

    expman(dir.path())
        .args(["config", "--set-backup-dir"])
        .arg(backup_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup directory set to"));

    expman(dir.path())
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            backup_dir.path().to_string_lossy().as_ref(),
        ));

    expman(dir.path())
        .args(["config", "--clear-backup-dir"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reset to the default location"));
}
