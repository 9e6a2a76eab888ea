//! Backup validator and importer
//!
//! Validation is a strict multi-stage gate. The structural, identity,
//! version and checksum stages are fatal: any failure aborts the import
//! with a specific error. Per-record problems are not fatal: invalid
//! records are skipped and counted so a partially damaged backup can
//! still import its valid subset.
//!
//! ## Stages
//!
//! 1. Structural parse (`BrokenData`)
//! 2. Application identity (`WrongApp`)
//! 3. Format version equality (`UnsupportedVersion`)
//! 4. Checksum presence (`MissingSignature`)
//! 5. Checksum verification over canonical data (`CorruptedOrTampered`)
//! 6. `EmptyBackup` when every collection is empty
//! 7. Per-record field validation, counted per entity type
//! 8. Deduplication by id, first occurrence wins (not counted)
//! 9. Referential repair: transactions without a surviving account are
//!    dropped and counted as transaction skips

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Account, Category, Transaction};

use super::canonical::{canonicalize, verify_checksum};
use super::document::{BACKUP_APP_ID, BACKUP_VERSION};

/// Records dropped during validation, per entity type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkippedCounts {
    pub accounts: usize,
    pub categories: usize,
    pub transactions: usize,
}

impl SkippedCounts {
    /// Total records dropped across all entity types
    pub fn total(&self) -> usize {
        self.accounts + self.categories + self.transactions
    }
}

/// The cleaned contents of a validated backup
///
/// Ready to be committed to the store; commit is a separate, explicit
/// step so the caller can show the skip summary first.
#[derive(Debug, Clone)]
pub struct ValidatedBackup {
    pub accounts: Vec<Account>,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    pub skipped: SkippedCounts,
}

/// Validate a raw backup document
pub fn validate(raw: &str) -> ExpenseResult<ValidatedBackup> {
    let document: Value = serde_json::from_str(raw)
        .map_err(|e| ExpenseError::BrokenData(format!("Backup is not valid JSON: {}", e)))?;

    let meta = document.get("meta").ok_or_else(|| {
        ExpenseError::BrokenData("Backup document has no meta section".to_string())
    })?;
    let data = document.get("data").ok_or_else(|| {
        ExpenseError::BrokenData("Backup document has no data section".to_string())
    })?;

    let app = meta.get("app").and_then(Value::as_str).unwrap_or_default();
    if app != BACKUP_APP_ID {
        return Err(ExpenseError::WrongApp {
            found: app.to_string(),
        });
    }

    let version = meta
        .get("backupVersion")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if version != BACKUP_VERSION {
        return Err(ExpenseError::UnsupportedVersion {
            found: version.to_string(),
        });
    }

    let checksum = meta
        .get("checksum")
        .and_then(Value::as_str)
        .ok_or(ExpenseError::MissingSignature)?;

    let canonical_data = canonicalize(data)?;
    if !verify_checksum(&canonical_data, checksum) {
        return Err(ExpenseError::CorruptedOrTampered);
    }

    let raw_accounts = collection(data, "accounts");
    let raw_categories = collection(data, "categories");
    let raw_transactions = collection(data, "transactions");

    if raw_accounts.is_empty() && raw_categories.is_empty() && raw_transactions.is_empty() {
        return Err(ExpenseError::EmptyBackup);
    }

    let mut skipped = SkippedCounts::default();
    let accounts: Vec<Account> = valid_records(raw_accounts, &mut skipped.accounts);
    let categories: Vec<Category> = valid_records(raw_categories, &mut skipped.categories);
    let mut transactions: Vec<Transaction> =
        valid_records(raw_transactions, &mut skipped.transactions);

    // First occurrence wins; duplicates are dropped silently
    let accounts = dedup_by_id(accounts, |a: &Account| a.id.to_string());
    let categories = dedup_by_id(categories, |c: &Category| c.id.to_string());
    transactions = dedup_by_id(transactions, |t: &Transaction| t.id.to_string());

    let account_ids: HashSet<_> = accounts.iter().map(|a| a.id).collect();
    transactions.retain(|txn| {
        let kept = account_ids.contains(&txn.account_id);
        if !kept {
            skipped.transactions += 1;
        }
        kept
    });

    Ok(ValidatedBackup {
        accounts,
        categories,
        transactions,
        skipped,
    })
}

fn collection(data: &Value, key: &str) -> Vec<Value> {
    data.get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

fn valid_records<T: DeserializeOwned>(raw: Vec<Value>, skip_counter: &mut usize) -> Vec<T> {
    let mut records = Vec::with_capacity(raw.len());
    for value in raw {
        match serde_json::from_value(value) {
            Ok(record) => records.push(record),
            Err(_) => *skip_counter += 1,
        }
    }
    records
}

fn dedup_by_id<T>(records: Vec<T>, id_of: impl Fn(&T) -> String) -> Vec<T> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(id_of(record)))
        .collect()
}
