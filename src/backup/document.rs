//! Backup document format
//!
//! A backup is a UTF-8 JSON document with two top-level keys: `meta`
//! (application identity, format version, creation time and checksum)
//! and `data` (the full account, category and transaction collections).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Account, Category, Transaction};

/// Application identifier stamped into every backup
pub const BACKUP_APP_ID: &str = "expense-manager";

/// Backup format version; import requires an exact match
pub const BACKUP_VERSION: &str = "1.0";

/// Metadata header of a backup document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupMeta {
    /// Application identifier, must equal [`BACKUP_APP_ID`]
    pub app: String,

    /// Format version, must equal [`BACKUP_VERSION`]
    pub backup_version: String,

    /// When the backup was created
    pub created_at: DateTime<Utc>,

    /// `"sha256:" + hex` digest over the canonical form of `data`
    pub checksum: String,
}

/// The exported collections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupData {
    pub accounts: Vec<Account>,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
}

impl BackupData {
    /// Check whether every collection is empty
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.categories.is_empty() && self.transactions.is_empty()
    }
}

/// A complete backup document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupDocument {
    pub meta: BackupMeta,
    pub data: BackupData,
}

/// Build the conventional backup filename for a timestamp
///
/// Format: `ExpenseManager-backup-<dd-MM-yyyy_HH-mm-ss>.json`
pub fn backup_filename(timestamp: DateTime<Utc>) -> String {
    format!(
        "ExpenseManager-backup-{}.json",
        timestamp.format("%d-%m-%Y_%H-%M-%S")
    )
}
