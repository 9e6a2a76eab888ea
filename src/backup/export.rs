//! Backup serializer
//!
//! Builds a checksummed backup document from the current collections.
//! The checksum covers the canonical form of `data` only, so the importer
//! can verify it without knowing when the document was created.

use chrono::{DateTime, Utc};

use crate::error::ExpenseResult;
use crate::models::{Account, Category, Transaction};

use super::canonical::{canonicalize, checksum_payload};
use super::document::{BackupData, BackupDocument, BackupMeta, BACKUP_APP_ID, BACKUP_VERSION};

/// Serialize the collections into a signed backup document
pub fn serialize(
    accounts: Vec<Account>,
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
) -> ExpenseResult<BackupDocument> {
    serialize_at(accounts, categories, transactions, Utc::now())
}

/// Serialize with an explicit creation timestamp
pub fn serialize_at(
    accounts: Vec<Account>,
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
    created_at: DateTime<Utc>,
) -> ExpenseResult<BackupDocument> {
    let data = BackupData {
        accounts,
        categories,
        transactions,
    };

    let checksum = checksum_payload(&canonicalize(&data)?);

    Ok(BackupDocument {
        meta: BackupMeta {
            app: BACKUP_APP_ID.to_string(),
            backup_version: BACKUP_VERSION.to_string(),
            created_at,
            checksum,
        },
        data,
    })
}

/// Render a backup document as canonical UTF-8 JSON
pub fn to_json(document: &BackupDocument) -> ExpenseResult<String> {
    canonicalize(document)
}
