//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::{AccountId, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with indexing
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: account_id -> transaction_ids
    by_account: RwLock<HashMap<AccountId, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_account: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build the account index
    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_account = self
            .by_account
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_account.clear();

        for txn in file_data.transactions {
            by_account.entry(txn.account_id).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| {
            b.transaction_date
                .cmp(&a.transaction_date)
                .then(b.created_at.cmp(&a.created_at))
        });

        let file_data = TransactionData { transactions };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all transactions
    pub fn get_all(&self) -> Result<Vec<Transaction>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
        Ok(transactions)
    }

    /// Get transactions for an account
    pub fn get_by_account(&self, account_id: AccountId) -> Result<Vec<Transaction>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_account = self
            .by_account
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_account
            .get(&account_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        transactions.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
        Ok(transactions)
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_account = self
            .by_account
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        // Remove from old index if updating
        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_account.get_mut(&old.account_id) {
                ids.retain(|&id| id != txn.id);
            }
        }

        by_account.entry(txn.account_id).or_default().push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> Result<bool, ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_account = self
            .by_account
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(txn) = data.remove(&id) {
            if let Some(ids) = by_account.get_mut(&txn.account_id) {
                ids.retain(|&tid| tid != id);
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Delete every transaction belonging to an account
    ///
    /// Used when an account is deleted. Returns the number of removed
    /// transactions.
    pub fn delete_by_account(&self, account_id: AccountId) -> Result<usize, ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_account = self
            .by_account
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let ids = by_account.remove(&account_id).unwrap_or_default();
        let mut removed = 0;
        for id in ids {
            if data.remove(&id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Replace the entire collection (used by backup restore)
    pub fn replace_all(&self, transactions: Vec<Transaction>) -> Result<(), ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_account = self
            .by_account
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_account.clear();

        for txn in transactions {
            by_account.entry(txn.account_id).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
