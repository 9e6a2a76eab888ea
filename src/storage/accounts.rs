//! Account repository for JSON storage
//!
//! Manages loading and saving accounts to accounts.json. The repository
//! owns the exactly-one-selected invariant: `select` deselects every other
//! account in the same write.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::{Account, AccountId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable account data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AccountData {
    accounts: Vec<Account>,
}

/// Repository for account persistence
pub struct AccountRepository {
    path: PathBuf,
    data: RwLock<HashMap<AccountId, Account>>,
}

impl AccountRepository {
    /// Create a new account repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load accounts from disk
    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: AccountData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for account in file_data.accounts {
            data.insert(account.id, account);
        }

        Ok(())
    }

    /// Save accounts to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut accounts: Vec<_> = data.values().cloned().collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name));

        let file_data = AccountData { accounts };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get an account by ID
    pub fn get(&self, id: AccountId) -> Result<Option<Account>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all accounts
    pub fn get_all(&self) -> Result<Vec<Account>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut accounts: Vec<_> = data.values().cloned().collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(accounts)
    }

    /// Get an account by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Account>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .find(|a| a.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Get the currently selected account
    pub fn selected(&self) -> Result<Option<Account>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.values().find(|a| a.is_selected).cloned())
    }

    /// Mark an account as selected, deselecting all others
    pub fn select(&self, id: AccountId) -> Result<(), ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if !data.contains_key(&id) {
            return Err(ExpenseError::account_not_found(id.to_string()));
        }

        for account in data.values_mut() {
            account.is_selected = account.id == id;
        }

        Ok(())
    }

    /// Insert or update an account
    pub fn upsert(&self, account: Account) -> Result<(), ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(account.id, account);
        Ok(())
    }

    /// Delete an account
    pub fn delete(&self, id: AccountId) -> Result<bool, ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Check if an account exists
    pub fn exists(&self, id: AccountId) -> Result<bool, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.contains_key(&id))
    }

    /// Check if an account name is already taken
    pub fn name_exists(
        &self,
        name: &str,
        exclude_id: Option<AccountId>,
    ) -> Result<bool, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .any(|a| a.name.to_lowercase() == name_lower && Some(a.id) != exclude_id))
    }

    /// Replace the entire collection (used by backup restore)
    pub fn replace_all(&self, accounts: Vec<Account>) -> Result<(), ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for account in accounts {
            data.insert(account.id, account);
        }

        Ok(())
    }

    /// Count accounts
    pub fn count(&self) -> Result<usize, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
