//! Storage layer for the expense manager
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. The `Store` coordinator owns one repository per entity plus
//! the audit logger, and exposes bulk load/save/replace operations.

pub mod accounts;
pub mod categories;
pub mod file_io;
pub mod transactions;

pub use accounts::AccountRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use transactions::TransactionRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType, Operation};
use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::{Account, Category, Transaction};

/// Main storage coordinator that provides access to all repositories
pub struct Store {
    paths: ExpensePaths,
    pub accounts: AccountRepository,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    audit: AuditLogger,
}

impl Store {
    /// Create a new Store instance
    pub fn new(paths: ExpensePaths) -> Result<Self, ExpenseError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            accounts: AccountRepository::new(paths.accounts_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), ExpenseError> {
        self.accounts.load()?;
        self.transactions.load()?;
        self.categories.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), ExpenseError> {
        self.accounts.save()?;
        self.transactions.save()?;
        self.categories.save()?;
        Ok(())
    }

    /// Replace every collection at once and persist the result
    ///
    /// Used by backup restore: the restored data overwrites all existing
    /// records verbatim. Nothing is merged.
    pub fn replace_all(
        &self,
        accounts: Vec<Account>,
        categories: Vec<Category>,
        transactions: Vec<Transaction>,
    ) -> Result<(), ExpenseError> {
        self.accounts.replace_all(accounts)?;
        self.categories.replace_all(categories)?;
        self.transactions.replace_all(transactions)?;
        self.save_all()
    }

    /// Record a create operation in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), ExpenseError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update operation in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), ExpenseError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ))
    }

    /// Record a delete operation in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), ExpenseError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    /// Record a backup export or import event in the audit log
    pub fn log_event(
        &self,
        operation: Operation,
        details: impl Into<String>,
    ) -> Result<(), ExpenseError> {
        self.audit.log(&AuditEntry::backup_event(operation, details))
    }

    /// Check if storage has been initialized (settings file exists)
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }
}
