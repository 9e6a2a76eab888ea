//! Account service
//!
//! Provides business logic for account management including CRUD operations,
//! the single-selection invariant, and cascade deletion of transactions.

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Account, AccountId, Money};
use crate::storage::Store;

/// Service for account management
pub struct AccountService<'a> {
    store: &'a Store,
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Create a new account
    ///
    /// The first account ever created becomes the selected account.
    pub fn create(&self, name: &str, balance: Money) -> ExpenseResult<Account> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ExpenseError::Validation(
                "Account name cannot be empty".into(),
            ));
        }

        if self.store.accounts.name_exists(name, None)? {
            return Err(ExpenseError::Duplicate {
                entity_type: "Account",
                identifier: name.to_string(),
            });
        }

        let mut account = Account::with_balance(name, balance);
        if self.store.accounts.count()? == 0 {
            account.is_selected = true;
        }

        account
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.store.accounts.upsert(account.clone())?;
        self.store.accounts.save()?;

        self.store.log_create(
            EntityType::Account,
            account.id.to_string(),
            Some(account.name.clone()),
            &account,
        )?;

        Ok(account)
    }

    /// Get an account by ID
    pub fn get(&self, id: AccountId) -> ExpenseResult<Option<Account>> {
        self.store.accounts.get(id)
    }

    /// Find an account by name or ID string
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Account>> {
        if let Some(account) = self.store.accounts.get_by_name(identifier)? {
            return Ok(Some(account));
        }

        if let Ok(id) = identifier.parse::<AccountId>() {
            return self.store.accounts.get(id);
        }

        Ok(None)
    }

    /// Get all accounts
    pub fn list(&self) -> ExpenseResult<Vec<Account>> {
        self.store.accounts.get_all()
    }

    /// Get the currently selected account
    pub fn selected(&self) -> ExpenseResult<Option<Account>> {
        self.store.accounts.selected()
    }

    /// Select an account, deselecting every other account
    pub fn select(&self, id: AccountId) -> ExpenseResult<Account> {
        let before = self
            .store
            .accounts
            .get(id)?
            .ok_or_else(|| ExpenseError::account_not_found(id.to_string()))?;

        self.store.accounts.select(id)?;
        self.store.accounts.save()?;

        let account = self
            .store
            .accounts
            .get(id)?
            .ok_or_else(|| ExpenseError::account_not_found(id.to_string()))?;

        self.store.log_update(
            EntityType::Account,
            account.id.to_string(),
            Some(account.name.clone()),
            &before,
            &account,
        )?;

        Ok(account)
    }

    /// Rename an account
    pub fn rename(&self, id: AccountId, new_name: &str) -> ExpenseResult<Account> {
        let mut account = self
            .store
            .accounts
            .get(id)?
            .ok_or_else(|| ExpenseError::account_not_found(id.to_string()))?;

        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(ExpenseError::Validation(
                "Account name cannot be empty".into(),
            ));
        }

        if self.store.accounts.name_exists(new_name, Some(id))? {
            return Err(ExpenseError::Duplicate {
                entity_type: "Account",
                identifier: new_name.to_string(),
            });
        }

        let before = account.clone();
        account.rename(new_name);

        account
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.store.accounts.upsert(account.clone())?;
        self.store.accounts.save()?;

        self.store.log_update(
            EntityType::Account,
            account.id.to_string(),
            Some(account.name.clone()),
            &before,
            &account,
        )?;

        Ok(account)
    }

    /// Delete an account and every transaction that references it
    ///
    /// Returns the number of cascaded transaction deletions. If the deleted
    /// account was selected, the first remaining account (by name) becomes
    /// selected so the single-selection invariant survives the delete.
    pub fn delete(&self, id: AccountId) -> ExpenseResult<usize> {
        let account = self
            .store
            .accounts
            .get(id)?
            .ok_or_else(|| ExpenseError::account_not_found(id.to_string()))?;

        let removed = self.store.transactions.delete_by_account(id)?;
        self.store.transactions.save()?;

        self.store.accounts.delete(id)?;

        if account.is_selected {
            let remaining = self.store.accounts.get_all()?;
            if let Some(next) = remaining.first() {
                self.store.accounts.select(next.id)?;
            }
        }
        self.store.accounts.save()?;

        self.store.log_delete(
            EntityType::Account,
            account.id.to_string(),
            Some(account.name.clone()),
            &account,
        )?;

        Ok(removed)
    }

    /// Apply a balance delta to an account and persist it
    pub fn apply_balance_change(&self, id: AccountId, delta: Money) -> ExpenseResult<Account> {
        let mut account = self
            .store
            .accounts
            .get(id)?
            .ok_or_else(|| ExpenseError::account_not_found(id.to_string()))?;

        account.apply_balance_change(delta);

        self.store.accounts.upsert(account.clone())?;
        self.store.accounts.save()?;

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::{Transaction, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, Store) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = Store::new(paths).unwrap();
        store.load_all().unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_first_account_is_selected() {
        let (_temp_dir, store) = create_test_store();
        let service = AccountService::new(&store);

        let first = service.create("Checking", Money::zero()).unwrap();
        assert!(first.is_selected);

        let second = service.create("Savings", Money::zero()).unwrap();
        assert!(!second.is_selected);

        assert_eq!(service.selected().unwrap().unwrap().id, first.id);
    }

    #[test]
    fn test_create_duplicate_name() {
        let (_temp_dir, store) = create_test_store();
        let service = AccountService::new(&store);

        service.create("Checking", Money::zero()).unwrap();

        let result = service.create("checking", Money::zero());
        assert!(matches!(result, Err(ExpenseError::Duplicate { .. })));
    }

    #[test]
    fn test_create_empty_name_fails() {
        let (_temp_dir, store) = create_test_store();
        let service = AccountService::new(&store);

        let result = service.create("   ", Money::zero());
        assert!(matches!(result, Err(ExpenseError::Validation(_))));
    }

    #[test]
    fn test_find_account() {
        let (_temp_dir, store) = create_test_store();
        let service = AccountService::new(&store);

        let created = service.create("My Checking", Money::zero()).unwrap();

        let found = service.find("My Checking").unwrap().unwrap();
        assert_eq!(found.id, created.id);

        // Case insensitive
        let found = service.find("my checking").unwrap().unwrap();
        assert_eq!(found.id, created.id);

        // By id string
        let found = service.find(&created.id.to_string()).unwrap().unwrap();
        assert_eq!(found.id, created.id);
    }

    #[test]
    fn test_select_moves_selection() {
        let (_temp_dir, store) = create_test_store();
        let service = AccountService::new(&store);

        let first = service.create("Checking", Money::zero()).unwrap();
        let second = service.create("Savings", Money::zero()).unwrap();

        service.select(second.id).unwrap();

        let accounts = service.list().unwrap();
        let selected: Vec<_> = accounts.iter().filter(|a| a.is_selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, second.id);
        assert!(!accounts.iter().any(|a| a.id == first.id && a.is_selected));
    }

    #[test]
    fn test_select_unknown_fails() {
        let (_temp_dir, store) = create_test_store();
        let service = AccountService::new(&store);

        let result = service.select(AccountId::new());
        assert!(matches!(result, Err(ExpenseError::NotFound { .. })));
    }

    #[test]
    fn test_rename() {
        let (_temp_dir, store) = create_test_store();
        let service = AccountService::new(&store);

        let account = service.create("Old Name", Money::zero()).unwrap();
        let renamed = service.rename(account.id, "New Name").unwrap();
        assert_eq!(renamed.name, "New Name");
    }

    #[test]
    fn test_delete_cascades_transactions() {
        let (_temp_dir, store) = create_test_store();
        let service = AccountService::new(&store);

        let account = service.create("Checking", Money::zero()).unwrap();
        let other = service.create("Savings", Money::zero()).unwrap();

        for day in 1..=3 {
            let txn = Transaction::new(
                account.id,
                TransactionKind::Expense,
                Money::from_cents(100),
                NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            );
            store.transactions.upsert(txn).unwrap();
        }
        let kept = Transaction::new(
            other.id,
            TransactionKind::Expense,
            Money::from_cents(100),
            NaiveDate::from_ymd_opt(2025, 1, 4).unwrap(),
        );
        store.transactions.upsert(kept).unwrap();

        let removed = service.delete(account.id).unwrap();
        assert_eq!(removed, 3);
        assert_eq!(store.transactions.count().unwrap(), 1);
        assert!(service.get(account.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_selected_moves_selection() {
        let (_temp_dir, store) = create_test_store();
        let service = AccountService::new(&store);

        let first = service.create("Checking", Money::zero()).unwrap();
        let second = service.create("Savings", Money::zero()).unwrap();

        service.delete(first.id).unwrap();

        let selected = service.selected().unwrap().unwrap();
        assert_eq!(selected.id, second.id);
    }

    #[test]
    fn test_apply_balance_change() {
        let (_temp_dir, store) = create_test_store();
        let service = AccountService::new(&store);

        let account = service.create("Checking", Money::from_cents(1000)).unwrap();

        let updated = service
            .apply_balance_change(account.id, Money::from_cents(-250))
            .unwrap();
        assert_eq!(updated.balance.cents(), 750);
    }
}
