//! Transaction service
//!
//! Provides business logic for transaction management including CRUD
//! operations, querying, and keeping account balances in step with
//! every mutation.

use chrono::{NaiveDate, Utc};

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{AccountId, CategoryId, Money, Transaction, TransactionId, TransactionKind};
use crate::query::{self, Filter, SortKey, Totals};
use crate::storage::Store;

/// Service for transaction management
pub struct TransactionService<'a> {
    store: &'a Store,
}

/// A partial update to a transaction
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    /// New kind
    pub kind: Option<TransactionKind>,
    /// New amount
    pub amount: Option<Money>,
    /// New transaction date
    pub transaction_date: Option<NaiveDate>,
    /// New category list; replaces the whole list
    pub category_ids: Option<Vec<CategoryId>>,
    /// New description
    pub description: Option<String>,
}

impl TransactionUpdate {
    /// Check whether this update changes anything
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.amount.is_none()
            && self.transaction_date.is_none()
            && self.category_ids.is_none()
            && self.description.is_none()
    }
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Create a new transaction
    ///
    /// The referenced account and every referenced category must exist.
    /// The account balance is adjusted by the transaction's effect.
    pub fn create(
        &self,
        account_id: AccountId,
        kind: TransactionKind,
        amount: Money,
        transaction_date: NaiveDate,
        category_ids: Vec<CategoryId>,
        description: &str,
    ) -> ExpenseResult<Transaction> {
        let mut account = self
            .store
            .accounts
            .get(account_id)?
            .ok_or_else(|| ExpenseError::account_not_found(account_id.to_string()))?;

        for category_id in &category_ids {
            if self.store.categories.get(*category_id)?.is_none() {
                return Err(ExpenseError::category_not_found(category_id.to_string()));
            }
        }

        let txn = Transaction::with_details(
            account_id,
            kind,
            amount,
            transaction_date,
            category_ids,
            description,
        );

        txn.validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.store.transactions.upsert(txn.clone())?;
        self.store.transactions.save()?;

        account.apply_balance_change(txn.balance_effect());
        self.store.accounts.upsert(account)?;
        self.store.accounts.save()?;

        self.store.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.description.clone()),
            &txn,
        )?;

        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> ExpenseResult<Option<Transaction>> {
        self.store.transactions.get(id)
    }

    /// Apply a partial update to a transaction
    ///
    /// The account balance is adjusted by the difference between the old
    /// and new effect, so moving an expense from $10 to $25 debits the
    /// account another $15.
    pub fn update(&self, id: TransactionId, patch: TransactionUpdate) -> ExpenseResult<Transaction> {
        let mut txn = self
            .store
            .transactions
            .get(id)?
            .ok_or_else(|| ExpenseError::transaction_not_found(id.to_string()))?;

        if let Some(category_ids) = &patch.category_ids {
            for category_id in category_ids {
                if self.store.categories.get(*category_id)?.is_none() {
                    return Err(ExpenseError::category_not_found(category_id.to_string()));
                }
            }
        }

        let before = txn.clone();
        let old_effect = txn.balance_effect();

        if let Some(kind) = patch.kind {
            txn.kind = kind;
        }
        if let Some(amount) = patch.amount {
            txn.amount = amount;
        }
        if let Some(transaction_date) = patch.transaction_date {
            txn.transaction_date = transaction_date;
        }
        if let Some(category_ids) = patch.category_ids {
            txn.category_ids = category_ids;
        }
        if let Some(description) = patch.description {
            txn.description = description;
        }
        txn.updated_at = Utc::now();

        txn.validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.store.transactions.upsert(txn.clone())?;
        self.store.transactions.save()?;

        let delta = Money::from_cents(txn.balance_effect().cents() - old_effect.cents());
        if delta.cents() != 0 {
            if let Some(mut account) = self.store.accounts.get(txn.account_id)? {
                account.apply_balance_change(delta);
                self.store.accounts.upsert(account)?;
                self.store.accounts.save()?;
            }
        }

        self.store.log_update(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.description.clone()),
            &before,
            &txn,
        )?;

        Ok(txn)
    }

    /// Delete a transaction, reversing its balance effect
    pub fn delete(&self, id: TransactionId) -> ExpenseResult<Transaction> {
        let txn = self
            .store
            .transactions
            .get(id)?
            .ok_or_else(|| ExpenseError::transaction_not_found(id.to_string()))?;

        self.store.transactions.delete(id)?;
        self.store.transactions.save()?;

        if let Some(mut account) = self.store.accounts.get(txn.account_id)? {
            let reversal = Money::from_cents(-txn.balance_effect().cents());
            account.apply_balance_change(reversal);
            self.store.accounts.upsert(account)?;
            self.store.accounts.save()?;
        }

        self.store.log_delete(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.description.clone()),
            &txn,
        )?;

        Ok(txn)
    }

    /// List transactions, filtered, searched and sorted
    pub fn list(
        &self,
        filter: Option<&Filter>,
        sort: SortKey,
        search: Option<&str>,
    ) -> ExpenseResult<Vec<Transaction>> {
        let transactions = self.store.transactions.get_all()?;
        Ok(query::query(transactions, filter, sort, search))
    }

    /// Income and expense totals over a filtered set of transactions
    pub fn totals(&self, filter: Option<&Filter>, search: Option<&str>) -> ExpenseResult<Totals> {
        let matched = self.list(filter, SortKey::default(), search)?;
        Ok(query::aggregate(&matched))
    }
}
