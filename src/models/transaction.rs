//! Transaction model
//!
//! Represents income and expense records. Amounts are always non-negative;
//! the kind determines whether a transaction adds to or subtracts from its
//! account balance.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, AttachmentId, CategoryId, TransactionId};
use super::money::Money;

/// Kind of transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money flowing into the account
    Income,
    /// Money flowing out of the account
    #[default]
    Expense,
}

impl TransactionKind {
    /// Parse a kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// The sign this kind applies to an account balance
    pub fn balance_sign(&self) -> i64 {
        match self {
            Self::Income => 1,
            Self::Expense => -1,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A file attached to a transaction (receipt, invoice, etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Unique identifier
    pub id: AttachmentId,

    /// Display name of the attachment
    pub name: String,

    /// Location of the attachment contents
    pub uri: String,
}

impl Attachment {
    /// Create a new attachment
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            id: AttachmentId::new(),
            name: name.into(),
            uri: uri.into(),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The account this transaction belongs to
    pub account_id: AccountId,

    /// Whether this is income or an expense
    pub kind: TransactionKind,

    /// Amount, always non-negative; the kind carries the direction
    #[serde(default)]
    pub amount: Money,

    /// The date the transaction occurred
    pub transaction_date: NaiveDate,

    /// Categories this transaction belongs to; the first entry is the
    /// primary category
    #[serde(default = "default_category_ids")]
    pub category_ids: Vec<CategoryId>,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Attached files
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// Whether this transaction is selected in the UI
    #[serde(default)]
    pub is_selected: bool,

    /// When the transaction was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_category_ids() -> Vec<CategoryId> {
    vec![CategoryId::default_category()]
}

impl Transaction {
    /// Create a new transaction in the default category
    pub fn new(
        account_id: AccountId,
        kind: TransactionKind,
        amount: Money,
        transaction_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            account_id,
            kind,
            amount,
            transaction_date,
            category_ids: vec![CategoryId::default_category()],
            description: String::new(),
            attachments: Vec::new(),
            is_selected: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a transaction with all common fields
    ///
    /// An empty category list falls back to the default category so the
    /// non-empty invariant holds from construction.
    pub fn with_details(
        account_id: AccountId,
        kind: TransactionKind,
        amount: Money,
        transaction_date: NaiveDate,
        category_ids: Vec<CategoryId>,
        description: impl Into<String>,
    ) -> Self {
        let mut txn = Self::new(account_id, kind, amount, transaction_date);
        if !category_ids.is_empty() {
            txn.category_ids = category_ids;
        }
        txn.description = description.into();
        txn
    }

    /// The primary category of this transaction
    pub fn category_id(&self) -> CategoryId {
        self.category_ids
            .first()
            .copied()
            .unwrap_or_else(CategoryId::default_category)
    }

    /// Check if this transaction is income
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Check if this transaction is an expense
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// The balance effect of this transaction (positive for income,
    /// negative for expense)
    pub fn balance_effect(&self) -> Money {
        Money::from_cents(self.amount.cents() * self.kind.balance_sign())
    }

    /// Add an attachment
    pub fn add_attachment(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
        self.updated_at = Utc::now();
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }

        if self.category_ids.is_empty() {
            return Err(TransactionValidationError::NoCategory);
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.transaction_date.format("%Y-%m-%d"),
            self.kind,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount(Money),
    NoCategory,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Transaction amount cannot be negative: {}", amount)
            }
            Self::NoCategory => write!(f, "Transaction must have at least one category"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_account_id() -> AccountId {
        AccountId::new()
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_new_transaction() {
        let account_id = test_account_id();
        let txn = Transaction::new(
            account_id,
            TransactionKind::Expense,
            Money::from_cents(5000),
            test_date(),
        );

        assert_eq!(txn.account_id, account_id);
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.amount.cents(), 5000);
        assert_eq!(txn.category_id(), CategoryId::default_category());
    }

    #[test]
    fn test_with_details_keeps_categories() {
        let cat = CategoryId::new();
        let txn = Transaction::with_details(
            test_account_id(),
            TransactionKind::Income,
            Money::from_cents(100000),
            test_date(),
            vec![cat],
            "Paycheck",
        );

        assert_eq!(txn.category_id(), cat);
        assert_eq!(txn.description, "Paycheck");
    }

    #[test]
    fn test_with_details_empty_categories_fall_back() {
        let txn = Transaction::with_details(
            test_account_id(),
            TransactionKind::Expense,
            Money::from_cents(100),
            test_date(),
            Vec::new(),
            "",
        );

        assert_eq!(txn.category_id(), CategoryId::default_category());
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_balance_effect() {
        let income = Transaction::new(
            test_account_id(),
            TransactionKind::Income,
            Money::from_cents(1000),
            test_date(),
        );
        assert_eq!(income.balance_effect().cents(), 1000);

        let expense = Transaction::new(
            test_account_id(),
            TransactionKind::Expense,
            Money::from_cents(1000),
            test_date(),
        );
        assert_eq!(expense.balance_effect().cents(), -1000);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(TransactionKind::parse("income"), Some(TransactionKind::Income));
        assert_eq!(TransactionKind::parse("EXPENSE"), Some(TransactionKind::Expense));
        assert_eq!(TransactionKind::parse("transfer"), None);
    }

    #[test]
    fn test_validation() {
        let mut txn = Transaction::new(
            test_account_id(),
            TransactionKind::Expense,
            Money::from_cents(5000),
            test_date(),
        );
        assert!(txn.validate().is_ok());

        txn.amount = Money::from_cents(-1);
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::NegativeAmount(_))
        ));

        txn.amount = Money::from_cents(1);
        txn.category_ids.clear();
        assert_eq!(txn.validate(), Err(TransactionValidationError::NoCategory));
    }

    #[test]
    fn test_attachments() {
        let mut txn = Transaction::new(
            test_account_id(),
            TransactionKind::Expense,
            Money::from_cents(5000),
            test_date(),
        );

        txn.add_attachment(Attachment::new("receipt.png", "file:///tmp/receipt.png"));
        assert_eq!(txn.attachments.len(), 1);
        assert_eq!(txn.attachments[0].name, "receipt.png");
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&TransactionKind::Income).unwrap();
        assert_eq!(json, "\"income\"");
    }

    #[test]
    fn test_serialization() {
        let txn = Transaction::with_details(
            test_account_id(),
            TransactionKind::Expense,
            Money::from_cents(5000),
            test_date(),
            vec![CategoryId::new()],
            "Groceries",
        );

        let json = serde_json::to_string(&txn).unwrap();
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn.id, deserialized.id);
        assert_eq!(txn.amount, deserialized.amount);
        assert_eq!(txn.description, deserialized.description);
    }

    #[test]
    fn test_display() {
        let txn = Transaction::new(
            test_account_id(),
            TransactionKind::Expense,
            Money::from_cents(5000),
            test_date(),
        );
        assert_eq!(format!("{}", txn), "2025-01-15 Expense $50.00");
    }
}
