//! Account model
//!
//! Represents the accounts transactions are recorded against. Exactly one
//! account is marked as selected at any time; the storage layer enforces
//! that invariant on every selection change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// A financial account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Account name (e.g., "Chase Checking")
    pub name: String,

    /// Current balance
    #[serde(default)]
    pub balance: Money,

    /// Whether this is the currently selected account
    #[serde(default)]
    pub is_selected: bool,

    /// When the account was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// When the account was last modified
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(),
            name: name.into(),
            balance: Money::zero(),
            is_selected: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new account with an opening balance
    pub fn with_balance(name: impl Into<String>, balance: Money) -> Self {
        let mut account = Self::new(name);
        account.balance = balance;
        account
    }

    /// Rename this account
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Apply a balance change (positive or negative)
    pub fn apply_balance_change(&mut self, delta: Money) {
        self.balance += delta;
        self.updated_at = Utc::now();
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.balance)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let account = Account::new("Checking");
        assert_eq!(account.name, "Checking");
        assert_eq!(account.balance, Money::zero());
        assert!(!account.is_selected);
    }

    #[test]
    fn test_with_balance() {
        let account = Account::with_balance("Savings", Money::from_cents(100000));
        assert_eq!(account.balance.cents(), 100000);
    }

    #[test]
    fn test_apply_balance_change() {
        let mut account = Account::new("Test");
        account.apply_balance_change(Money::from_cents(5000));
        assert_eq!(account.balance.cents(), 5000);

        account.apply_balance_change(Money::from_cents(-2000));
        assert_eq!(account.balance.cents(), 3000);
    }

    #[test]
    fn test_validation() {
        let mut account = Account::new("Valid Name");
        assert!(account.validate().is_ok());

        account.name = String::new();
        assert_eq!(account.validate(), Err(AccountValidationError::EmptyName));

        account.name = "a".repeat(101);
        assert!(matches!(
            account.validate(),
            Err(AccountValidationError::NameTooLong(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let account = Account::new("Test");
        let json = serde_json::to_string(&account).unwrap();
        let deserialized: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(account.id, deserialized.id);
        assert_eq!(account.name, deserialized.name);
    }

    #[test]
    fn test_display() {
        let account = Account::with_balance("My Checking", Money::from_cents(1050));
        assert_eq!(format!("{}", account), "My Checking ($10.50)");
    }
}
