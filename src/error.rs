//! Custom error types for the expense manager
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for expense manager operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Backup file is not parseable JSON or lacks the required structure
    #[error("Backup data is broken: {0}")]
    BrokenData(String),

    /// Backup was produced by a different application
    #[error("Backup belongs to a different application: {found}")]
    WrongApp { found: String },

    /// Backup schema version is not supported by this build
    #[error("Unsupported backup version: {found}")]
    UnsupportedVersion { found: String },

    /// Backup carries no integrity signature
    #[error("Backup is missing its integrity signature")]
    MissingSignature,

    /// Backup contents do not match the recorded checksum
    #[error("Backup is corrupted or has been tampered with")]
    CorruptedOrTampered,

    /// Backup contains no records at all
    #[error("Backup contains no data")]
    EmptyBackup,

    /// Writing the backup to external storage failed
    #[error("Backup export failed: {0}")]
    ExportFailed(String),

    /// Reading the backup from external storage failed
    #[error("Backup import failed: {0}")]
    ImportIo(String),

    /// Another backup operation is already running
    #[error("A backup operation is already in progress")]
    OperationInProgress,
}

impl ExpenseError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for expense manager operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExpenseError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = ExpenseError::account_not_found("Checking");
        assert_eq!(err.to_string(), "Account not found: Checking");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_wrong_app_error() {
        let err = ExpenseError::WrongApp {
            found: "SomeOtherApp".into(),
        };
        assert_eq!(
            err.to_string(),
            "Backup belongs to a different application: SomeOtherApp"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let expense_err: ExpenseError = io_err.into();
        assert!(matches!(expense_err, ExpenseError::Io(_)));
    }
}
