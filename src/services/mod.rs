//! Service layer for the expense manager
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, balance bookkeeping, and cross-entity operations.

pub mod account;
pub mod backup;
pub mod category;
pub mod transaction;

pub use account::AccountService;
pub use backup::BackupService;
pub use category::CategoryService;
pub use transaction::{TransactionService, TransactionUpdate};
