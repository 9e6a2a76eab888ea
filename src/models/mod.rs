//! Core data models for the expense manager
//!
//! This module contains all the data structures that represent the expense
//! tracking domain: accounts, categories, transactions and attachments.

pub mod account;
pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;

pub use account::Account;
pub use category::{Category, DEFAULT_CATEGORY_NAME};
pub use ids::{AccountId, AttachmentId, CategoryId, TransactionId};
pub use money::Money;
pub use transaction::{Attachment, Transaction, TransactionKind};
