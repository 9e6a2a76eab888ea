//! CLI command definitions and handlers
//!
//! Each entity gets a subcommand enum and a handler function; the
//! binary dispatches to these after opening the store.

pub mod account;
pub mod backup;
pub mod category;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use backup::{handle_backup_command, BackupCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
