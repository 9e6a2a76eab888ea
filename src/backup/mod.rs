//! Backup system for the expense manager
//!
//! Provides checksummed export documents and a strict validate-then-commit
//! import pipeline.
//!
//! # Architecture
//!
//! - `canonical`: one canonical JSON form shared by serializer and verifier
//! - `document`: the backup document format and filename convention
//! - `export`: builds a signed document from the current collections
//! - `import`: the multi-stage validation gate and skip accounting
//! - `storage`: the file access collaborator (local directory by default)
//!
//! # Backup Format
//!
//! Backups are UTF-8 JSON files with two top-level keys:
//! - `meta`: application id, format version, creation time and a
//!   `"sha256:<hex>"` checksum over the canonical form of `data`
//! - `data`: the complete accounts, categories and transactions collections
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_manager::backup::{export, import};
//!
//! let document = export::serialize(accounts, categories, transactions)?;
//! let json = export::to_json(&document)?;
//!
//! // Later, on another machine
//! let validated = import::validate(&json)?;
//! println!("skipped {} records", validated.skipped.total());
//! ```

pub mod canonical;
pub mod document;
pub mod export;
pub mod import;
pub mod storage;

pub use document::{
    backup_filename, BackupData, BackupDocument, BackupMeta, BACKUP_APP_ID, BACKUP_VERSION,
};
pub use import::{SkippedCounts, ValidatedBackup};
pub use storage::{BackupFileInfo, BackupStorage, LocalDirStorage};
