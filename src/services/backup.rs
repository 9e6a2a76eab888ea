//! Backup service
//!
//! Orchestrates export and import on top of the backup modules. Export
//! snapshots every collection into one signed document; import is a
//! two-step preview-then-commit flow so nothing touches the store until
//! the caller has seen the validation outcome. A single in-flight flag
//! rejects overlapping export or commit attempts.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;

use crate::audit::Operation;
use crate::backup::{
    backup_filename, export, import, BackupFileInfo, BackupStorage, LocalDirStorage,
    ValidatedBackup,
};
use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::storage::Store;

/// Service for backup export and import
pub struct BackupService<'a> {
    store: &'a Store,
    in_flight: AtomicBool,
}

/// Releases the in-flight flag when the operation ends, however it ends
struct InFlightGuard<'g>(&'g AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<'a> BackupService<'a> {
    /// Create a new backup service
    pub fn new(store: &'a Store) -> Self {
        Self {
            store,
            in_flight: AtomicBool::new(false),
        }
    }

    fn begin(&self) -> ExpenseResult<InFlightGuard<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ExpenseError::OperationInProgress);
        }
        Ok(InFlightGuard(&self.in_flight))
    }

    /// Export every collection to the configured backup directory
    ///
    /// A failed write clears the preferred backup directory from the
    /// settings so the next export falls back to the default location.
    pub fn export(&self, settings: &mut Settings) -> ExpenseResult<PathBuf> {
        let dir = settings.backup_dir(self.store.paths());
        let storage = LocalDirStorage::new(dir);

        match self.export_with(&storage) {
            Ok(path) => Ok(path),
            Err(err @ ExpenseError::ExportFailed(_)) => {
                settings.clear_backup_dir(self.store.paths())?;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Export every collection through the given storage collaborator
    pub fn export_with(&self, storage: &dyn BackupStorage) -> ExpenseResult<PathBuf> {
        let _guard = self.begin()?;

        let accounts = self.store.accounts.get_all()?;
        let categories = self.store.categories.get_all()?;
        let transactions = self.store.transactions.get_all()?;

        let document = export::serialize(accounts, categories, transactions)?;
        let json = export::to_json(&document)?;

        let filename = backup_filename(Utc::now());
        let path = storage.write_file(&filename, &json)?;

        self.store
            .log_event(Operation::Export, format!("Exported backup {}", filename))?;

        Ok(path)
    }

    /// List backup files in the configured backup directory
    pub fn list(&self, settings: &Settings) -> ExpenseResult<Vec<BackupFileInfo>> {
        let dir = settings.backup_dir(self.store.paths());
        LocalDirStorage::new(dir).list_files()
    }

    /// Read and validate a backup file without touching the store
    pub fn preview(&self, path: &Path) -> ExpenseResult<ValidatedBackup> {
        let dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
        let storage = LocalDirStorage::new(dir);
        self.preview_with(&storage, path)
    }

    /// Read and validate a backup through the given storage collaborator
    pub fn preview_with(
        &self,
        storage: &dyn BackupStorage,
        path: &Path,
    ) -> ExpenseResult<ValidatedBackup> {
        let raw = storage.read_file(path)?;
        import::validate(&raw)
    }

    /// Replace every collection with the validated backup contents
    pub fn commit(&self, validated: ValidatedBackup) -> ExpenseResult<()> {
        let _guard = self.begin()?;

        let detail = format!(
            "Imported backup: {} accounts, {} categories, {} transactions, {} skipped",
            validated.accounts.len(),
            validated.categories.len(),
            validated.transactions.len(),
            validated.skipped.total()
        );

        self.store.replace_all(
            validated.accounts,
            validated.categories,
            validated.transactions,
        )?;

        self.store.log_event(Operation::Import, detail)?;

        Ok(())
    }
}
