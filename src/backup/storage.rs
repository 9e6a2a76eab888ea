//! External storage collaborator for backups
//!
//! Backup files live outside the managed data directory, wherever the
//! user points them. The collaborator is a trait so tests and future
//! remote targets can stand in for the local filesystem. Write failures
//! surface as `ExportFailed`, read failures as `ImportIo`; a failed
//! write never leaves a partial file behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ExpenseError, ExpenseResult};

/// A backup file visible to the storage collaborator
#[derive(Debug, Clone)]
pub struct BackupFileInfo {
    /// Filename without directory
    pub name: String,
    /// Full path to the file
    pub path: PathBuf,
    /// Size in bytes
    pub size_bytes: u64,
}

/// File access contract used by export and import
pub trait BackupStorage {
    /// List backup files, newest name first
    fn list_files(&self) -> ExpenseResult<Vec<BackupFileInfo>>;

    /// Write a complete file; all-or-nothing
    fn write_file(&self, filename: &str, content: &str) -> ExpenseResult<PathBuf>;

    /// Read a file to a string
    fn read_file(&self, path: &Path) -> ExpenseResult<String>;
}

/// Filesystem-backed storage rooted at one directory
pub struct LocalDirStorage {
    dir: PathBuf,
}

impl LocalDirStorage {
    /// Create storage rooted at the given directory
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The directory this storage writes into
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl BackupStorage for LocalDirStorage {
    fn list_files(&self) -> ExpenseResult<Vec<BackupFileInfo>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir)
            .map_err(|e| ExpenseError::ImportIo(format!("Failed to read backup directory: {}", e)))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                ExpenseError::ImportIo(format!("Failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                let name = match path.file_name() {
                    Some(name) => name.to_string_lossy().to_string(),
                    None => continue,
                };
                let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
                files.push(BackupFileInfo {
                    name,
                    path,
                    size_bytes,
                });
            }
        }

        files.sort_by(|a, b| b.name.cmp(&a.name));
        Ok(files)
    }

    fn write_file(&self, filename: &str, content: &str) -> ExpenseResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            ExpenseError::ExportFailed(format!("Failed to create backup directory: {}", e))
        })?;

        let target = self.dir.join(filename);
        let temp = target.with_extension("json.tmp");

        fs::write(&temp, content)
            .map_err(|e| ExpenseError::ExportFailed(format!("Failed to write backup file: {}", e)))?;

        if let Err(e) = fs::rename(&temp, &target) {
            let _ = fs::remove_file(&temp);
            return Err(ExpenseError::ExportFailed(format!(
                "Failed to finalize backup file: {}",
                e
            )));
        }

        Ok(target)
    }

    fn read_file(&self, path: &Path) -> ExpenseResult<String> {
        fs::read_to_string(path)
            .map_err(|e| ExpenseError::ImportIo(format!("Failed to read backup file: {}", e)))
    }
}
