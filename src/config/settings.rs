//! User settings for the expense manager
//!
//! Manages user preferences including the preferred backup directory,
//! currency symbol, and date format.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::storage::file_io::write_json_atomic;

/// User settings for the expense manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Directory where backups are written by default
    ///
    /// Cleared automatically when an export to it fails, so a stale
    /// location (unmounted drive, deleted folder) is not retried forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_backup_dir: Option<PathBuf>,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            preferred_backup_dir: None,
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| ExpenseError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;
        write_json_atomic(&paths.settings_file(), self)
    }

    /// Resolve the directory backups should be written to
    ///
    /// Falls back to the default backup directory when no preference is set.
    pub fn backup_dir(&self, paths: &ExpensePaths) -> PathBuf {
        self.preferred_backup_dir
            .clone()
            .unwrap_or_else(|| paths.backup_dir())
    }

    /// Forget the preferred backup directory and persist the change
    pub fn clear_backup_dir(&mut self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        self.preferred_backup_dir = None;
        self.save(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert!(settings.preferred_backup_dir.is_none());
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.preferred_backup_dir = Some(PathBuf::from("/mnt/usb/backups"));
        settings.currency_symbol = "€".to_string();

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(
            loaded.preferred_backup_dir,
            Some(PathBuf::from("/mnt/usb/backups"))
        );
        assert_eq!(loaded.currency_symbol, "€");
    }

    #[test]
    fn test_load_without_file_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert!(settings.preferred_backup_dir.is_none());
        // Loading alone must not create the file
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_backup_dir_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        assert_eq!(settings.backup_dir(&paths), paths.backup_dir());

        settings.preferred_backup_dir = Some(PathBuf::from("/elsewhere"));
        assert_eq!(settings.backup_dir(&paths), PathBuf::from("/elsewhere"));
    }

    #[test]
    fn test_clear_backup_dir_persists() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.preferred_backup_dir = Some(PathBuf::from("/mnt/usb/backups"));
        settings.save(&paths).unwrap();

        settings.clear_backup_dir(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(loaded.preferred_backup_dir.is_none());
    }
}
