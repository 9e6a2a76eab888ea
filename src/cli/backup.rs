//! Backup CLI commands
//!
//! Implements CLI commands for exporting, listing and importing
//! checksum-verified backups.

use std::path::PathBuf;

use clap::Subcommand;

use crate::backup::LocalDirStorage;
use crate::config::Settings;
use crate::error::ExpenseResult;
use crate::services::BackupService;
use crate::storage::Store;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Export all data to a backup file
    Export {
        /// Target directory; overrides the configured backup directory
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// List backup files in the configured backup directory
    List,
    /// Validate a backup file and replace all data with its contents
    Import {
        /// Path to the backup file
        file: PathBuf,
        /// Apply the import; without this flag only the preview is shown
        #[arg(long)]
        confirm: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    store: &Store,
    settings: &mut Settings,
    cmd: BackupCommands,
) -> ExpenseResult<()> {
    let service = BackupService::new(store);

    match cmd {
        BackupCommands::Export { dir } => {
            let path = match dir {
                Some(dir) => service.export_with(&LocalDirStorage::new(dir))?,
                None => service.export(settings)?,
            };
            println!("Backup written to {}", path.display());
        }

        BackupCommands::List => {
            let files = service.list(settings)?;

            if files.is_empty() {
                println!(
                    "No backups found in {}",
                    settings.backup_dir(store.paths()).display()
                );
                return Ok(());
            }

            for file in &files {
                println!("{}  ({} bytes)", file.name, file.size_bytes);
            }
            let count = files.len();
            let noun = if count == 1 { "backup" } else { "backups" };
            println!("\n{} {}", count, noun);
        }

        BackupCommands::Import { file, confirm } => {
            let validated = service.preview(&file)?;

            println!("Backup file is valid.");
            println!("  Accounts:     {}", validated.accounts.len());
            println!("  Categories:   {}", validated.categories.len());
            println!("  Transactions: {}", validated.transactions.len());

            if validated.skipped.total() > 0 {
                println!(
                    "  Skipped:      {} record(s) ({} accounts, {} categories, {} transactions)",
                    validated.skipped.total(),
                    validated.skipped.accounts,
                    validated.skipped.categories,
                    validated.skipped.transactions
                );
            }

            if !confirm {
                println!();
                println!("This is a preview; no data was changed.");
                println!("Re-run with --confirm to replace all current data with this backup.");
                return Ok(());
            }

            service.commit(validated)?;
            println!();
            println!("Import complete. All previous data was replaced.");
        }
    }

    Ok(())
}
