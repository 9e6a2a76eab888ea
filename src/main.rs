use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_manager::cli::{
    handle_account_command, handle_backup_command, handle_category_command,
    handle_transaction_command,
};
use expense_manager::config::{paths::ExpensePaths, settings::Settings};
use expense_manager::storage::Store;

#[derive(Parser)]
#[command(
    name = "expman",
    version,
    about = "Personal expense tracking from the command line",
    long_about = "Expense Manager tracks income and expenses across accounts and \
                  categories, answers filtered queries over the transaction \
                  register, and keeps checksum-verified backups of all data."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management commands
    #[command(subcommand)]
    Account(expense_manager::cli::AccountCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(expense_manager::cli::CategoryCommands),

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(expense_manager::cli::TransactionCommands),

    /// Backup export and import commands
    #[command(subcommand)]
    Backup(expense_manager::cli::BackupCommands),

    /// Show or change configuration
    Config {
        /// Set the preferred backup directory
        #[arg(long, value_name = "DIR")]
        set_backup_dir: Option<PathBuf>,

        /// Forget the preferred backup directory
        #[arg(long)]
        clear_backup_dir: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let store = Store::new(paths.clone())?;
    store.load_all()?;

    match cli.command {
        Some(Commands::Account(cmd)) => {
            handle_account_command(&store, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&store, cmd)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&store, cmd)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&store, &mut settings, cmd)?;
        }
        Some(Commands::Config {
            set_backup_dir,
            clear_backup_dir,
        }) => {
            handle_config(&store, &mut settings, set_backup_dir, clear_backup_dir)?;
        }
        None => {
            println!("Expense Manager - personal expense tracking");
            println!();
            println!("Run 'expman --help' for usage information.");
        }
    }

    Ok(())
}

fn handle_config(
    store: &Store,
    settings: &mut Settings,
    set_backup_dir: Option<PathBuf>,
    clear_backup_dir: bool,
) -> Result<()> {
    let paths = store.paths();

    if let Some(dir) = set_backup_dir {
        settings.preferred_backup_dir = Some(dir.clone());
        settings.save(paths)?;
        println!("Backup directory set to {}", dir.display());
        return Ok(());
    }

    if clear_backup_dir {
        settings.clear_backup_dir(paths)?;
        println!("Backup directory reset to the default location.");
        return Ok(());
    }

    println!("Expense Manager Configuration");
    println!("=============================");
    println!("Data directory:   {}", paths.data_dir().display());
    println!("Backup directory: {}", settings.backup_dir(paths).display());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Date format:     {}", settings.date_format);

    Ok(())
}
