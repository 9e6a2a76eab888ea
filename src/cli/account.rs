//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use crate::display::account::{format_account_details, format_account_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Money;
use crate::services::AccountService;
use crate::storage::Store;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Starting balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
    },
    /// List all accounts
    List,
    /// Show account details
    Show {
        /// Account name or ID
        account: String,
    },
    /// Select an account; every other account is deselected
    Select {
        /// Account name or ID
        account: String,
    },
    /// Rename an account
    Rename {
        /// Account name or ID
        account: String,
        /// New name
        name: String,
    },
    /// Delete an account and all of its transactions
    Delete {
        /// Account name or ID
        account: String,
    },
}

/// Handle an account command
pub fn handle_account_command(store: &Store, cmd: AccountCommands) -> ExpenseResult<()> {
    let service = AccountService::new(store);

    match cmd {
        AccountCommands::Create { name, balance } => {
            let balance = Money::parse(&balance).map_err(|e| {
                ExpenseError::Validation(format!(
                    "Invalid balance format: '{}'. Use format like '1000.00' or '1000'. Error: {}",
                    balance, e
                ))
            })?;

            let account = service.create(&name, balance)?;

            println!("Created account: {}", account.name);
            println!("  Balance:  {}", account.balance);
            println!(
                "  Selected: {}",
                if account.is_selected { "Yes" } else { "No" }
            );
            println!("  ID:       {}", account.id);
        }

        AccountCommands::List => {
            let accounts = service.list()?;
            print!("{}", format_account_list(&accounts));
        }

        AccountCommands::Show { account } => {
            let found = service
                .find(&account)?
                .ok_or_else(|| ExpenseError::account_not_found(&account))?;

            print!("{}", format_account_details(&found));
        }

        AccountCommands::Select { account } => {
            let found = service
                .find(&account)?
                .ok_or_else(|| ExpenseError::account_not_found(&account))?;

            let selected = service.select(found.id)?;
            println!("Selected account: {}", selected.name);
        }

        AccountCommands::Rename { account, name } => {
            let found = service
                .find(&account)?
                .ok_or_else(|| ExpenseError::account_not_found(&account))?;

            let renamed = service.rename(found.id, &name)?;
            println!("Renamed account to: {}", renamed.name);
        }

        AccountCommands::Delete { account } => {
            let found = service
                .find(&account)?
                .ok_or_else(|| ExpenseError::account_not_found(&account))?;

            let removed = service.delete(found.id)?;
            println!(
                "Deleted account '{}' and {} transaction(s).",
                found.name, removed
            );
        }
    }

    Ok(())
}
