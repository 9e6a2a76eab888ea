//! Category CLI commands
//!
//! Implements CLI commands for category management.

use clap::Subcommand;

use crate::display::category::{format_category_details, format_category_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::services::CategoryService;
use crate::storage::Store;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    Create {
        /// Category name
        name: String,
    },
    /// List all categories
    List,
    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },
    /// Rename a category
    Rename {
        /// Category name or ID
        category: String,
        /// New name
        name: String,
    },
    /// Delete a category; transactions keep their reference
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(store: &Store, cmd: CategoryCommands) -> ExpenseResult<()> {
    let service = CategoryService::new(store);

    match cmd {
        CategoryCommands::Create { name } => {
            let category = service.create(&name)?;

            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::List => {
            let categories = service.list()?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Show { category } => {
            let found = service
                .find(&category)?
                .ok_or_else(|| ExpenseError::category_not_found(&category))?;

            print!("{}", format_category_details(&found));
        }

        CategoryCommands::Rename { category, name } => {
            let found = service
                .find(&category)?
                .ok_or_else(|| ExpenseError::category_not_found(&category))?;

            let renamed = service.rename(found.id, &name)?;
            println!("Renamed category to: {}", renamed.name);
        }

        CategoryCommands::Delete { category } => {
            let found = service
                .find(&category)?
                .ok_or_else(|| ExpenseError::category_not_found(&category))?;

            service.delete(found.id)?;
            println!("Deleted category '{}'.", found.name);
            println!("Transactions in this category keep their reference and are shown as uncategorized.");
        }
    }

    Ok(())
}
