//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::models::{Account, Money};

/// Format a list of accounts with balances as a table
pub fn format_account_list(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    // Calculate column widths
    let name_width = accounts
        .iter()
        .map(|a| a.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    // Build header
    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}  {}\n",
        "Name",
        "Balance",
        "Status",
        name_width = name_width,
    ));

    // Separator line
    output.push_str(&format!(
        "{:-<name_width$}  {:->12}  {:-<8}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    // Account rows
    for account in accounts {
        let status = if account.is_selected { "Selected" } else { "" };

        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {}\n",
            account.name,
            account.balance.to_string(),
            status,
            name_width = name_width,
        ));
    }

    // Total row
    let total: Money = accounts.iter().map(|a| a.balance).sum();

    output.push_str(&format!(
        "{:-<name_width$}  {:->12}  {:-<8}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    output.push_str(&format!(
        "{:<name_width$}  {:>12}\n",
        "TOTAL",
        total.to_string(),
        name_width = name_width,
    ));

    output
}

/// Format a single account's details
pub fn format_account_details(account: &Account) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account: {}\n", account.name));
    output.push_str(&format!("  ID:       {}\n", account.id));
    output.push_str(&format!("  Balance:  {}\n", account.balance));
    output.push_str(&format!(
        "  Selected: {}\n",
        if account.is_selected { "Yes" } else { "No" }
    ));

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        account.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        account.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}
