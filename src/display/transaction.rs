//! Transaction display formatting
//!
//! Provides utilities for formatting transactions for terminal display,
//! including register views and the income/expense totals footer.

use crate::models::{Money, Transaction, TransactionKind};
use crate::query::Totals;

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction) -> String {
    let kind_icon = match txn.kind {
        TransactionKind::Income => "+",
        TransactionKind::Expense => "-",
    };

    let description = if txn.description.is_empty() {
        "(no description)".to_string()
    } else {
        txn.description.clone()
    };

    let attachment_indicator = if txn.attachments.is_empty() {
        String::new()
    } else {
        format!(" [{}]", txn.attachments.len())
    };

    format!(
        "{} {} {:30} {:>12}{}",
        kind_icon,
        txn.transaction_date.format("%Y-%m-%d"),
        truncate(&description, 30),
        txn.amount.to_string(),
        attachment_indicator
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:1} {:10} {:30} {:>12}\n",
        "", "Date", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(58));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, category_names: &[String]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!(
        "Date:        {}\n",
        txn.transaction_date.format("%Y-%m-%d")
    ));
    output.push_str(&format!("Kind:        {}\n", txn.kind));
    output.push_str(&format!("Amount:      {}\n", txn.amount));

    if category_names.is_empty() {
        output.push_str("Categories:  (uncategorized)\n");
    } else {
        output.push_str(&format!("Categories:  {}\n", category_names.join(", ")));
    }

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    if !txn.attachments.is_empty() {
        output.push_str("\nAttachments:\n");
        for (i, attachment) in txn.attachments.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} ({})\n",
                i + 1,
                attachment.name,
                attachment.uri
            ));
        }
    }

    output
}

/// Format income and expense totals with the resulting net
pub fn format_totals(totals: &Totals) -> String {
    let net = Money::from_cents(totals.total_income.cents() - totals.total_expense.cents());

    let mut output = String::new();
    output.push_str(&format!("{:>10} {:>12}\n", "Income:", totals.total_income));
    output.push_str(&format!("{:>10} {:>12}\n", "Expense:", totals.total_expense));
    output.push_str(&format!("{:>10} {:>12}\n", "Net:", net));
    output
}

/// Truncate a string to a maximum length
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountId;
    use chrono::NaiveDate;

    fn test_txn(kind: TransactionKind, cents: i64, description: &str) -> Transaction {
        Transaction::with_details(
            AccountId::new(),
            kind,
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            Vec::new(),
            description,
        )
    }

    #[test]
    fn test_format_transaction_row() {
        let txn = test_txn(TransactionKind::Expense, 5000, "Test Store");

        let formatted = format_transaction_row(&txn);
        assert!(formatted.starts_with("- "));
        assert!(formatted.contains("2025-01-15"));
        assert!(formatted.contains("Test Store"));
        assert!(formatted.contains("$50.00"));
    }

    #[test]
    fn test_format_income_row_marker() {
        let txn = test_txn(TransactionKind::Income, 100000, "Paycheck");
        assert!(format_transaction_row(&txn).starts_with("+ "));
    }

    #[test]
    fn test_format_empty_register() {
        let formatted = format_transaction_register(&[]);
        assert!(formatted.contains("No transactions found"));
    }

    #[test]
    fn test_format_transaction_details() {
        let txn = test_txn(TransactionKind::Expense, 5000, "Weekly shop");

        let formatted = format_transaction_details(&txn, &["Groceries".to_string()]);
        assert!(formatted.contains("Weekly shop"));
        assert!(formatted.contains("Groceries"));
        assert!(formatted.contains("Expense"));
    }

    #[test]
    fn test_format_details_uncategorized() {
        let txn = test_txn(TransactionKind::Expense, 100, "");
        let formatted = format_transaction_details(&txn, &[]);
        assert!(formatted.contains("(uncategorized)"));
    }

    #[test]
    fn test_format_totals() {
        let totals = Totals {
            total_income: Money::from_cents(100000),
            total_expense: Money::from_cents(25000),
        };

        let formatted = format_totals(&totals);
        assert!(formatted.contains("$1000.00"));
        assert!(formatted.contains("$250.00"));
        assert!(formatted.contains("$750.00"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Short", 10).trim(), "Short");
        // Note: truncate pads short strings, so we test the truncation behavior
        let result = truncate("A very long string", 10);
        assert!(result.len() <= 10);
        assert!(result.ends_with("..."));
    }
}
