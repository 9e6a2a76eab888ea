//! Transaction CLI commands
//!
//! Implements CLI commands for recording, querying and editing
//! transactions.

use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use clap::{Args, Subcommand};

use crate::display::transaction::{
    format_totals, format_transaction_details, format_transaction_register,
};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{CategoryId, Money, Transaction, TransactionId, TransactionKind};
use crate::query::{DateFilter, Filter, SortKey};
use crate::services::{AccountService, CategoryService, TransactionService, TransactionUpdate};
use crate::storage::Store;

/// Filter flags shared by `list` and `totals`
#[derive(Args, Default)]
pub struct FilterArgs {
    /// Restrict to an account (name or ID)
    #[arg(short, long)]
    account: Option<String>,

    /// Restrict to income or expense
    #[arg(short, long)]
    kind: Option<String>,

    /// Restrict to a category (name or ID)
    #[arg(short, long)]
    category: Option<String>,

    /// Only today's transactions
    #[arg(long)]
    today: bool,

    /// Only this week's transactions
    #[arg(long)]
    this_week: bool,

    /// Only this month's transactions
    #[arg(long)]
    this_month: bool,

    /// Only this year's transactions
    #[arg(long)]
    this_year: bool,

    /// Start of a date range (YYYY-MM-DD, inclusive)
    #[arg(long)]
    from: Option<String>,

    /// End of a date range (YYYY-MM-DD, inclusive)
    #[arg(long)]
    to: Option<String>,
}

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// income or expense
        kind: String,
        /// Amount (e.g., "12.50")
        amount: String,
        /// Account name or ID; defaults to the selected account
        #[arg(short, long)]
        account: Option<String>,
        /// Transaction date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Category name or ID; repeat for multiple, first is primary
        #[arg(short, long)]
        category: Vec<String>,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List transactions
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Free-text search over description and amount
        #[arg(short, long)]
        search: Option<String>,
        /// Sort order: date-new-first, date-old-first, amount-high-first,
        /// amount-low-first
        #[arg(long, default_value = "date-new-first")]
        sort: String,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (full or shortened)
        id: String,
    },
    /// Edit a transaction; unspecified fields keep their value
    Edit {
        /// Transaction ID (full or shortened)
        id: String,
        /// New kind (income or expense)
        #[arg(long)]
        kind: Option<String>,
        /// New amount
        #[arg(long)]
        amount: Option<String>,
        /// New transaction date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// New category list; repeat for multiple, first is primary
        #[arg(long)]
        category: Vec<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID (full or shortened)
        id: String,
    },
    /// Show income and expense totals
    Totals {
        #[command(flatten)]
        filter: FilterArgs,
        /// Free-text search over description and amount
        #[arg(short, long)]
        search: Option<String>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(store: &Store, cmd: TransactionCommands) -> ExpenseResult<()> {
    let service = TransactionService::new(store);

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            account,
            date,
            category,
            description,
        } => {
            let kind = parse_kind(&kind)?;
            let amount = parse_amount(&amount)?;
            let transaction_date = match date {
                Some(date) => parse_date(&date)?,
                None => Utc::now().date_naive(),
            };

            let account = resolve_account(store, account.as_deref())?;
            let category_ids = resolve_categories(store, &category)?;

            let txn = service.create(
                account.id,
                kind,
                amount,
                transaction_date,
                category_ids,
                &description,
            )?;

            println!("Recorded {} of {} on {}.", txn.kind, txn.amount, account.name);
            println!("  Date: {}", txn.transaction_date.format("%Y-%m-%d"));
            println!("  ID:   {}", txn.id);
        }

        TransactionCommands::List {
            filter,
            search,
            sort,
        } => {
            let filter = build_filter(store, &filter)?;
            let sort = SortKey::parse(&sort);

            let transactions = service.list(filter.as_ref(), sort, search.as_deref())?;
            print!("{}", format_transaction_register(&transactions));
        }

        TransactionCommands::Show { id } => {
            let txn = resolve_transaction(store, &id)?;

            let categories = CategoryService::new(store);
            let mut category_names = Vec::new();
            for category_id in &txn.category_ids {
                if let Some(category) = categories.get(*category_id)? {
                    category_names.push(category.name);
                }
            }

            print!("{}", format_transaction_details(&txn, &category_names));
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            date,
            category,
            description,
        } => {
            let txn = resolve_transaction(store, &id)?;

            let patch = TransactionUpdate {
                kind: kind.as_deref().map(parse_kind).transpose()?,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                transaction_date: date.as_deref().map(parse_date).transpose()?,
                category_ids: if category.is_empty() {
                    None
                } else {
                    Some(resolve_categories(store, &category)?)
                },
                description,
            };

            if patch.is_empty() {
                println!("No changes specified. Use --kind, --amount, --date, --category or --description.");
                return Ok(());
            }

            let updated = service.update(txn.id, patch)?;
            println!("Updated transaction {}.", updated.id);
        }

        TransactionCommands::Delete { id } => {
            let txn = resolve_transaction(store, &id)?;
            service.delete(txn.id)?;
            println!("Deleted transaction {} ({} {}).", txn.id, txn.kind, txn.amount);
        }

        TransactionCommands::Totals { filter, search } => {
            let filter = build_filter(store, &filter)?;
            let totals = service.totals(filter.as_ref(), search.as_deref())?;
            print!("{}", format_totals(&totals));
        }
    }

    Ok(())
}

fn parse_kind(s: &str) -> ExpenseResult<TransactionKind> {
    TransactionKind::parse(s).ok_or_else(|| {
        ExpenseError::Validation(format!(
            "Invalid transaction kind: '{}'. Use 'income' or 'expense'.",
            s
        ))
    })
}

fn parse_amount(s: &str) -> ExpenseResult<Money> {
    let amount = Money::parse(s).map_err(|e| {
        ExpenseError::Validation(format!(
            "Invalid amount: '{}'. Use format like '12.50'. Error: {}",
            s, e
        ))
    })?;

    if amount.is_negative() {
        return Err(ExpenseError::Validation(
            "Amount cannot be negative; the kind carries the direction.".into(),
        ));
    }

    Ok(amount)
}

fn parse_date(s: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| ExpenseError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD.", s)))
}

fn resolve_account(
    store: &Store,
    identifier: Option<&str>,
) -> ExpenseResult<crate::models::Account> {
    let accounts = AccountService::new(store);

    match identifier {
        Some(identifier) => accounts
            .find(identifier)?
            .ok_or_else(|| ExpenseError::account_not_found(identifier)),
        None => accounts.selected()?.ok_or_else(|| {
            ExpenseError::Validation(
                "No account selected. Pass --account or select one with 'expman account select'."
                    .into(),
            )
        }),
    }
}

fn resolve_categories(store: &Store, identifiers: &[String]) -> ExpenseResult<Vec<CategoryId>> {
    let categories = CategoryService::new(store);

    let mut ids = Vec::with_capacity(identifiers.len());
    for identifier in identifiers {
        let category = categories
            .find(identifier)?
            .ok_or_else(|| ExpenseError::category_not_found(identifier.as_str()))?;
        ids.push(category.id);
    }
    Ok(ids)
}

/// Resolve a transaction from a full UUID or a shortened `txn-xxxxxxxx` ID
fn resolve_transaction(store: &Store, identifier: &str) -> ExpenseResult<Transaction> {
    if let Ok(id) = TransactionId::from_str(identifier) {
        if let Some(txn) = store.transactions.get(id)? {
            return Ok(txn);
        }
    }

    let needle = identifier.strip_prefix("txn-").unwrap_or(identifier);
    let matches: Vec<Transaction> = store
        .transactions
        .get_all()?
        .into_iter()
        .filter(|txn| txn.id.as_uuid().to_string().starts_with(needle))
        .collect();

    match matches.len() {
        1 => Ok(matches.into_iter().next().expect("one match")),
        0 => Err(ExpenseError::transaction_not_found(identifier)),
        _ => Err(ExpenseError::Validation(format!(
            "Transaction ID '{}' is ambiguous; use the full ID.",
            identifier
        ))),
    }
}

fn build_filter(store: &Store, args: &FilterArgs) -> ExpenseResult<Option<Filter>> {
    let mut filter = Filter::new();
    let mut any = false;

    if let Some(identifier) = &args.account {
        let account = AccountService::new(store)
            .find(identifier)?
            .ok_or_else(|| ExpenseError::account_not_found(identifier.as_str()))?;
        filter = filter.account(account.id);
        any = true;
    }

    if let Some(kind) = &args.kind {
        filter = filter.kind(parse_kind(kind)?);
        any = true;
    }

    if let Some(identifier) = &args.category {
        let category = CategoryService::new(store)
            .find(identifier)?
            .ok_or_else(|| ExpenseError::category_not_found(identifier.as_str()))?;
        filter = filter.category(category.id);
        any = true;
    }

    let range = match (&args.from, &args.to) {
        (Some(from), Some(to)) => Some((parse_date(from)?, parse_date(to)?)),
        (None, None) => None,
        _ => {
            return Err(ExpenseError::Validation(
                "--from and --to must be given together.".into(),
            ))
        }
    };

    let date = DateFilter {
        is_today: args.today,
        is_this_week: args.this_week,
        is_this_month: args.this_month,
        is_this_year: args.this_year,
        range,
    };
    if date.resolve().is_some() {
        filter = filter.date(date);
        any = true;
    }

    Ok(if any { Some(filter) } else { None })
}
