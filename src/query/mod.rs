//! Query engine for transactions
//!
//! Composes the filter predicates with a sort comparator to produce an
//! ordered, filtered view of a transaction list, and computes income and
//! expense totals over a transaction set.

pub mod filter;

pub use filter::{search_matches, DateFilter, DateFilterMode, Filter};

use chrono::{NaiveDate, Utc};

use crate::models::{Money, Transaction, TransactionKind};

/// Sort order for query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recent transaction date first (the default)
    #[default]
    DateNewFirst,
    /// Oldest transaction date first
    DateOldFirst,
    /// Largest amount first
    AmountHighFirst,
    /// Smallest amount first
    AmountLowFirst,
}

impl SortKey {
    /// Parse a sort key from its string form
    ///
    /// Unknown strings fall back to [`SortKey::DateNewFirst`] rather than
    /// failing, so a stale preference never breaks a query.
    pub fn parse(s: &str) -> Self {
        match s {
            "date-old-first" => SortKey::DateOldFirst,
            "amount-high-first" => SortKey::AmountHighFirst,
            "amount-low-first" => SortKey::AmountLowFirst,
            _ => SortKey::DateNewFirst,
        }
    }

    /// The string form accepted by [`SortKey::parse`]
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateNewFirst => "date-new-first",
            SortKey::DateOldFirst => "date-old-first",
            SortKey::AmountHighFirst => "amount-high-first",
            SortKey::AmountLowFirst => "amount-low-first",
        }
    }
}

/// Income and expense totals over a transaction set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub total_income: Money,
    pub total_expense: Money,
}

/// Filter, search and sort a transaction list
///
/// Consumes the input vector and returns it filtered and reordered.
/// Calendar date filters are anchored to today's date; use [`query_at`]
/// when the reference date must be explicit.
pub fn query(
    transactions: Vec<Transaction>,
    filter: Option<&Filter>,
    sort: SortKey,
    search: Option<&str>,
) -> Vec<Transaction> {
    query_at(transactions, filter, sort, search, Utc::now().date_naive())
}

/// Filter, search and sort a transaction list against an explicit reference date
pub fn query_at(
    mut transactions: Vec<Transaction>,
    filter: Option<&Filter>,
    sort: SortKey,
    search: Option<&str>,
    reference: NaiveDate,
) -> Vec<Transaction> {
    if let Some(filter) = filter {
        transactions.retain(|txn| filter.matches(txn, reference));
    }

    if let Some(search) = search {
        if !search.trim().is_empty() {
            transactions.retain(|txn| search_matches(txn, search));
        }
    }

    // Ties keep no particular order
    match sort {
        SortKey::DateNewFirst => {
            transactions.sort_unstable_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
        }
        SortKey::DateOldFirst => {
            transactions.sort_unstable_by(|a, b| a.transaction_date.cmp(&b.transaction_date));
        }
        SortKey::AmountHighFirst => {
            transactions.sort_unstable_by(|a, b| b.amount.cmp(&a.amount));
        }
        SortKey::AmountLowFirst => {
            transactions.sort_unstable_by(|a, b| a.amount.cmp(&b.amount));
        }
    }

    transactions
}

/// Sum income and expense amounts over a transaction set
pub fn aggregate(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();

    for txn in transactions {
        match txn.kind {
            TransactionKind::Income => totals.total_income += txn.amount,
            TransactionKind::Expense => totals.total_expense += txn.amount,
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, CategoryId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(
        account_id: AccountId,
        kind: TransactionKind,
        cents: i64,
        on: NaiveDate,
        description: &str,
    ) -> Transaction {
        Transaction::with_details(
            account_id,
            kind,
            Money::from_cents(cents),
            on,
            vec![CategoryId::new()],
            description,
        )
    }

    fn sample_set() -> Vec<Transaction> {
        let account = AccountId::new();
        vec![
            txn(account, TransactionKind::Expense, 500, date(2025, 1, 10), "Lunch"),
            txn(account, TransactionKind::Income, 250_000, date(2025, 1, 1), "Salary"),
            txn(account, TransactionKind::Expense, 9_999, date(2025, 1, 20), "Shoes"),
        ]
    }

    #[test]
    fn test_sort_key_parse_and_fallback() {
        assert_eq!(SortKey::parse("date-old-first"), SortKey::DateOldFirst);
        assert_eq!(SortKey::parse("amount-high-first"), SortKey::AmountHighFirst);
        assert_eq!(SortKey::parse("amount-low-first"), SortKey::AmountLowFirst);
        assert_eq!(SortKey::parse("date-new-first"), SortKey::DateNewFirst);
        assert_eq!(SortKey::parse("nonsense"), SortKey::DateNewFirst);
        assert_eq!(SortKey::parse(""), SortKey::DateNewFirst);
    }

    #[test]
    fn test_query_returns_subset() {
        let set = sample_set();
        let account = set[0].account_id;
        let input_ids: Vec<_> = set.iter().map(|t| t.id).collect();

        let filter = Filter::new().kind(TransactionKind::Expense);
        let result = query_at(set, Some(&filter), SortKey::default(), None, date(2025, 1, 31));

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|t| input_ids.contains(&t.id)));
        assert!(result.iter().all(|t| t.account_id == account));
    }

    #[test]
    fn test_query_sorts_date_new_first() {
        let result = query_at(
            sample_set(),
            None,
            SortKey::DateNewFirst,
            None,
            date(2025, 1, 31),
        );

        let dates: Vec<_> = result.iter().map(|t| t.transaction_date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 1, 20), date(2025, 1, 10), date(2025, 1, 1)]
        );
    }

    #[test]
    fn test_query_sorts_date_old_first() {
        let result = query_at(
            sample_set(),
            None,
            SortKey::DateOldFirst,
            None,
            date(2025, 1, 31),
        );

        let dates: Vec<_> = result.iter().map(|t| t.transaction_date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 1, 1), date(2025, 1, 10), date(2025, 1, 20)]
        );
    }

    #[test]
    fn test_query_sorts_by_amount() {
        let high = query_at(
            sample_set(),
            None,
            SortKey::AmountHighFirst,
            None,
            date(2025, 1, 31),
        );
        let amounts: Vec<_> = high.iter().map(|t| t.amount.cents()).collect();
        assert_eq!(amounts, vec![250_000, 9_999, 500]);

        let low = query_at(
            sample_set(),
            None,
            SortKey::AmountLowFirst,
            None,
            date(2025, 1, 31),
        );
        let amounts: Vec<_> = low.iter().map(|t| t.amount.cents()).collect();
        assert_eq!(amounts, vec![500, 9_999, 250_000]);
    }

    #[test]
    fn test_query_applies_search() {
        let result = query_at(
            sample_set(),
            None,
            SortKey::default(),
            Some("salary"),
            date(2025, 1, 31),
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].description, "Salary");
    }

    #[test]
    fn test_query_blank_search_keeps_everything() {
        let result = query_at(
            sample_set(),
            None,
            SortKey::default(),
            Some("  "),
            date(2025, 1, 31),
        );
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_query_filter_and_search_compose() {
        let filter = Filter::new().kind(TransactionKind::Expense);
        let result = query_at(
            sample_set(),
            Some(&filter),
            SortKey::default(),
            Some("shoes"),
            date(2025, 1, 31),
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].description, "Shoes");
    }

    #[test]
    fn test_aggregate_totals() {
        let totals = aggregate(&sample_set());
        assert_eq!(totals.total_income, Money::from_cents(250_000));
        assert_eq!(totals.total_expense, Money::from_cents(10_499));
    }

    #[test]
    fn test_aggregate_empty_set() {
        let totals = aggregate(&[]);
        assert_eq!(totals.total_income, Money::zero());
        assert_eq!(totals.total_expense, Money::zero());
    }
}
