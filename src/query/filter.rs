//! Filter predicates for transaction queries
//!
//! Each predicate tests a single transaction against one filter criterion.
//! An absent criterion matches everything, so an empty filter passes all
//! transactions through. Predicates are pure and never fail.

use chrono::{Datelike, NaiveDate};

use crate::models::{AccountId, CategoryId, Transaction, TransactionKind};

/// The date mode a [`DateFilter`] resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilterMode {
    Today,
    ThisWeek,
    ThisMonth,
    ThisYear,
    Range(NaiveDate, NaiveDate),
}

/// Date criterion with a fixed mode priority
///
/// Multiple flags can be set at once; the first truthy one wins, in the
/// order today > week > month > year > range. A filter with no flags and
/// no range matches every date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateFilter {
    pub is_today: bool,
    pub is_this_week: bool,
    pub is_this_month: bool,
    pub is_this_year: bool,
    /// Inclusive on both ends
    pub range: Option<(NaiveDate, NaiveDate)>,
}

impl DateFilter {
    /// Resolve the active mode according to the flag priority
    pub fn resolve(&self) -> Option<DateFilterMode> {
        if self.is_today {
            Some(DateFilterMode::Today)
        } else if self.is_this_week {
            Some(DateFilterMode::ThisWeek)
        } else if self.is_this_month {
            Some(DateFilterMode::ThisMonth)
        } else if self.is_this_year {
            Some(DateFilterMode::ThisYear)
        } else if let Some((start, end)) = self.range {
            Some(DateFilterMode::Range(start, end))
        } else {
            None
        }
    }

    /// Check whether a date matches this filter, relative to a reference date
    ///
    /// The reference date is "today" for the calendar modes. "This week"
    /// is the ISO week containing the reference date.
    pub fn matches(&self, date: NaiveDate, reference: NaiveDate) -> bool {
        match self.resolve() {
            None => true,
            Some(DateFilterMode::Today) => date == reference,
            Some(DateFilterMode::ThisWeek) => date.iso_week() == reference.iso_week(),
            Some(DateFilterMode::ThisMonth) => {
                date.year() == reference.year() && date.month() == reference.month()
            }
            Some(DateFilterMode::ThisYear) => date.year() == reference.year(),
            Some(DateFilterMode::Range(start, end)) => start <= date && date <= end,
        }
    }
}

/// Filter criteria for transaction queries
///
/// All criteria are optional; the filter is the logical AND of the set
/// criteria. `Filter::default()` matches every transaction.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    /// Restrict to a single account
    pub account_id: Option<AccountId>,
    /// Restrict to income or expense
    pub kind: Option<TransactionKind>,
    /// Restrict to transactions carrying this category
    pub category_id: Option<CategoryId>,
    /// Restrict by date
    pub date: Option<DateFilter>,
}

impl Filter {
    /// Create an empty filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a single account
    pub fn account(mut self, id: AccountId) -> Self {
        self.account_id = Some(id);
        self
    }

    /// Restrict to income or expense
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restrict to transactions carrying this category
    pub fn category(mut self, id: CategoryId) -> Self {
        self.category_id = Some(id);
        self
    }

    /// Restrict by date
    pub fn date(mut self, date: DateFilter) -> Self {
        self.date = Some(date);
        self
    }

    /// Check if a transaction matches this filter
    ///
    /// The reference date anchors the calendar date modes.
    pub fn matches(&self, txn: &Transaction, reference: NaiveDate) -> bool {
        // Account filter
        if let Some(account_id) = self.account_id {
            if txn.account_id != account_id {
                return false;
            }
        }

        // Kind filter
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }

        // Category filter
        if let Some(category_id) = self.category_id {
            if !txn.category_ids.contains(&category_id) {
                return false;
            }
        }

        // Date filter
        if let Some(ref date) = self.date {
            if !date.matches(txn.transaction_date, reference) {
                return false;
            }
        }

        true
    }
}

/// Free-text search predicate
///
/// A blank search string matches everything. Otherwise the text must be a
/// case-insensitive substring of the transaction's formatted amount or of
/// its description. An empty description never matches.
pub fn search_matches(txn: &Transaction, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    if txn.amount.to_string().to_lowercase().contains(&needle) {
        return true;
    }

    !txn.description.is_empty() && txn.description.to_lowercase().contains(&needle)
}
