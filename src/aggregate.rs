//! Folds the transaction log into calendar-month totals over a historical
//! window, with recurring entries propagated into every month they cover.

use crate::recurrence::{applicable_months, monthly_equivalent};
use crate::schema::{CategoryFilter, Transaction};
use crate::utils::{month_of, month_starts_between, shift_months};
use chrono::{Month, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Month-of-year keyed totals. Every month of the requested window is
/// present, zero-defaulted, even when no transaction falls in it.
pub type MonthlyTotals = BTreeMap<Month, Decimal>;

/// Widest window that keeps month-of-year keys unambiguous: the current
/// month plus eleven of lookback.
pub const MAX_WINDOW_MONTHS: u32 = 11;

pub struct MonthlyAggregator {
    window_months: u32,
    now: NaiveDate,
}

impl MonthlyAggregator {
    /// Windows wider than [`MAX_WINDOW_MONTHS`] are truncated so that no two
    /// buckets share a month-of-year key.
    pub fn new(window_months: u32, now: NaiveDate) -> Self {
        Self {
            window_months: window_months.min(MAX_WINDOW_MONTHS),
            now,
        }
    }

    /// Totals per calendar month from (now − window) through now, inclusive.
    ///
    /// Each matching transaction adds its monthly-equivalent amount to every
    /// applicable month that falls inside the window. An empty transaction
    /// list yields all-zero buckets.
    pub fn aggregate(
        &self,
        transactions: &[Transaction],
        filter: Option<&CategoryFilter>,
    ) -> MonthlyTotals {
        let span_start = shift_months(self.now, -(self.window_months as i32));

        let mut totals = MonthlyTotals::new();
        for month in month_starts_between(span_start, self.now) {
            totals.insert(month_of(month), Decimal::ZERO);
        }

        for transaction in transactions {
            if let Some(filter) = filter {
                if !filter.matches(transaction) {
                    continue;
                }
            }

            let per_month = monthly_equivalent(transaction.amount, transaction.frequency);
            for month in applicable_months(transaction.occurred_on, transaction.frequency, self.now)
            {
                if month < span_start {
                    continue;
                }
                if let Some(bucket) = totals.get_mut(&month_of(month)) {
                    *bucket += per_month;
                }
            }
        }

        totals
    }

    /// Cumulative spend to date for a partition: the sum of every monthly
    /// bucket in the window, recurrence included. Feeds budget progress.
    pub fn cumulative(
        &self,
        transactions: &[Transaction],
        filter: Option<&CategoryFilter>,
    ) -> Decimal {
        self.aggregate(transactions, filter).values().copied().sum()
    }
}
