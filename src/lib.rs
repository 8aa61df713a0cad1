//! # Cashflow Forecaster
//!
//! A library for turning a raw, irregularly-dated, frequency-tagged
//! transaction log into calendar-month totals, rolling 12-month forecasts
//! per spending category, a projected net cashflow, and budget progress
//! signals.
//!
//! ## Core Concepts
//!
//! - **Monthly-equivalent amount**: a recurring transaction's amount scaled
//!   to its per-month contribution (weekly x4, biweekly x2, monthly x1)
//! - **Recurrence propagation**: a recurring transaction is counted in every
//!   calendar month from its start month through the current one
//! - **Rolling window**: every forecast covers the 12 months after "now",
//!   wrapping December into January
//! - **Budget partition**: expense totals are split by budget name, with a
//!   "no-budget" bucket for uncategorized spending
//!
//! The engine is pure and stateless: "now" is always an explicit parameter,
//! every call recomputes from the full snapshot, and nothing is shared
//! between calls.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cashflow_forecaster::*;
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let snapshot = ForecastSnapshot {
//!     lookback_months: 3,
//!     transactions: vec![
//!         Transaction {
//!             amount: dec!(120),
//!             occurred_on: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
//!             frequency: PaymentFrequency::Monthly,
//!             category: Some("Groceries".to_string()),
//!             kind: TransactionKind::Expense,
//!         },
//!         Transaction {
//!             amount: dec!(2000),
//!             occurred_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!             frequency: PaymentFrequency::Monthly,
//!             category: None,
//!             kind: TransactionKind::Income,
//!         },
//!     ],
//!     budgets: vec![Budget {
//!         name: "Groceries".to_string(),
//!         target_amount: dec!(600),
//!     }],
//! };
//!
//! let now = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
//! let report = generate_forecast(&snapshot, now).unwrap();
//! ```

pub mod aggregate;
pub mod budget;
pub mod cashflow;
pub mod error;
pub mod projection;
pub mod recurrence;
pub mod schema;
pub mod trend;
pub mod utils;

pub use aggregate::{MonthlyAggregator, MonthlyTotals, MAX_WINDOW_MONTHS};
pub use budget::{evaluate, BudgetProgress};
pub use cashflow::{compose_cashflow, monthly_income_equivalent, CashflowForecast, NetPoint};
pub use error::{ForecastError, Result};
pub use projection::{project, ForecastPoint, ForecastSeries, FORECAST_HORIZON_MONTHS};
pub use recurrence::{applicable_months, monthly_equivalent};
pub use schema::{
    Budget, CategoryFilter, ForecastSnapshot, PaymentFrequency, Transaction, TransactionKind,
    UNBUDGETED_LABEL,
};
pub use trend::estimate_trend;
pub use utils::round_currency;

use chrono::NaiveDate;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utils::{month_of, month_start};

/// Everything the presentation layer needs, computed in one pass from a
/// snapshot. Series maps are keyed by category label, with uncategorized
/// spending collapsed under [`UNBUDGETED_LABEL`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub category_history: BTreeMap<String, MonthlyTotals>,
    pub category_forecasts: BTreeMap<String, ForecastSeries>,
    pub cashflow: CashflowForecast,
    pub budget_progress: BTreeMap<String, BudgetProgress>,
    pub current_month_expense_total: Decimal,
    pub current_month_income_total: Decimal,
}

pub struct ForecastEngine;

impl ForecastEngine {
    pub fn run(snapshot: &ForecastSnapshot, now: NaiveDate) -> Result<ForecastReport> {
        validate_snapshot(snapshot)?;

        info!(
            "Building forecast from {} transactions across {} budgets ({} months of history)",
            snapshot.transactions.len(),
            snapshot.budgets.len(),
            snapshot.lookback_months
        );

        let aggregator = MonthlyAggregator::new(snapshot.lookback_months, now);

        let mut category_history = BTreeMap::new();
        let mut category_forecasts = BTreeMap::new();
        let mut series = Vec::new();
        for filter in category_partition(snapshot) {
            let label = filter.label().to_string();
            let totals = aggregator.aggregate(&snapshot.transactions, Some(&filter));
            let trend = estimate_trend(&totals, now);
            debug!("Category '{}': trend {} per month", label, trend);

            let forecast = project(&totals, trend, now);
            series.push(forecast.clone());
            category_history.insert(label.clone(), totals);
            category_forecasts.insert(label, forecast);
        }

        let cashflow = compose_cashflow(&series, &snapshot.transactions, now)?;

        let mut budget_progress = BTreeMap::new();
        for budget in &snapshot.budgets {
            if budget.target_amount <= Decimal::ZERO {
                warn!(
                    "Budget '{}' has non-positive target {}; progress pinned at zero",
                    budget.name, budget.target_amount
                );
            }
            let spend = aggregator.cumulative(
                &snapshot.transactions,
                Some(&CategoryFilter::Named(budget.name.clone())),
            );
            budget_progress.insert(budget.name.clone(), evaluate(budget, spend));
        }

        Ok(ForecastReport {
            category_history,
            category_forecasts,
            cashflow,
            budget_progress,
            current_month_expense_total: current_month_total(
                &snapshot.transactions,
                TransactionKind::Expense,
                now,
            ),
            current_month_income_total: current_month_total(
                &snapshot.transactions,
                TransactionKind::Income,
                now,
            ),
        })
    }
}

pub fn generate_forecast(snapshot: &ForecastSnapshot, now: NaiveDate) -> Result<ForecastReport> {
    ForecastEngine::run(snapshot, now)
}

fn validate_snapshot(snapshot: &ForecastSnapshot) -> Result<()> {
    for transaction in &snapshot.transactions {
        if transaction.amount.is_sign_negative() {
            return Err(ForecastError::NegativeAmount {
                amount: transaction.amount,
                occurred_on: transaction.occurred_on,
            });
        }
    }
    Ok(())
}

/// One filter per budget name, one per orphan expense category (spending
/// whose label matches no budget), plus the unbudgeted catch-all.
fn category_partition(snapshot: &ForecastSnapshot) -> Vec<CategoryFilter> {
    let mut seen: Vec<String> = Vec::new();
    let mut filters = Vec::new();

    for budget in &snapshot.budgets {
        if seen.iter().any(|s| s.eq_ignore_ascii_case(&budget.name)) {
            continue;
        }
        seen.push(budget.name.clone());
        filters.push(CategoryFilter::Named(budget.name.clone()));
    }

    for transaction in &snapshot.transactions {
        if !transaction.is_expense() {
            continue;
        }
        if let Some(category) = &transaction.category {
            if seen.iter().any(|s| s.eq_ignore_ascii_case(category)) {
                continue;
            }
            seen.push(category.clone());
            filters.push(CategoryFilter::Named(category.clone()));
        }
    }

    filters.push(CategoryFilter::Unbudgeted);
    filters
}

/// Face-amount total of transactions dated in now's calendar month; the
/// dashboard's "this month so far" figure.
fn current_month_total(
    transactions: &[Transaction],
    kind: TransactionKind,
    now: NaiveDate,
) -> Decimal {
    let total = transactions
        .iter()
        .filter(|t| t.kind == kind && month_start(t.occurred_on) == month_start(now))
        .map(|t| t.amount)
        .sum();
    round_currency(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn transaction(
        amount: Decimal,
        occurred_on: NaiveDate,
        frequency: PaymentFrequency,
        category: Option<&str>,
        kind: TransactionKind,
    ) -> Transaction {
        Transaction {
            amount,
            occurred_on,
            frequency,
            category: category.map(str::to_string),
            kind,
        }
    }

    #[test]
    fn test_end_to_end_report() {
        let now = date(2024, 5, 20);
        let snapshot = ForecastSnapshot {
            lookback_months: 3,
            transactions: vec![
                transaction(
                    dec!(200),
                    date(2024, 2, 3),
                    PaymentFrequency::Monthly,
                    Some("Groceries"),
                    TransactionKind::Expense,
                ),
                transaction(
                    dec!(50),
                    date(2024, 3, 12),
                    PaymentFrequency::Monthly,
                    None,
                    TransactionKind::Expense,
                ),
                transaction(
                    dec!(2000),
                    date(2024, 1, 1),
                    PaymentFrequency::Monthly,
                    None,
                    TransactionKind::Income,
                ),
            ],
            budgets: vec![Budget {
                name: "Groceries".to_string(),
                target_amount: dec!(1000),
            }],
        };

        let report = generate_forecast(&snapshot, now).unwrap();

        assert!(report.category_history.contains_key("Groceries"));
        assert!(report.category_history.contains_key(UNBUDGETED_LABEL));

        // Flat history in both categories: constant forecasts.
        let groceries = &report.category_forecasts["Groceries"];
        assert!(groceries.amounts().all(|a| a == dec!(200)));
        assert_eq!(groceries.starting_month(), Some(Month::June));

        let unbudgeted = &report.category_forecasts[UNBUDGETED_LABEL];
        assert!(unbudgeted.amounts().all(|a| a == dec!(50)));

        assert_eq!(report.cashflow.monthly_income, dec!(2000));
        assert!(report.cashflow.net.iter().all(|p| p.amount == dec!(1750)));

        // The monthly Groceries entry filled 4 window buckets of 200 each.
        let progress = &report.budget_progress["Groceries"];
        assert_eq!(progress.fraction, dec!(0.80));
        assert!(!progress.overspent);
    }

    #[test]
    fn test_empty_snapshot_degrades_to_zero_report() {
        let snapshot = ForecastSnapshot {
            lookback_months: 6,
            transactions: vec![],
            budgets: vec![],
        };

        let report = generate_forecast(&snapshot, date(2024, 5, 20)).unwrap();

        assert_eq!(report.category_history.len(), 1);
        let totals = &report.category_history[UNBUDGETED_LABEL];
        assert_eq!(totals.len(), 7);
        assert!(totals.values().all(Decimal::is_zero));

        assert!(report.cashflow.total_expenses.amounts().all(|a| a == dec!(0)));
        assert!(report.cashflow.net.iter().all(|p| p.amount == dec!(0)));
        assert_eq!(report.current_month_expense_total, dec!(0));
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let snapshot = ForecastSnapshot {
            lookback_months: 3,
            transactions: vec![transaction(
                dec!(-5),
                date(2024, 5, 1),
                PaymentFrequency::OneOff,
                None,
                TransactionKind::Expense,
            )],
            budgets: vec![],
        };

        let result = generate_forecast(&snapshot, date(2024, 5, 20));
        assert!(matches!(result, Err(ForecastError::NegativeAmount { .. })));
    }

    #[test]
    fn test_orphan_category_gets_its_own_partition() {
        let snapshot = ForecastSnapshot {
            lookback_months: 2,
            transactions: vec![transaction(
                dec!(80),
                date(2024, 5, 2),
                PaymentFrequency::OneOff,
                Some("Hobbies"),
                TransactionKind::Expense,
            )],
            budgets: vec![],
        };

        let report = generate_forecast(&snapshot, date(2024, 5, 20)).unwrap();
        assert!(report.category_forecasts.contains_key("Hobbies"));
        assert!(report.category_forecasts.contains_key(UNBUDGETED_LABEL));
        assert!(report.budget_progress.is_empty());
    }

    #[test]
    fn test_current_month_totals_use_face_amounts() {
        let now = date(2024, 5, 20);
        let snapshot = ForecastSnapshot {
            lookback_months: 2,
            transactions: vec![
                transaction(
                    dec!(20),
                    date(2024, 5, 1),
                    PaymentFrequency::Weekly,
                    None,
                    TransactionKind::Expense,
                ),
                transaction(
                    dec!(300),
                    date(2024, 4, 28),
                    PaymentFrequency::OneOff,
                    None,
                    TransactionKind::Expense,
                ),
                transaction(
                    dec!(900),
                    date(2024, 5, 15),
                    PaymentFrequency::Monthly,
                    None,
                    TransactionKind::Income,
                ),
            ],
            budgets: vec![],
        };

        let report = generate_forecast(&snapshot, now).unwrap();
        assert_eq!(report.current_month_expense_total, dec!(20));
        assert_eq!(report.current_month_income_total, dec!(900));
    }
}
