//! Combines per-category expense forecasts with normalized income into a
//! projected net cashflow per future month.

use crate::error::{ForecastError, Result};
use crate::projection::{ForecastPoint, ForecastSeries, FORECAST_HORIZON_MONTHS};
use crate::recurrence::monthly_equivalent;
use crate::schema::Transaction;
use crate::utils::{month_of, round_currency, shift_months};
use chrono::{Month, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetPoint {
    pub month: Month,
    /// Income minus projected expense; negative means a projected deficit.
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowForecast {
    /// Monthly-equivalent total across all income transactions.
    pub monthly_income: Decimal,
    /// Columnwise sum of every category's projected expenses.
    pub total_expenses: ForecastSeries,
    /// `monthly_income − total_expenses`, month by month.
    pub net: Vec<NetPoint>,
}

/// Sum of monthly-equivalent amounts over all income transactions.
///
/// One-off income counts flat in every projected month: the composition
/// mirrors the single historical income total, not a per-month recompute.
pub fn monthly_income_equivalent(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| monthly_equivalent(t.amount, t.frequency))
        .sum()
}

/// Builds the combined projection for the 12 months after `now`.
///
/// All category series must cover the same rolling window; a mismatched
/// series is an input error rather than something to silently realign.
pub fn compose_cashflow(
    category_series: &[ForecastSeries],
    transactions: &[Transaction],
    now: NaiveDate,
) -> Result<CashflowForecast> {
    let months: Vec<Month> = (1..=FORECAST_HORIZON_MONTHS)
        .map(|offset| month_of(shift_months(now, offset as i32)))
        .collect();

    for (index, series) in category_series.iter().enumerate() {
        let aligned = series.points().len() == months.len()
            && series
                .points()
                .iter()
                .zip(&months)
                .all(|(point, month)| point.month == *month);
        if !aligned {
            return Err(ForecastError::SeriesMisaligned {
                label: format!("category #{index}"),
                expected: months.len(),
                expected_start: months[0].name().to_string(),
                found: series.points().len(),
                found_start: series
                    .points()
                    .first()
                    .map(|p| p.month.name().to_string())
                    .unwrap_or_else(|| "none".to_string()),
            });
        }
    }

    let monthly_income = round_currency(monthly_income_equivalent(transactions));

    let mut expense_points = Vec::with_capacity(months.len());
    let mut net = Vec::with_capacity(months.len());
    for (index, month) in months.iter().enumerate() {
        let total: Decimal = category_series
            .iter()
            .map(|series| series.points()[index].amount)
            .sum();
        expense_points.push(ForecastPoint {
            month: *month,
            amount: total,
        });
        net.push(NetPoint {
            month: *month,
            amount: monthly_income - total,
        });
    }

    Ok(CashflowForecast {
        monthly_income,
        total_expenses: ForecastSeries::from_points(expense_points),
        net,
    })
}
