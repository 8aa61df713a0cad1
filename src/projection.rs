//! Extrapolates 12 future monthly totals from the current month's actual and
//! the estimated trend.

use crate::aggregate::MonthlyTotals;
use crate::utils::{month_of, round_currency, shift_months};
use chrono::{Month, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Length of every forecast: the rolling "next month .. +12" window.
pub const FORECAST_HORIZON_MONTHS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub month: Month,
    /// Projected total for the month; never negative, rounded to 2 places.
    pub amount: Decimal,
}

/// Exactly 12 projected months in rolling order, starting the month after
/// "now" and wrapping December into January.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub(crate) fn from_points(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Month the series starts in: the month after the "now" it was built
    /// against. `None` only for an empty series, which [`project`] never
    /// produces but deserialization can.
    pub fn starting_month(&self) -> Option<Month> {
        self.points.first().map(|p| p.month)
    }

    pub fn amount_for(&self, month: Month) -> Option<Decimal> {
        self.points
            .iter()
            .find(|p| p.month == month)
            .map(|p| p.amount)
    }

    pub fn amounts(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.points.iter().map(|p| p.amount)
    }
}

/// Straight-line extrapolation from the current month's total.
///
/// Entry i is `seed + trend * i`, clamped at zero: each future offset is a
/// fixed multiple of the single trend value, not a compounding step. A
/// missing "now" bucket seeds at zero rather than failing.
pub fn project(totals: &MonthlyTotals, trend: Decimal, now: NaiveDate) -> ForecastSeries {
    let seed = totals
        .get(&month_of(now))
        .copied()
        .unwrap_or(Decimal::ZERO);
    // The trend enters projection at presentation precision.
    let trend = round_currency(trend);

    let mut points = Vec::with_capacity(FORECAST_HORIZON_MONTHS);
    for offset in 1..=FORECAST_HORIZON_MONTHS {
        let raw = seed + trend * Decimal::from(offset as u32);
        points.push(ForecastPoint {
            month: month_of(shift_months(now, offset as i32)),
            amount: round_currency(raw.max(Decimal::ZERO)),
        });
    }

    ForecastSeries { points }
}
