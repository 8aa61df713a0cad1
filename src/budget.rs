//! Compares actual cumulative spend against a budget target.

use crate::schema::Budget;
use crate::utils::round_currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    /// Share of the target already spent, in [0, 1], rounded to 2 places.
    pub fraction: Decimal,
    pub overspent: bool,
}

/// Pure on-demand computation; no state carried between evaluations.
///
/// Spend beyond the target pins the fraction at 1.0 and raises the overspend
/// flag; spending exactly the target is full progress but not an overrun. A
/// non-positive target (kept out by upstream validation, but tolerated here)
/// evaluates to zero progress rather than dividing by it.
pub fn evaluate(budget: &Budget, cumulative_spend: Decimal) -> BudgetProgress {
    if cumulative_spend > budget.target_amount {
        BudgetProgress {
            fraction: Decimal::ONE,
            overspent: true,
        }
    } else if budget.target_amount > Decimal::ZERO {
        BudgetProgress {
            fraction: round_currency(cumulative_spend / budget.target_amount),
            overspent: false,
        }
    } else {
        BudgetProgress {
            fraction: Decimal::ZERO,
            overspent: false,
        }
    }
}
