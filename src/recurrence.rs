//! Converts a single transaction into its monthly-equivalent amount and the
//! calendar months it contributes to.
//!
//! A recurring transaction is assumed to still be active in every month from
//! its start month up to "now"; a one-off is confined to its own month.

use crate::schema::PaymentFrequency;
use crate::utils::{month_start, month_starts_between};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Amount the transaction contributes to each applicable month.
///
/// Weekly entries pay ~4 times a month, biweekly twice; one-offs and monthly
/// entries contribute their face amount.
pub fn monthly_equivalent(amount: Decimal, frequency: PaymentFrequency) -> Decimal {
    match frequency {
        PaymentFrequency::OneOff | PaymentFrequency::Monthly => amount,
        PaymentFrequency::Weekly => amount * dec!(4),
        PaymentFrequency::Biweekly => amount * dec!(2),
    }
}

/// First-of-month dates of every calendar month this transaction applies to,
/// relative to `now`.
///
/// Returns an empty list when `occurred_on` is after `now`; that should not
/// happen with clean input but must not panic.
pub fn applicable_months(
    occurred_on: NaiveDate,
    frequency: PaymentFrequency,
    now: NaiveDate,
) -> Vec<NaiveDate> {
    let first = month_start(occurred_on);
    let current = month_start(now);

    if first > current {
        return Vec::new();
    }

    match frequency {
        PaymentFrequency::OneOff => vec![first],
        PaymentFrequency::Weekly | PaymentFrequency::Biweekly | PaymentFrequency::Monthly => {
            month_starts_between(first, current)
        }
    }
}
