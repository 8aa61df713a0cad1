//! Derives the average month-over-month change from historical totals.
//!
//! The model is deliberately simple: the arithmetic mean of consecutive
//! absolute deltas, with deltas touching an empty month treated as zero so a
//! single gap does not dominate the estimate. No regression, no compounding.

use crate::aggregate::MonthlyTotals;
use crate::utils::{month_of, shift_months};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Average month-over-month delta across the window, full precision.
///
/// Totals are read in chronological order ending at now's month, wrapping
/// the year boundary. A series of fewer than 2 months has no trend.
pub fn estimate_trend(totals: &MonthlyTotals, now: NaiveDate) -> Decimal {
    let values = chronological_values(totals, now);
    if values.len() < 2 {
        return Decimal::ZERO;
    }

    let mut delta_sum = Decimal::ZERO;
    for pair in values.windows(2) {
        let (previous, current) = (pair[0], pair[1]);
        // A jump from or to an empty month says nothing about spending pace.
        if previous.is_zero() || current.is_zero() {
            continue;
        }
        delta_sum += current - previous;
    }

    delta_sum / Decimal::from(values.len() as u32 - 1)
}

/// Totals ordered oldest-first relative to `now`. Month-of-year keys sort
/// January..December, which is wrong across a year boundary; walking offsets
/// back from now restores true chronology.
fn chronological_values(totals: &MonthlyTotals, now: NaiveDate) -> Vec<Decimal> {
    let mut values = Vec::with_capacity(totals.len());
    for offset in (0..totals.len() as i32).rev() {
        let month = month_of(shift_months(now, -offset));
        if let Some(value) = totals.get(&month) {
            values.push(*value);
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn totals(entries: &[(Month, Decimal)]) -> MonthlyTotals {
        entries.iter().cloned().collect()
    }

    #[test]
    fn test_flat_series_has_zero_trend() {
        let history = totals(&[
            (Month::February, dec!(100)),
            (Month::March, dec!(100)),
            (Month::April, dec!(100)),
            (Month::May, dec!(100)),
        ]);
        assert_eq!(estimate_trend(&history, date(2024, 5, 20)), dec!(0));
    }

    #[test]
    fn test_steady_increase() {
        let history = totals(&[
            (Month::March, dec!(100)),
            (Month::April, dec!(150)),
            (Month::May, dec!(200)),
        ]);
        assert_eq!(estimate_trend(&history, date(2024, 5, 20)), dec!(50));
    }

    #[test]
    fn test_deltas_touching_empty_months_count_as_zero() {
        // 0 -> 100 and 100 -> 0 would both be spurious jumps.
        let history = totals(&[
            (Month::February, dec!(0)),
            (Month::March, dec!(100)),
            (Month::April, dec!(100)),
            (Month::May, dec!(0)),
        ]);
        assert_eq!(estimate_trend(&history, date(2024, 5, 20)), dec!(0));
    }

    #[test]
    fn test_mean_divides_by_pair_count() {
        // Deltas: +30, 0 (empty neighbour), 0 (empty neighbour) over 4 pairs.
        let history = totals(&[
            (Month::January, dec!(60)),
            (Month::February, dec!(90)),
            (Month::March, dec!(0)),
            (Month::April, dec!(50)),
            (Month::May, dec!(50)),
        ]);
        assert_eq!(estimate_trend(&history, date(2024, 5, 20)), dec!(7.5));
    }

    #[test]
    fn test_chronology_wraps_year_boundary() {
        // Window Nov..Feb with now in February: November is oldest even
        // though it sorts last by month-of-year.
        let history = totals(&[
            (Month::November, dec!(100)),
            (Month::December, dec!(200)),
            (Month::January, dec!(300)),
            (Month::February, dec!(400)),
        ]);
        assert_eq!(estimate_trend(&history, date(2024, 2, 10)), dec!(100));
    }

    #[test]
    fn test_declining_series_has_negative_trend() {
        let history = totals(&[
            (Month::April, dec!(200)),
            (Month::May, dec!(140)),
        ]);
        assert_eq!(estimate_trend(&history, date(2024, 5, 20)), dec!(-60));
    }

    #[test]
    fn test_too_short_series_has_no_trend() {
        assert_eq!(estimate_trend(&MonthlyTotals::new(), date(2024, 5, 20)), dec!(0));

        let single = totals(&[(Month::May, dec!(500))]);
        assert_eq!(estimate_trend(&single, date(2024, 5, 20)), dec!(0));
    }
}
