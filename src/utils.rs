use chrono::{Datelike, Month, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary value to 2 decimal places, half-up.
///
/// Applied at every externally visible boundary; intermediate sums keep
/// full precision.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// First day of the calendar month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap()
}

/// First day of the month `months` calendar months away from `date`.
/// Negative offsets walk backwards; year boundaries wrap.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let zero_based = date.year() * 12 + date.month() as i32 - 1 + months;
    let year = zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

/// Number of whole calendar months from `start`'s month to `end`'s month.
/// Negative when `end` falls in an earlier month.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32
}

/// First-of-month dates for every calendar month from `start`'s month
/// through `end`'s month, inclusive. Empty when `end` precedes `start`.
pub fn month_starts_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let last = month_start(end);

    let mut current = month_start(start);
    while current <= last {
        dates.push(current);
        current = shift_months(current, 1);
    }

    dates
}

/// Month-of-year of `date`.
pub fn month_of(date: NaiveDate) -> Month {
    Month::try_from(date.month() as u8).expect("calendar month is always 1-12")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_currency_half_up() {
        assert_eq!(round_currency(dec!(2.345)), dec!(2.35));
        assert_eq!(round_currency(dec!(2.344)), dec!(2.34));
        assert_eq!(round_currency(dec!(-2.345)), dec!(-2.35));
        assert_eq!(round_currency(dec!(100)), dec!(100));
    }

    #[test]
    fn test_shift_months_wraps_years() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 15).unwrap();
        assert_eq!(
            shift_months(date, 2),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            shift_months(date, -11),
            NaiveDate::from_ymd_opt(2022, 12, 1).unwrap()
        );
        assert_eq!(
            shift_months(date, 0),
            NaiveDate::from_ymd_opt(2023, 11, 1).unwrap()
        );
    }

    #[test]
    fn test_months_between() {
        let jan = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        let apr = NaiveDate::from_ymd_opt(2023, 4, 1).unwrap();
        assert_eq!(months_between(jan, apr), 3);
        assert_eq!(months_between(apr, jan), -3);

        let dec = NaiveDate::from_ymd_opt(2022, 12, 5).unwrap();
        assert_eq!(months_between(dec, jan), 1);
    }

    #[test]
    fn test_month_starts_between() {
        let start = NaiveDate::from_ymd_opt(2023, 11, 20).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 2, 3).unwrap();
        let months = month_starts_between(start, end);
        assert_eq!(
            months,
            vec![
                NaiveDate::from_ymd_opt(2023, 11, 1).unwrap(),
                NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            ]
        );

        assert!(month_starts_between(end, start).is_empty());
    }

    #[test]
    fn test_month_of() {
        let date = NaiveDate::from_ymd_opt(2023, 7, 14).unwrap();
        assert_eq!(month_of(date), Month::July);
    }
}
