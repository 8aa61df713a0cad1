use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Negative amount {amount} on transaction dated {occurred_on}")]
    NegativeAmount {
        amount: Decimal,
        occurred_on: NaiveDate,
    },

    #[error("Forecast series for '{label}' is misaligned: expected {expected} entries starting in {expected_start}, got {found} starting in {found_start}")]
    SeriesMisaligned {
        label: String,
        expected: usize,
        expected_start: String,
        found: usize,
        found_start: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
