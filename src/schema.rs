use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Report key for expenses that carry no budget category.
///
/// The engine models "no category" as `None` / [`CategoryFilter::Unbudgeted`];
/// this sentinel only appears where series are keyed by display label.
pub const UNBUDGETED_LABEL: &str = "no-budget";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum PaymentFrequency {
    #[schemars(description = "A single payment that applies only to the calendar month it occurred in")]
    OneOff,

    #[schemars(
        description = "Paid every week; contributes 4x its amount to each month from its start month through the current month"
    )]
    Weekly,

    #[schemars(
        description = "Paid every two weeks; contributes 2x its amount to each month from its start month through the current month"
    )]
    Biweekly,

    #[schemars(
        description = "Paid once a month; contributes its amount to each month from its start month through the current month"
    )]
    Monthly,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum TransactionKind {
    #[schemars(description = "Money leaving the account; may reference a budget category by name")]
    Expense,

    #[schemars(description = "Money entering the account; never categorized")]
    Income,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Transaction {
    #[schemars(with = "String")]
    #[schemars(description = "Non-negative monetary amount per occurrence, as a decimal string")]
    pub amount: Decimal,

    #[schemars(description = "Date the transaction occurred (or started, for recurring entries), YYYY-MM-DD")]
    pub occurred_on: NaiveDate,

    #[schemars(description = "How often the transaction repeats")]
    pub frequency: PaymentFrequency,

    #[serde(default)]
    #[schemars(
        description = "Budget category name for expenses, matched case-insensitively. Omit for uncategorized expenses and for income."
    )]
    pub category: Option<String>,

    #[schemars(description = "Whether this is an expense or an income")]
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Budget {
    #[schemars(description = "Display name of the budget; doubles as the expense category key")]
    pub name: String,

    #[schemars(with = "String")]
    #[schemars(description = "Positive spending target for the budget, as a decimal string")]
    pub target_amount: Decimal,
}

/// Full input snapshot the engine consumes: the materialized transaction log,
/// the budgets to evaluate, and how many months of history to aggregate.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ForecastSnapshot {
    #[schemars(
        description = "Number of historical months (before the current one) to fold into monthly totals"
    )]
    pub lookback_months: u32,

    #[schemars(description = "All transactions for the user, expenses and incomes alike")]
    pub transactions: Vec<Transaction>,

    #[schemars(description = "Budgets whose progress should be evaluated")]
    pub budgets: Vec<Budget>,
}

impl ForecastSnapshot {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ForecastSnapshot)
    }

    pub fn schema_as_json() -> crate::error::Result<String> {
        let schema = Self::generate_json_schema();
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

/// Selects the expenses belonging to one budget partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Expenses whose category matches this budget name, case-insensitively.
    Named(String),
    /// Expenses with no category at all.
    Unbudgeted,
}

impl CategoryFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if !transaction.is_expense() {
            return false;
        }
        match (self, transaction.category.as_deref()) {
            (Self::Named(name), Some(category)) => name.eq_ignore_ascii_case(category),
            (Self::Unbudgeted, None) => true,
            _ => false,
        }
    }

    /// Display label under which this partition appears in reports.
    pub fn label(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Unbudgeted => UNBUDGETED_LABEL,
        }
    }
}
