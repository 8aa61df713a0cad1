use anyhow::Result;
use cashflow_forecaster::*;
use chrono::{Datelike, Local, NaiveDate};
use rust_decimal_macros::dec;

fn main() -> Result<()> {
    env_logger::init();

    println!("📊 Cashflow Forecast Demo\n");
    println!("A small household ledger: rent, groceries on a weekly cadence,");
    println!("a one-off car repair, and a biweekly salary.\n");

    let today = Local::now().date_naive();
    let start_of_year = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap();

    let snapshot = ForecastSnapshot {
        lookback_months: 5,
        transactions: vec![
            Transaction {
                amount: dec!(950),
                occurred_on: start_of_year,
                frequency: PaymentFrequency::Monthly,
                category: Some("Rent".to_string()),
                kind: TransactionKind::Expense,
            },
            Transaction {
                amount: dec!(60),
                occurred_on: start_of_year,
                frequency: PaymentFrequency::Weekly,
                category: Some("Groceries".to_string()),
                kind: TransactionKind::Expense,
            },
            Transaction {
                amount: dec!(420),
                occurred_on: today,
                frequency: PaymentFrequency::OneOff,
                category: None,
                kind: TransactionKind::Expense,
            },
            Transaction {
                amount: dec!(1800),
                occurred_on: start_of_year,
                frequency: PaymentFrequency::Biweekly,
                category: None,
                kind: TransactionKind::Income,
            },
        ],
        budgets: vec![
            Budget {
                name: "Rent".to_string(),
                target_amount: dec!(6000),
            },
            Budget {
                name: "Groceries".to_string(),
                target_amount: dec!(1500),
            },
        ],
    };

    println!("📋 Configuration:");
    println!("  Rent:      $950/month from January");
    println!("  Groceries: $60/week from January ($240 monthly equivalent)");
    println!("  Repair:    $420 one-off this month (no budget)");
    println!("  Salary:    $1800 biweekly ($3600 monthly equivalent)\n");

    let report = generate_forecast(&snapshot, today)?;

    println!("✅ Forecast for the next 12 months:\n");

    println!(
        "  {:<10} {:>12} {:>12} {:>12}",
        "Month", "Expenses", "Income", "Net"
    );
    for (point, net) in report
        .cashflow
        .total_expenses
        .points()
        .iter()
        .zip(&report.cashflow.net)
    {
        println!(
            "  {:<10} {:>12.2} {:>12.2} {:>12.2}",
            point.month.name(),
            point.amount,
            report.cashflow.monthly_income,
            net.amount
        );
    }

    println!("\n💰 Budget progress so far this year:");
    for (name, progress) in &report.budget_progress {
        let marker = if progress.overspent { "⚠️ over" } else { "ok" };
        println!(
            "  {:<12} {:>6.0}% spent ({})",
            name,
            progress.fraction * dec!(100),
            marker
        );
    }

    println!(
        "\n  This month so far: ${:.2} spent, ${:.2} received",
        report.current_month_expense_total, report.current_month_income_total
    );

    Ok(())
}
