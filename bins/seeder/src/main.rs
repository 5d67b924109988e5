//! Demo data seeder for Weektally development.
//!
//! Seeds a handful of expenses dated in the current ISO week and a budget
//! for that week, going through the same services the API uses.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use chrono::{Datelike, Duration, Local, NaiveDate};
use rust_decimal::Decimal;
use weektally_core::budget::{BudgetService, SetBudgetInput};
use weektally_core::calendar::{self, INPUT_FORMAT};
use weektally_core::expense::{CreateExpenseInput, ExpenseService};
use weektally_db::{ExpenseRepository, WeeklyBudgetRepository, connect_with, migrate};
use weektally_shared::AppConfig;

/// `(title, amount in cents, category, days after Monday)`
const DEMO_EXPENSES: [(&str, i64, Option<&str>, i64); 5] = [
    ("Groceries", 6_420, Some("food"), 0),
    ("Bus pass", 2_500, Some("transport"), 0),
    ("Coffee", 450, Some("food"), 1),
    ("Cinema", 1_350, Some("leisure"), 3),
    ("Refund: headphones", -3_999, Some("shopping"), 4),
];

const DEMO_BUDGET_CENTS: i64 = 15_000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to database...");
    let db = connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;
    migrate(&db).await.context("Failed to run migrations")?;

    let expense_repo = Arc::new(ExpenseRepository::new(db.clone()));
    let expenses = ExpenseService::new(expense_repo.clone());
    let budgets = BudgetService::new(Arc::new(WeeklyBudgetRepository::new(db)), expense_repo);

    let today = Local::now().date_naive();
    let monday = week_start(today);
    let week = calendar::iso_week(today);

    if expenses.list_by_week(i64::from(week), Some(today.year())).await?.is_empty() {
        println!("Seeding expenses for week {week}...");
        for (title, cents, category, offset) in DEMO_EXPENSES {
            let date = monday + Duration::days(offset);
            expenses
                .create(CreateExpenseInput {
                    title: Some(title.to_string()),
                    amount: Some(Decimal::new(cents, 2)),
                    category: category.map(String::from),
                    date: Some(date.format(INPUT_FORMAT).to_string()),
                    ..CreateExpenseInput::default()
                })
                .await?;
        }
    } else {
        println!("  Week {week} already has expenses, skipping...");
    }

    println!("Seeding budget for week {week} of {}...", today.year());
    budgets
        .set_budget(SetBudgetInput {
            week: Some(i64::from(week)),
            year: Some(today.year()),
            amount: Some(Decimal::new(DEMO_BUDGET_CENTS, 2)),
        })
        .await?;

    println!("Seeding complete!");
    Ok(())
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}
