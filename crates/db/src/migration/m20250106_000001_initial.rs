//! Initial database migration.
//!
//! Creates the `expenses` and `weekly_budgets` tables on SQLite.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(EXPENSES_SQL).await?;
        db.execute_unprepared(WEEKLY_BUDGETS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS weekly_budgets;")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS expenses;").await?;
        Ok(())
    }
}

// Dates are stored as ISO text so lexical order is chronological.
const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL CHECK (length(trim(title)) > 0),
    description TEXT,
    amount REAL NOT NULL,
    category TEXT,
    date DATE NOT NULL,
    week INTEGER NOT NULL CHECK (week BETWEEN 1 AND 53),
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL,
    deleted_at DATETIME
);

-- Week listings, exports and weekly sums
CREATE INDEX idx_expenses_week_date ON expenses(week, date DESC) WHERE deleted_at IS NULL;

-- Full listing, newest first
CREATE INDEX idx_expenses_date ON expenses(date DESC) WHERE deleted_at IS NULL;
";

const WEEKLY_BUDGETS_SQL: &str = r"
CREATE TABLE weekly_budgets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    week INTEGER NOT NULL CHECK (week BETWEEN 1 AND 53),
    year INTEGER NOT NULL,
    amount REAL NOT NULL,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
);

-- One budget per (week, year); upserts rely on this
CREATE UNIQUE INDEX uq_weekly_budgets_week_year ON weekly_budgets(week, year);
";
