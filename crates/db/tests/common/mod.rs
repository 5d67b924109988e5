//! Shared fixtures for the database integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tempfile::TempDir;
use weektally_core::expense::ExpenseDraft;

/// Opens a migrated in-memory database.
///
/// The pool is pinned to one connection; every new `SQLite` connection to
/// `:memory:` would otherwise see its own empty database.
pub async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.expect("connect sqlite");
    weektally_db::migrate(&db).await.expect("run migrations");
    db
}

/// Opens a migrated database file inside `dir` with a pool of `connections`.
pub async fn file_db(dir: &TempDir, connections: u32) -> DatabaseConnection {
    let path = dir.path().join("weektally.db");
    let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
    options
        .max_connections(connections)
        .min_connections(connections)
        .sqlx_logging(false);

    let db = Database::connect(options).await.expect("connect sqlite file");
    weektally_db::migrate(&db).await.expect("run migrations");
    db
}

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid test date")
}

pub fn draft(title: &str, amount: Decimal, raw_date: &str) -> ExpenseDraft {
    ExpenseDraft::new(title.to_string(), None, amount, None, date(raw_date))
}
