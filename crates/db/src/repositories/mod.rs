//! Repository implementations of the core storage traits.
//!
//! Repositories hide the `SeaORM` details from the services, which only see
//! `ExpenseStore` and `BudgetStore`.

pub mod expense;
pub mod weekly_budget;

pub use expense::ExpenseRepository;
pub use weekly_budget::WeeklyBudgetRepository;

use sea_orm::DbErr;
use weektally_core::store::StoreError;

/// Converts a database error into the opaque store error.
pub(crate) fn store_error(err: DbErr) -> StoreError {
    StoreError::new(err.to_string())
}
