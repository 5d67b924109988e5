//! Persistence gateway contract.
//!
//! Services depend on these traits only; `weektally-db` provides the SeaORM
//! implementations and tests substitute in-memory ones. A gateway instance is
//! built once at startup and handed to each service.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use weektally_shared::ExpenseId;

use crate::budget::WeeklyBudget;
use crate::calendar::Week;
use crate::expense::{Expense, ExpenseDraft};

/// Opaque failure reported by the underlying store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl StoreError {
    /// Wraps a store message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Row filter for expense queries.
///
/// `year` matches against the calendar year of the stored date, not the ISO
/// week-numbering year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    /// Only expenses stamped with this week.
    pub week: Option<Week>,
    /// Only expenses dated within this calendar year.
    pub year: Option<i32>,
}

impl ExpenseFilter {
    /// Every live expense.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            week: None,
            year: None,
        }
    }

    /// Expenses in `week`, optionally narrowed to a calendar year.
    #[must_use]
    pub const fn week(week: Week, year: Option<i32>) -> Self {
        Self {
            week: Some(week),
            year,
        }
    }
}

/// Whether an upsert inserted a new row or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new row was inserted.
    Created,
    /// An existing row was overwritten in place.
    Updated,
}

/// Storage operations over expense rows.
///
/// Deleted rows are invisible to every read and aggregate.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Inserts a validated expense and returns the stored row.
    async fn insert(&self, draft: ExpenseDraft) -> Result<Expense, StoreError>;

    /// Looks up a live expense.
    async fn find(&self, id: ExpenseId) -> Result<Option<Expense>, StoreError>;

    /// Lists live expenses matching `filter`, newest date first.
    async fn list(&self, filter: ExpenseFilter) -> Result<Vec<Expense>, StoreError>;

    /// Persists every mutable field of `expense` and returns the stored row.
    async fn update(&self, expense: Expense) -> Result<Expense, StoreError>;

    /// Removes an expense. Missing ids are not an error.
    async fn delete(&self, id: ExpenseId) -> Result<(), StoreError>;

    /// Sums `amount` over live expenses matching `filter`; zero when none match.
    async fn sum_amount(&self, filter: ExpenseFilter) -> Result<Decimal, StoreError>;
}

/// Storage operations over weekly budget rows.
#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// Atomically inserts or overwrites the budget for `(week, year)`.
    async fn upsert(
        &self,
        week: Week,
        year: i32,
        amount: Decimal,
    ) -> Result<(WeeklyBudget, UpsertOutcome), StoreError>;

    /// Looks up the budget for `(week, year)`.
    async fn find(&self, week: Week, year: i32) -> Result<Option<WeeklyBudget>, StoreError>;
}
