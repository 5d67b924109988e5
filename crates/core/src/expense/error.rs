//! Expense error types.

use thiserror::Error;
use weektally_shared::AppError;

use crate::calendar::{InvalidDateFormat, InvalidWeek};
use crate::store::StoreError;

/// Expense-related errors.
#[derive(Debug, Error)]
pub enum ExpenseError {
    /// No live expense has this id.
    #[error("Expense not found: {0}")]
    NotFound(String),

    /// The id is not an integer token.
    #[error("Invalid expense id: {0}")]
    InvalidId(String),

    /// A required field was absent or empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The date matched neither accepted form.
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateFormat),

    /// The week number is outside 1-53.
    #[error(transparent)]
    InvalidWeek(#[from] InvalidWeek),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ExpenseError> for AppError {
    fn from(err: ExpenseError) -> Self {
        match err {
            ExpenseError::NotFound(_) => Self::NotFound(err.to_string()),
            ExpenseError::InvalidId(_)
            | ExpenseError::MissingField(_)
            | ExpenseError::InvalidDate(_)
            | ExpenseError::InvalidWeek(_) => Self::Validation(err.to_string()),
            ExpenseError::Store(store) => Self::Database(store.0),
        }
    }
}
