//! Budget error types.

use thiserror::Error;
use weektally_shared::AppError;

use crate::calendar::InvalidWeek;
use crate::store::StoreError;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// A required field was absent or zero.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The week number is outside 1-53.
    #[error(transparent)]
    InvalidWeek(#[from] InvalidWeek),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::MissingField(_) | BudgetError::InvalidWeek(_) => {
                Self::Validation(err.to_string())
            }
            BudgetError::Store(store) => Self::Database(store.0),
        }
    }
}
