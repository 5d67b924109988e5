//! Expense records and their CRUD service.

pub mod error;
pub mod service;
pub mod types;

pub use error::ExpenseError;
pub use service::ExpenseService;
pub use types::{CreateExpenseInput, Expense, ExpenseDraft, ExpensePatch, ValidatedPatch};
