//! Weekly budgets and spend reconciliation.

pub mod error;
pub mod service;
pub mod types;


pub use error::BudgetError;
pub use service::BudgetService;
pub use types::{SetBudgetInput, WeeklyBudget, WeeklySummary};
