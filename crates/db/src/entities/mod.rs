//! `SeaORM` entity definitions.

pub mod expenses;
pub mod weekly_budgets;
