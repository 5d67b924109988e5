//! Core business logic for Weektally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here; persistence is
//! reached only through the gateway traits in [`store`].
//!
//! # Modules
//!
//! - `calendar` - ISO week numbering and date formats
//! - `store` - Persistence gateway contract
//! - `expense` - Expense records and their service
//! - `budget` - Weekly budgets and spend reconciliation
//! - `export` - CSV rendering of a week's expenses

pub mod budget;
pub mod calendar;
pub mod expense;
pub mod export;
pub mod store;

#[cfg(test)]
mod testing;
