//! Shared types, errors, and configuration for Weektally.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for store-assigned record identifiers
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DatabaseConfig, ServerConfig};
pub use error::AppError;
pub use types::{BudgetId, ExpenseId};
