//! Budget data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use weektally_shared::BudgetId;

use super::error::BudgetError;
use crate::calendar::Week;

/// The spending ceiling for one `(week, year)` pair.
///
/// At most one row exists per pair; setting it again overwrites `amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct WeeklyBudget {
    /// Store-assigned identifier.
    #[schema(value_type = i64)]
    pub id: BudgetId,
    /// ISO week number.
    #[schema(value_type = u32, minimum = 1, maximum = 53)]
    pub week: Week,
    /// Year the week belongs to.
    pub year: i32,
    /// Spending ceiling.
    pub amount: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Request body for setting a weekly budget.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SetBudgetInput {
    /// ISO week number (required).
    pub week: Option<i64>,
    /// Year (required, nonzero).
    pub year: Option<i32>,
    /// Ceiling (required, nonzero).
    pub amount: Option<Decimal>,
}

impl SetBudgetInput {
    /// Checks the required-field contract.
    pub fn validate(self) -> Result<(Week, i32, Decimal), BudgetError> {
        let week = self
            .week
            .filter(|week| *week != 0)
            .ok_or(BudgetError::MissingField("week"))?;
        let week = Week::new(week)?;
        let year = self
            .year
            .filter(|year| *year != 0)
            .ok_or(BudgetError::MissingField("year"))?;
        let amount = self
            .amount
            .filter(|amount| !amount.is_zero())
            .ok_or(BudgetError::MissingField("amount"))?;
        Ok((week, year, amount))
    }
}

/// Spent-versus-budget figures for one `(week, year)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct WeeklySummary {
    /// ISO week number.
    #[schema(value_type = u32, minimum = 1, maximum = 53)]
    pub week: Week,
    /// Year.
    pub year: i32,
    /// Budget ceiling, zero when none is set.
    pub budget: Decimal,
    /// Sum of the week's expenses.
    pub spent: Decimal,
    /// `budget - spent`.
    pub remaining: Decimal,
    /// True when `remaining` is negative.
    pub over_budget: bool,
    /// True when no budget exists for the pair.
    pub no_budget: bool,
}

impl WeeklySummary {
    /// Reconciles a budget against what was spent.
    #[must_use]
    pub fn reconcile(week: Week, year: i32, budget: Decimal, spent: Decimal) -> Self {
        let remaining = budget - spent;
        Self {
            week,
            year,
            budget,
            spent,
            remaining,
            over_budget: remaining < Decimal::ZERO,
            no_budget: false,
        }
    }

    /// The informational summary returned when no budget is set.
    #[must_use]
    pub fn without_budget(week: Week, year: i32) -> Self {
        Self {
            week,
            year,
            budget: Decimal::ZERO,
            spent: Decimal::ZERO,
            remaining: Decimal::ZERO,
            over_budget: false,
            no_budget: true,
        }
    }
}
