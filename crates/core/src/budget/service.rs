//! Budget reconciliation service.

use std::sync::Arc;

use tracing::{debug, info};

use super::error::BudgetError;
use super::types::{SetBudgetInput, WeeklyBudget, WeeklySummary};
use crate::calendar::Week;
use crate::store::{BudgetStore, ExpenseFilter, ExpenseStore, UpsertOutcome};

/// Budget service over injected budget and expense stores.
#[derive(Clone)]
pub struct BudgetService {
    budgets: Arc<dyn BudgetStore>,
    expenses: Arc<dyn ExpenseStore>,
}

impl BudgetService {
    /// Creates a service backed by the given stores.
    #[must_use]
    pub fn new(budgets: Arc<dyn BudgetStore>, expenses: Arc<dyn ExpenseStore>) -> Self {
        Self { budgets, expenses }
    }

    /// Sets the ceiling for a `(week, year)`, overwriting any existing one.
    ///
    /// The outcome tells callers whether a row was created or updated.
    pub async fn set_budget(
        &self,
        input: SetBudgetInput,
    ) -> Result<(WeeklyBudget, UpsertOutcome), BudgetError> {
        let (week, year, amount) = input.validate()?;
        let (budget, outcome) = self.budgets.upsert(week, year, amount).await?;
        info!(
            budget_id = %budget.id,
            %week,
            year,
            amount = %budget.amount,
            ?outcome,
            "Weekly budget set"
        );
        Ok((budget, outcome))
    }

    /// Compares a week's spend against its budget.
    ///
    /// Spend counts expenses stamped with `week` whose date falls in calendar
    /// year `year`. A missing budget yields an informational zero summary.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWeek` for weeks outside 1-53, or a store error.
    pub async fn summary(&self, week: i64, year: i32) -> Result<WeeklySummary, BudgetError> {
        let week = Week::new(week)?;

        let Some(budget) = self.budgets.find(week, year).await? else {
            debug!(%week, year, "No budget registered for week");
            return Ok(WeeklySummary::without_budget(week, year));
        };

        let spent = self
            .expenses
            .sum_amount(ExpenseFilter::week(week, Some(year)))
            .await?;

        Ok(WeeklySummary::reconcile(week, year, budget.amount, spent))
    }
}
