//! Expense service: CRUD over expenses with week stamping.

use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, info};
use weektally_shared::ExpenseId;

use super::error::ExpenseError;
use super::types::{CreateExpenseInput, Expense, ExpensePatch};
use crate::calendar::Week;
use crate::store::{ExpenseFilter, ExpenseStore};

/// Expense service over an injected store.
#[derive(Clone)]
pub struct ExpenseService {
    store: Arc<dyn ExpenseStore>,
}

impl ExpenseService {
    /// Creates a service backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self { store }
    }

    /// Validates and stores a new expense.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing title, amount or date, or an
    /// unparsable date, before the store is touched.
    pub async fn create(&self, input: CreateExpenseInput) -> Result<Expense, ExpenseError> {
        let draft = input.validate()?;
        let expense = self.store.insert(draft).await?;
        info!(expense_id = %expense.id, week = %expense.week, "Expense created");
        Ok(expense)
    }

    /// Fetches one expense. An id that is not an integer matches nothing.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown, deleted or non-integer ids, or a store
    /// error.
    pub async fn get_by_id(&self, raw_id: &str) -> Result<Expense, ExpenseError> {
        let id = ExpenseId::from_str(raw_id)
            .map_err(|_| ExpenseError::NotFound(raw_id.to_string()))?;
        self.find_existing(id).await
    }

    /// Lists every expense, newest date first.
    ///
    /// # Errors
    ///
    /// Returns a store error if the query fails.
    pub async fn list(&self) -> Result<Vec<Expense>, ExpenseError> {
        Ok(self.store.list(ExpenseFilter::all()).await?)
    }

    /// Lists expenses stamped with `week`, newest date first.
    ///
    /// Without `year` every year sharing the week number is included.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWeek` for weeks outside 1-53 without querying the store.
    pub async fn list_by_week(
        &self,
        week: i64,
        year: Option<i32>,
    ) -> Result<Vec<Expense>, ExpenseError> {
        let week = Week::new(week)?;
        let expenses = self.store.list(ExpenseFilter::week(week, year)).await?;
        debug!(%week, ?year, count = expenses.len(), "Listed expenses for week");
        Ok(expenses)
    }

    /// Applies a partial update.
    ///
    /// The patch is validated before the lookup, so a malformed date never
    /// reaches the store.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDate` for an unparsable date, `NotFound` for an unknown
    /// or non-integer id, or a store error.
    pub async fn update(&self, raw_id: &str, patch: ExpensePatch) -> Result<Expense, ExpenseError> {
        let patch = patch.validate()?;
        let id = ExpenseId::from_str(raw_id)
            .map_err(|_| ExpenseError::NotFound(raw_id.to_string()))?;
        let mut expense = self.find_existing(id).await?;

        if patch.is_empty() {
            return Ok(expense);
        }

        patch.apply_to(&mut expense);
        let updated = self.store.update(expense).await?;
        info!(expense_id = %updated.id, week = %updated.week, "Expense updated");
        Ok(updated)
    }

    /// Deletes an expense. Deleting an unknown id succeeds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidId` when `raw_id` is not an integer, or a store error.
    pub async fn delete(&self, raw_id: &str) -> Result<ExpenseId, ExpenseError> {
        let id = ExpenseId::from_str(raw_id)
            .map_err(|_| ExpenseError::InvalidId(raw_id.to_string()))?;
        self.store.delete(id).await?;
        info!(expense_id = %id, "Expense deleted");
        Ok(id)
    }

    async fn find_existing(&self, id: ExpenseId) -> Result<Expense, ExpenseError> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| ExpenseError::NotFound(id.to_string()))
    }
}
