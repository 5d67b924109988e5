//! In-memory gateway used by the service tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use weektally_shared::{BudgetId, ExpenseId};

use crate::budget::WeeklyBudget;
use crate::calendar::{self, Week};
use crate::expense::{Expense, ExpenseDraft};
use crate::store::{BudgetStore, ExpenseFilter, ExpenseStore, StoreError, UpsertOutcome};

#[derive(Default)]
pub(crate) struct MemoryStore {
    expenses: Mutex<Vec<Expense>>,
    budgets: Mutex<Vec<WeeklyBudget>>,
    last_id: AtomicI64,
    calls: AtomicUsize,
}

impl MemoryStore {
    /// Number of gateway calls made so far.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn budget_count(&self) -> usize {
        self.budgets.lock().unwrap().len()
    }

    fn next_id(&self) -> i64 {
        self.last_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn matching(&self, filter: ExpenseFilter) -> Vec<Expense> {
        let bounds = filter.year.map(calendar::year_bounds);
        let mut rows: Vec<Expense> = self
            .expenses
            .lock()
            .unwrap()
            .iter()
            .filter(|e| filter.week.is_none_or(|week| e.week == week))
            .filter(|e| match bounds {
                None => true,
                Some(None) => false,
                Some(Some((first, last))) => e.date >= first && e.date <= last,
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        rows
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn insert(&self, draft: ExpenseDraft) -> Result<Expense, StoreError> {
        self.touch();
        let mut rows = self.expenses.lock().unwrap();
        let now = Utc::now();
        let id = self.next_id();
        let expense = Expense {
            id: ExpenseId::from_raw(id),
            title: draft.title,
            description: draft.description,
            amount: draft.amount,
            category: draft.category,
            date: draft.date,
            week: draft.week,
            created_at: now,
            updated_at: now,
        };
        rows.push(expense.clone());
        Ok(expense)
    }

    async fn find(&self, id: ExpenseId) -> Result<Option<Expense>, StoreError> {
        self.touch();
        Ok(self
            .expenses
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn list(&self, filter: ExpenseFilter) -> Result<Vec<Expense>, StoreError> {
        self.touch();
        Ok(self.matching(filter))
    }

    async fn update(&self, mut expense: Expense) -> Result<Expense, StoreError> {
        self.touch();
        let mut rows = self.expenses.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|e| e.id == expense.id)
            .ok_or_else(|| StoreError::new("row vanished"))?;
        expense.updated_at = Utc::now();
        *slot = expense.clone();
        Ok(expense)
    }

    async fn delete(&self, id: ExpenseId) -> Result<(), StoreError> {
        self.touch();
        self.expenses.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }

    async fn sum_amount(&self, filter: ExpenseFilter) -> Result<Decimal, StoreError> {
        self.touch();
        Ok(self.matching(filter).iter().map(|e| e.amount).sum())
    }
}

#[async_trait]
impl BudgetStore for MemoryStore {
    async fn upsert(
        &self,
        week: Week,
        year: i32,
        amount: Decimal,
    ) -> Result<(WeeklyBudget, UpsertOutcome), StoreError> {
        self.touch();
        let mut rows = self.budgets.lock().unwrap();
        let now = Utc::now();
        if let Some(existing) = rows.iter_mut().find(|b| b.week == week && b.year == year) {
            existing.amount = amount;
            existing.updated_at = now;
            return Ok((existing.clone(), UpsertOutcome::Updated));
        }
        let id = self.next_id();
        let budget = WeeklyBudget {
            id: BudgetId::from_raw(id),
            week,
            year,
            amount,
            created_at: now,
            updated_at: now,
        };
        rows.push(budget.clone());
        Ok((budget, UpsertOutcome::Created))
    }

    async fn find(&self, week: Week, year: i32) -> Result<Option<WeeklyBudget>, StoreError> {
        self.touch();
        Ok(self
            .budgets
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.week == week && b.year == year)
            .cloned())
    }
}
