//! Expense repository for database operations.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, sea_query::Expr,
};
use tracing::debug;
use weektally_core::calendar::{self, Week};
use weektally_core::expense::{Expense, ExpenseDraft};
use weektally_core::store::{ExpenseFilter, ExpenseStore, StoreError};
use weektally_shared::ExpenseId;

use super::store_error;
use crate::entities::expenses;

/// Expense repository backed by the `expenses` table.
///
/// Deletes are soft: the row keeps its data and gets `deleted_at` stamped.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn live() -> Select<expenses::Entity> {
        expenses::Entity::find().filter(expenses::Column::DeletedAt.is_null())
    }

    /// Applies `filter` to a query, or `None` when it can match nothing.
    fn filtered(filter: ExpenseFilter) -> Option<Select<expenses::Entity>> {
        let mut query = Self::live();
        if let Some(week) = filter.week {
            query = query.filter(expenses::Column::Week.eq(i32::from(week)));
        }
        if let Some(year) = filter.year {
            let (first, last) = calendar::year_bounds(year)?;
            query = query.filter(expenses::Column::Date.between(first, last));
        }
        Some(query)
    }

    async fn find_model(&self, id: ExpenseId) -> Result<Option<expenses::Model>, StoreError> {
        Self::live()
            .filter(expenses::Column::Id.eq(id.into_inner()))
            .one(&self.db)
            .await
            .map_err(store_error)
    }
}

impl TryFrom<expenses::Model> for Expense {
    type Error = StoreError;

    fn try_from(model: expenses::Model) -> Result<Self, Self::Error> {
        let week = Week::new(i64::from(model.week))
            .map_err(|e| StoreError::new(format!("expense {}: {e}", model.id)))?;
        Ok(Self {
            id: ExpenseId::from_raw(model.id),
            title: model.title,
            description: model.description,
            amount: model.amount,
            category: model.category,
            date: model.date,
            week,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[async_trait]
impl ExpenseStore for ExpenseRepository {
    async fn insert(&self, draft: ExpenseDraft) -> Result<Expense, StoreError> {
        let now = Utc::now();
        let row = expenses::ActiveModel {
            id: NotSet,
            title: Set(draft.title),
            description: Set(draft.description),
            amount: Set(draft.amount),
            category: Set(draft.category),
            date: Set(draft.date),
            week: Set(i32::from(draft.week)),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        row.insert(&self.db).await.map_err(store_error)?.try_into()
    }

    async fn find(&self, id: ExpenseId) -> Result<Option<Expense>, StoreError> {
        self.find_model(id).await?.map(Expense::try_from).transpose()
    }

    async fn list(&self, filter: ExpenseFilter) -> Result<Vec<Expense>, StoreError> {
        let Some(query) = Self::filtered(filter) else {
            return Ok(Vec::new());
        };

        let rows = query
            .order_by_desc(expenses::Column::Date)
            .order_by_desc(expenses::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_error)?;

        debug!(count = rows.len(), ?filter, "Listed expenses");
        rows.into_iter().map(Expense::try_from).collect()
    }

    async fn update(&self, expense: Expense) -> Result<Expense, StoreError> {
        let model = self
            .find_model(expense.id)
            .await?
            .ok_or_else(|| StoreError::new(format!("expense {} no longer exists", expense.id)))?;

        let mut row: expenses::ActiveModel = model.into();
        row.title = Set(expense.title);
        row.description = Set(expense.description);
        row.amount = Set(expense.amount);
        row.category = Set(expense.category);
        row.date = Set(expense.date);
        row.week = Set(i32::from(expense.week));
        row.updated_at = Set(Utc::now());

        row.update(&self.db).await.map_err(store_error)?.try_into()
    }

    async fn delete(&self, id: ExpenseId) -> Result<(), StoreError> {
        let result = expenses::Entity::update_many()
            .col_expr(expenses::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(expenses::Column::Id.eq(id.into_inner()))
            .filter(expenses::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(store_error)?;

        debug!(%id, rows = result.rows_affected, "Soft-deleted expense");
        Ok(())
    }

    async fn sum_amount(&self, filter: ExpenseFilter) -> Result<Decimal, StoreError> {
        let Some(query) = Self::filtered(filter) else {
            return Ok(Decimal::ZERO);
        };

        // Summed in Decimal rather than SQL to avoid REAL accumulation drift.
        let amounts: Vec<Decimal> = query
            .select_only()
            .column(expenses::Column::Amount)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(store_error)?;

        Ok(amounts.into_iter().sum())
    }
}
