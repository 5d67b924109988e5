//! Weekly budget repository for database operations.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
    SqlErr, sea_query::Expr,
};
use tracing::debug;
use weektally_core::budget::WeeklyBudget;
use weektally_core::calendar::Week;
use weektally_core::store::{BudgetStore, StoreError, UpsertOutcome};
use weektally_shared::BudgetId;

use super::store_error;
use crate::entities::weekly_budgets;

/// Budget repository backed by the `weekly_budgets` table.
///
/// Uniqueness of `(week, year)` is enforced by an index, so concurrent
/// upserts for the same pair converge on a single row.
#[derive(Debug, Clone)]
pub struct WeeklyBudgetRepository {
    db: DatabaseConnection,
}

impl WeeklyBudgetRepository {
    /// Creates a new weekly budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(
        &self,
        week: Week,
        year: i32,
    ) -> Result<Option<weekly_budgets::Model>, StoreError> {
        weekly_budgets::Entity::find()
            .filter(weekly_budgets::Column::Week.eq(i32::from(week)))
            .filter(weekly_budgets::Column::Year.eq(year))
            .one(&self.db)
            .await
            .map_err(store_error)
    }
}

impl TryFrom<weekly_budgets::Model> for WeeklyBudget {
    type Error = StoreError;

    fn try_from(model: weekly_budgets::Model) -> Result<Self, Self::Error> {
        let week = Week::new(i64::from(model.week))
            .map_err(|e| StoreError::new(format!("budget {}: {e}", model.id)))?;
        Ok(Self {
            id: BudgetId::from_raw(model.id),
            week,
            year: model.year,
            amount: model.amount,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[async_trait]
impl BudgetStore for WeeklyBudgetRepository {
    async fn upsert(
        &self,
        week: Week,
        year: i32,
        amount: Decimal,
    ) -> Result<(WeeklyBudget, UpsertOutcome), StoreError> {
        let now = Utc::now();
        let row = weekly_budgets::ActiveModel {
            id: NotSet,
            week: Set(i32::from(week)),
            year: Set(year),
            amount: Set(amount),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match row.insert(&self.db).await {
            Ok(model) => return Ok((model.try_into()?, UpsertOutcome::Created)),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                debug!(%week, year, "Budget exists, overwriting amount");
            }
            Err(err) => return Err(store_error(err)),
        }

        weekly_budgets::Entity::update_many()
            .col_expr(weekly_budgets::Column::Amount, Expr::value(amount))
            .col_expr(weekly_budgets::Column::UpdatedAt, Expr::value(now))
            .filter(weekly_budgets::Column::Week.eq(i32::from(week)))
            .filter(weekly_budgets::Column::Year.eq(year))
            .exec(&self.db)
            .await
            .map_err(store_error)?;

        let model = self
            .find_model(week, year)
            .await?
            .ok_or_else(|| StoreError::new(format!("budget for week {week} of {year} vanished")))?;
        Ok((model.try_into()?, UpsertOutcome::Updated))
    }

    async fn find(&self, week: Week, year: i32) -> Result<Option<WeeklyBudget>, StoreError> {
        self.find_model(week, year)
            .await?
            .map(WeeklyBudget::try_from)
            .transpose()
    }
}
