//! `SeaORM` Entity for weekly_budgets table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "weekly_budgets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub week: i32,
    pub year: i32,
    pub amount: Decimal,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
