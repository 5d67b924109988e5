//! Expense data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use weektally_shared::ExpenseId;

use super::error::ExpenseError;
use crate::calendar::{self, Week};

/// A stored expense.
///
/// `week` is always the ISO week of `date`; it is derived on every write and
/// never taken from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Expense {
    /// Store-assigned identifier.
    #[schema(value_type = i64)]
    pub id: ExpenseId,
    /// Short label.
    pub title: String,
    /// Optional free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Signed amount; negative values are kept as-is.
    pub amount: Decimal,
    /// Optional category label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Calendar date, rendered as `DD-MM-YYYY`.
    #[serde(with = "calendar::display_date")]
    #[schema(value_type = String, example = "06-03-2024")]
    pub date: NaiveDate,
    /// ISO week of `date`.
    #[schema(value_type = u32, minimum = 1, maximum = 53)]
    pub week: Week,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A validated expense ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    /// Short label.
    pub title: String,
    /// Optional free text.
    pub description: Option<String>,
    /// Signed, nonzero amount.
    pub amount: Decimal,
    /// Optional category label.
    pub category: Option<String>,
    /// Calendar date.
    pub date: NaiveDate,
    /// ISO week of `date`.
    pub week: Week,
}

impl ExpenseDraft {
    /// Builds a draft, stamping the week from `date`.
    #[must_use]
    pub fn new(
        title: String,
        description: Option<String>,
        amount: Decimal,
        category: Option<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            title,
            description,
            amount,
            category,
            week: Week::of(date),
            date,
        }
    }
}

/// Request body for creating an expense.
///
/// Every field is optional at the type level so that missing values surface
/// as validation errors rather than deserialization failures.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateExpenseInput {
    /// Short label (required).
    pub title: Option<String>,
    /// Optional free text.
    pub description: Option<String>,
    /// Amount (required, nonzero).
    pub amount: Option<Decimal>,
    /// Optional category label.
    pub category: Option<String>,
    /// Date as `YYYY-MM-DD` (required).
    #[schema(example = "2024-03-06")]
    pub date: Option<String>,
}

impl CreateExpenseInput {
    /// Checks the required-field contract and derives the week.
    pub fn validate(self) -> Result<ExpenseDraft, ExpenseError> {
        let title = non_blank(self.title).ok_or(ExpenseError::MissingField("title"))?;
        let amount = self
            .amount
            .filter(|amount| !amount.is_zero())
            .ok_or(ExpenseError::MissingField("amount"))?;
        let raw_date = non_blank(self.date).ok_or(ExpenseError::MissingField("date"))?;
        let date = calendar::parse_input(&raw_date)?;

        Ok(ExpenseDraft::new(
            title,
            non_blank(self.description),
            amount,
            non_blank(self.category),
            date,
        ))
    }
}

/// Request body for a partial update.
///
/// Absent fields keep their stored value. Blank strings count as absent and a
/// zero `amount` counts as absent, matching what older clients send for
/// "unchanged". `description` and `category` can be cleared with an explicit
/// `null`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ExpensePatch {
    /// New title.
    pub title: Option<String>,
    /// New description; `Some(None)` clears it.
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    /// New amount; zero is ignored.
    pub amount: Option<Decimal>,
    /// New category; `Some(None)` clears it.
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
    /// New date as `YYYY-MM-DD`.
    pub date: Option<String>,
}

impl ExpensePatch {
    /// Parses the date and normalizes blanks, without touching any record.
    pub fn validate(self) -> Result<ValidatedPatch, ExpenseError> {
        let date = non_blank(self.date)
            .map(|raw| calendar::parse_input(&raw))
            .transpose()?;

        Ok(ValidatedPatch {
            title: non_blank(self.title),
            description: self.description.and_then(clearable),
            amount: self.amount.filter(|amount| !amount.is_zero()),
            category: self.category.and_then(clearable),
            date,
        })
    }
}

/// A patch whose fields are known to be well formed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedPatch {
    /// New title.
    pub title: Option<String>,
    /// New description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// New nonzero amount.
    pub amount: Option<Decimal>,
    /// New category; `Some(None)` clears it.
    pub category: Option<Option<String>>,
    /// New date.
    pub date: Option<NaiveDate>,
}

impl ValidatedPatch {
    /// Returns true if applying the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrites the provided fields, recomputing the week on a new date.
    pub fn apply_to(self, expense: &mut Expense) {
        if let Some(title) = self.title {
            expense.title = title;
        }
        if let Some(description) = self.description {
            expense.description = description;
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(category) = self.category {
            expense.category = category;
        }
        if let Some(date) = self.date {
            expense.date = date;
            expense.week = Week::of(date);
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Maps a present optional text field: `null` clears, blank is ignored.
fn clearable(value: Option<String>) -> Option<Option<String>> {
    match value {
        None => Some(None),
        Some(text) if text.trim().is_empty() => None,
        Some(text) => Some(Some(text)),
    }
}
