//! CSV export of a week's expenses.
//!
//! An empty week is reported as `Empty` (not found) even though listing the
//! same week returns an empty array; a download with only a header row is
//! never produced.

use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use tracing::info;
use weektally_shared::AppError;

use crate::calendar::{self, InvalidWeek, Week};
use crate::expense::Expense;
use crate::store::{ExpenseFilter, ExpenseStore, StoreError};

/// Column labels of the export, in order.
pub const CSV_HEADER: [&str; 7] = [
    "ID",
    "Title",
    "Description",
    "Amount",
    "Category",
    "Date",
    "Week",
];

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The week number is outside 1-53.
    #[error(transparent)]
    InvalidWeek(#[from] InvalidWeek),

    /// No expenses exist for the week.
    #[error("No expenses to export for week {0}")]
    Empty(Week),

    /// CSV encoding failed.
    #[error("CSV encoding failed: {0}")]
    Encoding(String),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::InvalidWeek(_) => Self::Validation(err.to_string()),
            ExportError::Empty(_) => Self::NotFound(err.to_string()),
            ExportError::Encoding(_) => Self::Internal(err.to_string()),
            ExportError::Store(store) => Self::Database(store.0),
        }
    }
}

/// A rendered export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Suggested download name.
    pub filename: String,
    /// Number of data rows, excluding the header.
    pub rows: usize,
    /// Encoded CSV.
    pub bytes: Vec<u8>,
}

/// Formats an amount with exactly two decimals.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Renders `expenses` as CSV with a header row.
pub fn render_csv(expenses: &[Expense]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for expense in expenses {
        writer.write_record([
            expense.id.to_string(),
            expense.title.clone(),
            expense.description.clone().unwrap_or_default(),
            format_amount(expense.amount),
            expense.category.clone().unwrap_or_default(),
            calendar::format_display(expense.date),
            expense.week.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Encoding(e.to_string()))
}

/// Export service over an injected expense store.
#[derive(Clone)]
pub struct ExportService {
    store: Arc<dyn ExpenseStore>,
}

impl ExportService {
    /// Creates a service backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self { store }
    }

    /// Exports the expenses of `week`, newest date first.
    ///
    /// Without `year` every year sharing the week number is included.
    pub async fn export_week_csv(
        &self,
        week: i64,
        year: Option<i32>,
    ) -> Result<CsvExport, ExportError> {
        let week = Week::new(week)?;
        let expenses = self.store.list(ExpenseFilter::week(week, year)).await?;
        if expenses.is_empty() {
            return Err(ExportError::Empty(week));
        }

        let bytes = render_csv(&expenses)?;
        info!(%week, ?year, rows = expenses.len(), "Exported weekly expenses");
        Ok(CsvExport {
            filename: format!("expenses_week_{week}.csv"),
            rows: expenses.len(),
            bytes,
        })
    }
}
