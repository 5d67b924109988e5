//! Integration tests for the SQLite-backed repositories.

#![allow(clippy::unwrap_used)]

mod common;

use common::{date, draft, memory_db};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use weektally_core::calendar::Week;
use weektally_core::expense::ExpenseDraft;
use weektally_core::store::{BudgetStore, ExpenseFilter, ExpenseStore, UpsertOutcome};
use weektally_db::{ExpenseRepository, WeeklyBudgetRepository};
use weektally_shared::ExpenseId;

fn week(n: i64) -> Week {
    Week::new(n).unwrap()
}

#[tokio::test]
async fn test_insert_stamps_id_and_week() {
    let repo = ExpenseRepository::new(memory_db().await);

    let stored = repo
        .insert(ExpenseDraft::new(
            "Groceries".into(),
            Some("weekly shop".into()),
            dec!(12.50),
            Some("food".into()),
            date("2024-03-06"),
        ))
        .await
        .unwrap();

    assert_eq!(stored.id, ExpenseId::from_raw(1));
    assert_eq!(stored.week, week(10));
    assert_eq!(stored.amount, dec!(12.5));
    assert_eq!(stored.description.as_deref(), Some("weekly shop"));
    assert_eq!(stored.category.as_deref(), Some("food"));
    assert_eq!(stored.created_at, stored.updated_at);

    let found = repo.find(stored.id).await.unwrap().unwrap();
    assert_eq!(found.title, "Groceries");
    assert_eq!(found.date, date("2024-03-06"));
}

#[tokio::test]
async fn test_list_orders_newest_date_first() {
    let repo = ExpenseRepository::new(memory_db().await);
    repo.insert(draft("old", dec!(1), "2024-01-02")).await.unwrap();
    repo.insert(draft("new", dec!(2), "2024-05-01")).await.unwrap();
    repo.insert(draft("same day later id", dec!(3), "2024-05-01"))
        .await
        .unwrap();

    let titles: Vec<String> = repo
        .list(ExpenseFilter::all())
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, ["same day later id", "new", "old"]);
}

#[tokio::test]
async fn test_week_filter_with_and_without_year() {
    let repo = ExpenseRepository::new(memory_db().await);
    repo.insert(draft("2024 w1", dec!(10), "2024-01-03")).await.unwrap();
    repo.insert(draft("2023 w1", dec!(20), "2023-01-04")).await.unwrap();
    repo.insert(draft("2024 w2", dec!(30), "2024-01-09")).await.unwrap();

    let any_year = repo.list(ExpenseFilter::week(week(1), None)).await.unwrap();
    assert_eq!(any_year.len(), 2);

    let only_2024 = repo
        .list(ExpenseFilter::week(week(1), Some(2024)))
        .await
        .unwrap();
    assert_eq!(only_2024.len(), 1);
    assert_eq!(only_2024[0].title, "2024 w1");

    assert!(repo
        .list(ExpenseFilter::week(week(1), Some(2019)))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_iso_week_one_dated_in_december() {
    let repo = ExpenseRepository::new(memory_db().await);
    let stored = repo
        .insert(draft("year end", dec!(5), "2024-12-30"))
        .await
        .unwrap();
    assert_eq!(stored.week, week(1));

    // Calendar year of the date decides, not the ISO week-year.
    let in_2024 = repo
        .list(ExpenseFilter::week(week(1), Some(2024)))
        .await
        .unwrap();
    assert_eq!(in_2024.len(), 1);
    assert!(repo
        .list(ExpenseFilter::week(week(1), Some(2025)))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_update_persists_fields_and_bumps_timestamp() {
    let repo = ExpenseRepository::new(memory_db().await);
    let mut expense = repo.insert(draft("Taxi", dec!(8), "2024-03-04")).await.unwrap();

    expense.title = "Train".into();
    expense.amount = dec!(-3.25);
    expense.date = date("2024-03-12");
    expense.week = Week::of(expense.date);
    expense.category = Some("travel".into());

    let updated = repo.update(expense.clone()).await.unwrap();
    assert_eq!(updated.title, "Train");
    assert_eq!(updated.amount, dec!(-3.25));
    assert_eq!(updated.week, week(11));
    assert_eq!(updated.category.as_deref(), Some("travel"));
    assert_eq!(updated.created_at, expense.created_at);
    assert!(updated.updated_at >= expense.updated_at);

    let reread = repo.find(expense.id).await.unwrap().unwrap();
    assert_eq!(reread.week, week(11));
}

#[tokio::test]
async fn test_soft_delete_hides_row_everywhere() {
    let repo = ExpenseRepository::new(memory_db().await);
    let keep = repo.insert(draft("keep", dec!(4.25), "2024-03-05")).await.unwrap();
    let gone = repo.insert(draft("gone", dec!(100), "2024-03-06")).await.unwrap();

    repo.delete(gone.id).await.unwrap();

    assert!(repo.find(gone.id).await.unwrap().is_none());
    let listed = repo.list(ExpenseFilter::week(week(10), None)).await.unwrap();
    assert_eq!(listed, vec![keep]);
    assert_eq!(
        repo.sum_amount(ExpenseFilter::week(week(10), None))
            .await
            .unwrap(),
        dec!(4.25)
    );

    // Deleting again, or deleting an id that never existed, is not an error.
    repo.delete(gone.id).await.unwrap();
    repo.delete(ExpenseId::from_raw(999)).await.unwrap();
}

#[tokio::test]
async fn test_update_of_deleted_row_fails() {
    let repo = ExpenseRepository::new(memory_db().await);
    let expense = repo.insert(draft("x", dec!(1), "2024-03-05")).await.unwrap();
    repo.delete(expense.id).await.unwrap();

    assert!(repo.update(expense).await.is_err());
}

#[tokio::test]
async fn test_sum_amount_is_exact_and_zero_when_empty() {
    let repo = ExpenseRepository::new(memory_db().await);
    assert_eq!(
        repo.sum_amount(ExpenseFilter::week(week(10), Some(2024)))
            .await
            .unwrap(),
        Decimal::ZERO
    );

    repo.insert(draft("a", dec!(12.5), "2024-03-04")).await.unwrap();
    repo.insert(draft("b", dec!(4.25), "2024-03-10")).await.unwrap();
    repo.insert(draft("refund", dec!(-0.75), "2024-03-07")).await.unwrap();
    repo.insert(draft("other week", dec!(50), "2024-03-11")).await.unwrap();

    assert_eq!(
        repo.sum_amount(ExpenseFilter::week(week(10), Some(2024)))
            .await
            .unwrap(),
        dec!(16)
    );
}

#[tokio::test]
async fn test_budget_upsert_creates_then_overwrites() {
    let repo = WeeklyBudgetRepository::new(memory_db().await);

    let (created, outcome) = repo.upsert(week(10), 2024, dec!(100)).await.unwrap();
    assert_eq!(outcome, UpsertOutcome::Created);
    assert_eq!(created.amount, dec!(100));

    let (updated, outcome) = repo.upsert(week(10), 2024, dec!(80.5)).await.unwrap();
    assert_eq!(outcome, UpsertOutcome::Updated);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.amount, dec!(80.5));
    assert_eq!(updated.created_at, created.created_at);

    let found = repo.find(week(10), 2024).await.unwrap().unwrap();
    assert_eq!(found.amount, dec!(80.5));
}

#[tokio::test]
async fn test_budget_pairs_are_independent() {
    let repo = WeeklyBudgetRepository::new(memory_db().await);
    repo.upsert(week(10), 2024, dec!(100)).await.unwrap();
    let (other, outcome) = repo.upsert(week(10), 2025, dec!(60)).await.unwrap();
    assert_eq!(outcome, UpsertOutcome::Created);
    assert_eq!(other.year, 2025);

    assert!(repo.find(week(11), 2024).await.unwrap().is_none());
    assert_eq!(
        repo.find(week(10), 2024).await.unwrap().unwrap().amount,
        dec!(100)
    );
}
