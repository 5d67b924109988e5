//! Weekly budget routes.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use weektally_core::budget::{SetBudgetInput, WeeklyBudget, WeeklySummary};
use weektally_core::store::UpsertOutcome;

use super::{ErrorResponse, error_response, json_rejection, parse_segment};
use crate::AppState;

/// Creates the budget routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budget", post(set_budget))
        .route("/budget/{year}/{week}", get(weekly_summary))
}

/// POST `/budget` - Creates or overwrites the budget for a week.
///
/// Responds 201 when a row was created and 200 when one was overwritten.
#[utoipa::path(
    post,
    path = "/api/budget",
    tag = "budget",
    request_body = SetBudgetInput,
    responses(
        (status = 201, description = "Budget created", body = WeeklyBudget),
        (status = 200, description = "Existing budget overwritten", body = WeeklyBudget),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse)
    )
)]
pub(crate) async fn set_budget(
    State(state): State<AppState>,
    payload: Result<Json<SetBudgetInput>, JsonRejection>,
) -> Response {
    let Json(input) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection(&rejection),
    };

    match state.budgets.set_budget(input).await {
        Ok((budget, outcome)) => {
            let status = match outcome {
                UpsertOutcome::Created => StatusCode::CREATED,
                UpsertOutcome::Updated => StatusCode::OK,
            };
            (status, Json(budget)).into_response()
        }
        Err(e) => error_response(&e.into()),
    }
}

/// GET `/budget/{year}/{week}` - Spent versus budget.
#[utoipa::path(
    get,
    path = "/api/budget/{year}/{week}",
    tag = "budget",
    params(
        ("year" = i32, Path, description = "Calendar year of the expense dates"),
        ("week" = i64, Path, description = "ISO week, 1-53")
    ),
    responses(
        (status = 200, description = "Summary, with `no_budget` set when none exists", body = WeeklySummary),
        (status = 400, description = "Invalid year or week", body = ErrorResponse)
    )
)]
pub(crate) async fn weekly_summary(
    State(state): State<AppState>,
    Path((year, week)): Path<(String, String)>,
) -> Response {
    let year = match parse_segment::<i32>("year", &year) {
        Ok(year) => year,
        Err(response) => return response,
    };
    let week = match parse_segment::<i64>("week", &week) {
        Ok(week) => week,
        Err(response) => return response,
    };

    match state.budgets.summary(week, year).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => error_response(&e.into()),
    }
}
