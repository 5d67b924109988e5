//! Expense routes.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use weektally_core::expense::{CreateExpenseInput, Expense, ExpensePatch};
use weektally_shared::AppError;

use super::{
    ErrorResponse, MessageResponse, YearQuery, error_response, json_rejection, parse_segment,
    query_rejection,
};
use crate::AppState;

/// Creates the expense routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route(
            "/expenses/{id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
        .route("/expenses/week/{week}", get(list_by_week))
        .route("/expenses/week/{week}/export", get(export_week))
}

/// GET `/expenses` - All expenses, newest first.
#[utoipa::path(
    get,
    path = "/api/expenses",
    tag = "expenses",
    responses(
        (status = 200, description = "Every live expense", body = [Expense]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub(crate) async fn list_expenses(State(state): State<AppState>) -> Response {
    match state.expenses.list().await {
        Ok(expenses) => (StatusCode::OK, Json(expenses)).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// GET `/expenses/{id}`
#[utoipa::path(
    get,
    path = "/api/expenses/{id}",
    tag = "expenses",
    params(("id" = String, Path, description = "Expense id")),
    responses(
        (status = 200, description = "The expense", body = Expense),
        (status = 404, description = "Unknown or malformed id", body = ErrorResponse)
    )
)]
pub(crate) async fn get_expense(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.expenses.get_by_id(&id).await {
        Ok(expense) => (StatusCode::OK, Json(expense)).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// GET `/expenses/week/{week}` - Expenses stamped with an ISO week.
#[utoipa::path(
    get,
    path = "/api/expenses/week/{week}",
    tag = "expenses",
    params(("week" = i64, Path, description = "ISO week, 1-53"), YearQuery),
    responses(
        (status = 200, description = "Expenses of the week, newest first", body = [Expense]),
        (status = 400, description = "Week out of range", body = ErrorResponse)
    )
)]
pub(crate) async fn list_by_week(
    State(state): State<AppState>,
    Path(week): Path<String>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(&rejection),
    };
    let week = match parse_segment::<i64>("week", &week) {
        Ok(week) => week,
        Err(response) => return response,
    };

    match state.expenses.list_by_week(week, query.year).await {
        Ok(expenses) => (StatusCode::OK, Json(expenses)).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// GET `/expenses/week/{week}/export` - CSV download of a week.
#[utoipa::path(
    get,
    path = "/api/expenses/week/{week}/export",
    tag = "expenses",
    params(("week" = i64, Path, description = "ISO week, 1-53"), YearQuery),
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv", body = String),
        (status = 400, description = "Week out of range", body = ErrorResponse),
        (status = 404, description = "No expenses in the week", body = ErrorResponse)
    )
)]
pub(crate) async fn export_week(
    State(state): State<AppState>,
    Path(week): Path<String>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(&rejection),
    };
    let week = match parse_segment::<i64>("week", &week) {
        Ok(week) => week,
        Err(response) => return response,
    };

    match state.exports.export_week_csv(week, query.year).await {
        Ok(export) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment;filename={}", export.filename),
                ),
                (header::CACHE_CONTROL, "no-cache".to_string()),
            ],
            export.bytes,
        )
            .into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

/// POST `/expenses`
#[utoipa::path(
    post,
    path = "/api/expenses",
    tag = "expenses",
    request_body = CreateExpenseInput,
    responses(
        (status = 201, description = "Expense created", body = Expense),
        (status = 400, description = "Missing or malformed field", body = ErrorResponse)
    )
)]
pub(crate) async fn create_expense(
    State(state): State<AppState>,
    payload: Result<Json<CreateExpenseInput>, JsonRejection>,
) -> Response {
    let Json(input) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection(&rejection),
    };

    match state.expenses.create(input).await {
        Ok(expense) => (StatusCode::CREATED, Json(expense)).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// PUT `/expenses/{id}` - Partial update; absent fields are kept.
#[utoipa::path(
    put,
    path = "/api/expenses/{id}",
    tag = "expenses",
    params(("id" = String, Path, description = "Expense id")),
    request_body = ExpensePatch,
    responses(
        (status = 200, description = "Updated expense", body = Expense),
        (status = 400, description = "Malformed field", body = ErrorResponse),
        (status = 404, description = "Unknown or malformed id", body = ErrorResponse)
    )
)]
pub(crate) async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ExpensePatch>, JsonRejection>,
) -> Response {
    let Json(patch) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection(&rejection),
    };

    match state.expenses.update(&id, patch).await {
        Ok(expense) => (StatusCode::OK, Json(expense)).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// DELETE `/expenses/{id}`
#[utoipa::path(
    delete,
    path = "/api/expenses/{id}",
    tag = "expenses",
    params(("id" = String, Path, description = "Expense id")),
    responses(
        (status = 200, description = "Deleted, or never existed", body = MessageResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse)
    )
)]
pub(crate) async fn delete_expense(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.expenses.delete(&id).await {
        Ok(_) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Expense deleted".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(&e.into()),
    }
}
