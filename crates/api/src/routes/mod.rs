//! API route definitions.

use axum::{
    Json, Router,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{IntoParams, OpenApi, ToSchema};
use weektally_core::budget::{SetBudgetInput, WeeklyBudget, WeeklySummary};
use weektally_core::expense::{CreateExpenseInput, Expense, ExpensePatch};
use weektally_shared::AppError;

use crate::AppState;

pub mod budget;
pub mod expenses;
pub mod health;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(expenses::routes())
        .merge(budget::routes())
}

/// OpenAPI document served next to the Swagger UI.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weektally API",
        description = "Weekly expenses, budgets and CSV export"
    ),
    paths(
        health::health_check,
        expenses::list_expenses,
        expenses::get_expense,
        expenses::list_by_week,
        expenses::export_week,
        expenses::create_expense,
        expenses::update_expense,
        expenses::delete_expense,
        budget::set_budget,
        budget::weekly_summary,
    ),
    components(schemas(
        Expense,
        CreateExpenseInput,
        ExpensePatch,
        WeeklyBudget,
        SetBudgetInput,
        WeeklySummary,
        ErrorResponse,
        MessageResponse,
        health::HealthResponse,
    )),
    tags(
        (name = "expenses", description = "Expense records"),
        (name = "budget", description = "Weekly budgets")
    )
)]
pub struct ApiDoc;

/// Optional `?year=` narrowing for week queries.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct YearQuery {
    /// Calendar year of the expense date.
    pub year: Option<i32>,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable code such as `NOT_FOUND`.
    pub error: String,
    /// Human-readable detail.
    pub message: String,
}

/// Confirmation body.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Confirmation text.
    pub message: String,
}

/// Renders an application error as `{error, message}`.
pub(crate) fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %err, "Request failed");
    }

    (
        status,
        Json(ErrorResponse {
            error: err.error_code().to_string(),
            message: err.message().to_string(),
        }),
    )
        .into_response()
}

pub(crate) fn json_rejection(rejection: &JsonRejection) -> Response {
    error_response(&AppError::Validation(rejection.body_text()))
}

pub(crate) fn query_rejection(rejection: &QueryRejection) -> Response {
    error_response(&AppError::Validation(rejection.body_text()))
}

/// Parses a numeric path segment such as a week or year.
pub(crate) fn parse_segment<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, Response> {
    raw.trim()
        .parse()
        .map_err(|_| error_response(&AppError::Validation(format!("Invalid {name}: {raw}"))))
}


#[cfg(test)]
mod docs_tests {
    use axum::http::{StatusCode, header};

    use crate::OPENAPI_PATH;
    use crate::test_support::{app, body_bytes, raw, send};

    #[tokio::test]
    async fn test_swagger_ui_is_served() {
        let app = app().await;
        let response = raw(&app, "GET", "/swagger/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
        assert!(!body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_openapi_document_lists_every_endpoint() {
        let app = app().await;
        let (status, doc) = send(&app, "GET", OPENAPI_PATH, None).await;
        assert_eq!(status, StatusCode::OK);

        let paths = doc["paths"].as_object().unwrap();
        for path in [
            "/api/health",
            "/api/expenses",
            "/api/expenses/{id}",
            "/api/expenses/week/{week}",
            "/api/expenses/week/{week}/export",
            "/api/budget",
            "/api/budget/{year}/{week}",
        ] {
            assert!(paths.contains_key(path), "{path}");
        }
        assert!(paths["/api/expenses/{id}"]["put"].is_object());
        assert!(paths["/api/expenses/{id}"]["delete"].is_object());

        let schemas = doc["components"]["schemas"].as_object().unwrap();
        for schema in [
            "Expense",
            "CreateExpenseInput",
            "ExpensePatch",
            "WeeklyBudget",
            "SetBudgetInput",
            "WeeklySummary",
        ] {
            assert!(schemas.contains_key(schema), "{schema}");
        }
    }
}
