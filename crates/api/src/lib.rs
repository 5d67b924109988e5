//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for expenses, weekly budgets and CSV export
//! - JSON error responses built from `AppError`
//! - OpenAPI document and Swagger UI under `/swagger`
//! - Application state wiring the services to the database

pub mod routes;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use weektally_core::budget::BudgetService;
use weektally_core::expense::ExpenseService;
use weektally_core::export::ExportService;
use weektally_db::{ExpenseRepository, WeeklyBudgetRepository};

use crate::routes::ApiDoc;

/// Where the generated OpenAPI document is served.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Expense CRUD service.
    pub expenses: ExpenseService,
    /// Weekly budget service.
    pub budgets: BudgetService,
    /// CSV export service.
    pub exports: ExportService,
}

impl AppState {
    /// Builds the services over a single connection pool.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        let expense_repo = Arc::new(ExpenseRepository::new(db.clone()));
        let budget_repo = Arc::new(WeeklyBudgetRepository::new(db));

        Self {
            expenses: ExpenseService::new(expense_repo.clone()),
            budgets: BudgetService::new(budget_repo, expense_repo.clone()),
            exports: ExportService::new(expense_repo),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes())
        .merge(SwaggerUi::new("/swagger").url(OPENAPI_PATH, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
