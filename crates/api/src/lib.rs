//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Authentication middleware
//! - Error responses

pub mod error;
pub mod middleware;
pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::AUTHORIZATION;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

use sheetwise_core::extraction::Reconciler;
use sheetwise_core::qa::ChatCompletionClient;
use sheetwise_core::query::QueryService;
use sheetwise_db::{BalanceSheetRepository, UserRepository};
use sheetwise_shared::JwtService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Language model used to answer questions.
    pub llm: Arc<ChatCompletionClient>,
    /// Directory uploaded PDFs are written to.
    pub upload_dir: Arc<PathBuf>,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

impl AppState {
    /// User repository over the shared pool.
    #[must_use]
    pub fn users(&self) -> UserRepository {
        UserRepository::new((*self.db).clone())
    }

    /// Access-scoped query service over the shared pool.
    #[must_use]
    pub fn queries(&self) -> QueryService<BalanceSheetRepository> {
        QueryService::new(self.record_store())
    }

    /// Reconciler writing into the shared pool.
    #[must_use]
    pub fn reconciler(&self) -> Reconciler<BalanceSheetRepository> {
        Reconciler::new(self.record_store())
    }

    /// Record store over the shared pool.
    #[must_use]
    pub fn record_store(&self) -> Arc<BalanceSheetRepository> {
        Arc::new(BalanceSheetRepository::new((*self.db).clone()))
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(SetSensitiveRequestHeadersLayer::new(std::iter::once(
            AUTHORIZATION,
        )))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
