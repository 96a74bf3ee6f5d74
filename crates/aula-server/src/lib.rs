//! Academic records API server library logic.

pub mod api;
pub mod config;

use aula_db::DbPool;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across all request handlers.
///
/// The API layer holds no per-request state beyond this: the only
/// persistent state in the system is the SQLite database itself.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
}

/// Maximum request body size (64 KiB). A user record is tiny; anything
/// larger is a malformed or hostile request.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::root_handler))
        .route("/health", get(health))
        .route("/usuarios/", post(api::create_user_handler))
        .route("/reportes/secciones", get(api::section_report_handler))
        .route(
            "/reportes/conteo-estudiantes-docente",
            get(api::teacher_count_report_handler),
        )
        .route(
            "/reportes/objetivos-estudiantes",
            get(api::student_objectives_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
