//! HTTP handlers: the create-user endpoint and the three reports.
//!
//! Every handler acquires its own pooled connection inside
//! `spawn_blocking` and releases it before returning (release is by
//! RAII on every path, including errors). Reports are pure reads and
//! return an empty array for zero rows.

use crate::AppState;
use aula_records::RecordsError;
use aula_types::{NewUser, ObjectiveRow, SectionReportRow, TeacherCountRow};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;

/// API-level errors, mapped to HTTP statuses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<RecordsError> for ApiError {
    fn from(e: RecordsError) -> Self {
        match e {
            // Duplicate cedula or matricula is the client's mistake.
            RecordsError::Duplicate => {
                ApiError::BadRequest("La cédula o matrícula ya existe.".to_string())
            }
            RecordsError::Database(err) => {
                ApiError::InternalServerError(format!("Error en la base de datos: {}", err))
            }
        }
    }
}

/// Handler for `GET /`.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "mensaje": "Bienvenido a la API de Gestión Académica"
    }))
}

/// Handler for `POST /usuarios/`.
///
/// Inserts the record as a single auto-committed row and echoes the
/// validated input back with status 201. A uniqueness violation maps
/// to 400; any other storage error to 500 with the underlying message.
pub async fn create_user_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(user): Json<NewUser>,
) -> Result<(StatusCode, Json<NewUser>), ApiError> {
    let record = user.clone();
    tokio::task::spawn_blocking(move || {
        let conn = state
            .pool
            .get()
            .map_err(|e| ApiError::InternalServerError(format!("db connection failed: {}", e)))?;
        aula_records::insert_user(&conn, &record).map_err(ApiError::from)
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("task join error: {}", e)))??;

    tracing::info!(cedula = %user.cedula, "user created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Runs one report query on a pooled connection off the async runtime.
async fn run_report<T, F>(state: Arc<AppState>, query: F) -> Result<Json<Vec<T>>, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&rusqlite::Connection) -> Result<Vec<T>, RecordsError> + Send + 'static,
{
    let rows = tokio::task::spawn_blocking(move || {
        let conn = state
            .pool
            .get()
            .map_err(|e| ApiError::InternalServerError(format!("db connection failed: {}", e)))?;
        query(&conn).map_err(ApiError::from)
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("task join error: {}", e)))??;

    Ok(Json(rows))
}

/// Handler for `GET /reportes/secciones`.
pub async fn section_report_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<SectionReportRow>>, ApiError> {
    run_report(state, aula_records::section_report).await
}

/// Handler for `GET /reportes/conteo-estudiantes-docente`.
pub async fn teacher_count_report_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<TeacherCountRow>>, ApiError> {
    run_report(state, aula_records::teacher_student_counts).await
}

/// Handler for `GET /reportes/objetivos-estudiantes`.
pub async fn student_objectives_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<ObjectiveRow>>, ApiError> {
    run_report(state, aula_records::student_objectives).await
}
