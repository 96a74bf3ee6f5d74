use aula_db::{create_pool, run_migrations, DbRuntimeSettings};
use aula_server::{app, AppState};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt; // for oneshot

/// Builds the router over a fresh in-memory database with schema and
/// seed applied.
///
/// `pool_max_size` is 1 because every `:memory:` connection is its own
/// database; a single shared connection keeps all requests on the same
/// state.
fn test_app() -> Router {
    let pool = create_pool(
        ":memory:",
        DbRuntimeSettings {
            busy_timeout_ms: 1_000,
            pool_max_size: 1,
        },
    )
    .expect("pool creation should succeed");
    {
        let conn = pool.get().expect("should get a connection");
        run_migrations(&conn).expect("migrations should succeed");
    }
    app(AppState { pool })
}

fn post_usuario(body: Value) -> Request<Body> {
    Request::builder()
        .uri("/usuarios/")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    serde_json::from_slice(&bytes).expect("body should be json")
}

#[tokio::test]
async fn create_user_returns_201_and_echoes_input() {
    let app = test_app();

    let response = app
        .oneshot(post_usuario(json!({
            "cedula": "111-1111111-1",
            "nombre": "Ana",
            "apellido": "Pérez",
            "rol": "E",
            "matricula": "2024-001",
            "fecha_nacimiento": "2005-07-01",
            "sexo": "F",
            "objetivo": "Aprender Rust"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["cedula"], "111-1111111-1");
    assert_eq!(body["nombre"], "Ana");
    assert_eq!(body["apellido"], "Pérez");
    assert_eq!(body["rol"], "E");
    assert_eq!(body["matricula"], "2024-001");
    assert_eq!(body["fecha_nacimiento"], "2005-07-01");
    assert_eq!(body["sexo"], "F");
    assert_eq!(body["objetivo"], "Aprender Rust");
}

#[tokio::test]
async fn create_user_defaults_objetivo() {
    let app = test_app();

    let response = app
        .oneshot(post_usuario(json!({
            "cedula": "222-2222222-2",
            "nombre": "Luis",
            "apellido": "Gómez",
            "rol": "E",
            "matricula": null,
            "fecha_nacimiento": "2004-11-30",
            "sexo": "M"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["objetivo"], "No definido");
    assert_eq!(body["matricula"], Value::Null);
}

#[tokio::test]
async fn duplicate_cedula_returns_400() {
    let app = test_app();

    // The seed already holds this cedula.
    let response = app
        .oneshot(post_usuario(json!({
            "cedula": "444-4444444-4",
            "nombre": "Otro",
            "apellido": "Reyes",
            "rol": "E",
            "matricula": "2024-099",
            "fecha_nacimiento": "2006-01-15",
            "sexo": "M"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "La cédula o matrícula ya existe.");
}

#[tokio::test]
async fn duplicate_matricula_returns_400() {
    let app = test_app();

    let first = app
        .clone()
        .oneshot(post_usuario(json!({
            "cedula": "111-1111111-1",
            "nombre": "Ana",
            "apellido": "Pérez",
            "rol": "E",
            "matricula": "2024-001",
            "fecha_nacimiento": "2005-07-01",
            "sexo": "F"
        })))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(post_usuario(json!({
            "cedula": "222-2222222-2",
            "nombre": "Luis",
            "apellido": "Gómez",
            "rol": "E",
            "matricula": "2024-001",
            "fecha_nacimiento": "2004-11-30",
            "sexo": "M"
        })))
        .await
        .unwrap();

    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body = body_json(second).await;
    assert_eq!(body["error"], "La cédula o matrícula ya existe.");
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let app = test_app();

    // Missing required fields.
    let response = app
        .oneshot(post_usuario(json!({ "cedula": "333-3333333-3" })))
        .await
        .unwrap();

    assert!(
        response.status().is_client_error(),
        "got {}",
        response.status()
    );
}

#[tokio::test]
async fn root_returns_welcome_message() {
    let app = test_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["mensaje"], "Bienvenido a la API de Gestión Académica");
}

#[tokio::test]
async fn health_check_returns_ok() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
