#![allow(dead_code)]

//! Test infrastructure for mp-server API tests

use mp_server::AppState;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("../crates/mp-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState for testing
pub async fn create_test_app_state() -> AppState {
    AppState {
        pool: create_test_pool().await,
    }
}

/// Build a user request body
pub fn user_json(
    name: &str,
    age: i64,
    gender: &str,
    email: &str,
    city: &str,
    interests: &[&str],
) -> Value {
    json!({
        "name": name,
        "age": age,
        "gender": gender,
        "email": email,
        "city": city,
        "interests": interests,
    })
}

/// Drive one request through the router, returning status and parsed body
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<&Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(value).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let parsed = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, parsed)
}

/// Create a user via the API, asserting success, and return its body
pub async fn create_user(app: &Router, body: &Value) -> Value {
    let (status, parsed) = send_json(app, "POST", "/users/", Some(body)).await;
    assert_eq!(status, StatusCode::OK, "create_user failed: {}", parsed);
    parsed
}
