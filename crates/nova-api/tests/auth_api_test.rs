//! Registration, login, and verification over the HTTP router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use nova_api::{router, AppState};
use nova_auth::TokenSigner;
use nova_core::defaults::TOKEN_TTL_SECS;
use nova_db::test_fixtures::memory_db;
use nova_inference::MockBackend;

async fn test_app() -> Router {
    let db = memory_db().await;
    let state = AppState::new(
        db,
        Arc::new(MockBackend::new()),
        TokenSigner::new("test-secret", TOKEN_TTL_SECS),
    );
    router(state)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn register_body(username: &str, email: &str) -> Value {
    json!({
        "username": username,
        "email": email,
        "password": "hunter22",
    })
}

#[tokio::test]
async fn register_returns_token_and_public_user() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        post_json("/api/auth/register", register_body("alice", "alice@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    // The hash must never appear in the response.
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_email_is_conflict_regardless_of_username() {
    let app = test_app().await;

    send(
        &app,
        post_json("/api/auth/register", register_body("alice", "alice@example.com")),
    )
    .await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/auth/register",
            register_body("different-name", "alice@example.com"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already in use");
}

#[tokio::test]
async fn wrong_password_never_leaks_account_existence() {
    let app = test_app().await;

    send(
        &app,
        post_json("/api/auth/register", register_body("alice", "alice@example.com")),
    )
    .await;

    let wrong = json!({"email": "alice@example.com", "password": "not-it"});
    let unknown = json!({"email": "ghost@example.com", "password": "not-it"});

    // Two sequential wrong-password attempts and one unknown-email attempt
    // all produce the identical 401.
    let (first_status, first_body) = send(&app, post_json("/api/auth/login", wrong.clone())).await;
    let (second_status, second_body) = send(&app, post_json("/api/auth/login", wrong)).await;
    let (ghost_status, ghost_body) = send(&app, post_json("/api/auth/login", unknown)).await;

    for status in [first_status, second_status, ghost_status] {
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
    assert_eq!(first_body["error"], "Invalid email or password");
    assert_eq!(second_body["error"], first_body["error"]);
    assert_eq!(ghost_body["error"], first_body["error"]);
}

#[tokio::test]
async fn login_then_verify_round_trip() {
    let app = test_app().await;

    send(
        &app,
        post_json("/api/auth/register", register_body("alice", "alice@example.com")),
    )
    .await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/auth/login",
            json!({"email": "alice@example.com", "password": "hunter22"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/api/auth/verify")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "alice");
}

#[tokio::test]
async fn verify_without_token_is_unauthorized() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/api/auth/verify")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authorization token required");
}

#[tokio::test]
async fn verify_with_garbage_token_is_unauthorized() {
    let app = test_app().await;

    let (status, _) = send(
        &app,
        Request::builder()
            .uri("/api/auth/verify")
            .header(header::AUTHORIZATION, "Bearer not.a.token")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_registration_input_is_bad_request() {
    let app = test_app().await;

    // Username too short.
    let (status, _) = send(
        &app,
        post_json("/api/auth/register", register_body("ab", "ab@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Password too short.
    let (status, body) = send(
        &app,
        post_json(
            "/api/auth/register",
            json!({"username": "carol", "email": "carol@example.com", "password": "12345"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password must be at least 6 characters long");
}
