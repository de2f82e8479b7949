//! Search and tag endpoints over the HTTP router: query-string parsing,
//! AND tag filtering, and per-user tag counts.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
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

fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn register(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        Request::builder()
            .method(Method::POST)
            .uri("/api/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                    "password": "hunter22",
                })
                .to_string(),
            ))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().unwrap().to_string()
}

async fn create_note(app: &Router, token: &str, title: &str, content: &str, tags: &[&str]) {
    let (status, _) = send(
        app,
        Request::builder()
            .method(Method::POST)
            .uri("/api/notes")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "title": title,
                    "content": content,
                    "summary": "s",
                    "tags": tags,
                })
                .to_string(),
            ))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn tag_list_filters_with_and_semantics() {
    let app = test_app().await;
    let token = register(&app, "alice").await;

    create_note(&app, &token, "Both", "<p>x</p>", &["t1", "t2"]).await;
    create_note(&app, &token, "Only one", "<p>x</p>", &["t1"]).await;

    let (status, body) = send(&app, get("/api/search?tags=t1,t2", &token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Both"]);
}

#[tokio::test]
async fn term_search_matches_substrings_case_insensitively() {
    let app = test_app().await;
    let token = register(&app, "alice").await;

    create_note(&app, &token, "Photosynthesis overview", "<p>x</p>", &[]).await;
    create_note(&app, &token, "Unrelated", "<p>y</p>", &[]).await;

    let (status, body) = send(&app, get("/api/search?q=PHOTO", &token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Photosynthesis overview"]);
}

#[tokio::test]
async fn term_and_tags_combine() {
    let app = test_app().await;
    let token = register(&app, "alice").await;

    create_note(&app, &token, "Tagged match", "<p>osmosis</p>", &["bio"]).await;
    create_note(&app, &token, "Untagged match", "<p>osmosis</p>", &[]).await;
    create_note(&app, &token, "Tagged miss", "<p>other</p>", &["bio"]).await;

    let (status, body) = send(&app, get("/api/search?q=osmosis&tags=bio", &token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Tagged match"]);
}

#[tokio::test]
async fn blank_tags_parameter_is_ignored() {
    let app = test_app().await;
    let token = register(&app, "alice").await;

    create_note(&app, &token, "One", "<p>x</p>", &[]).await;

    let (status, body) = send(&app, get("/api/search?q=One&tags=", &token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["One"]);
}

#[tokio::test]
async fn tag_counts_are_scoped_to_the_caller() {
    let app = test_app().await;
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;

    create_note(&app, &alice, "A1", "<p>x</p>", &["shared", "mine"]).await;
    create_note(&app, &alice, "A2", "<p>x</p>", &["shared"]).await;
    create_note(&app, &bob, "B1", "<p>x</p>", &["shared"]).await;

    let (status, body) = send(&app, get("/api/tags", &alice)).await;
    assert_eq!(status, StatusCode::OK);

    let counts: Vec<(String, i64)> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| {
            (
                t["name"].as_str().unwrap().to_string(),
                t["count"].as_i64().unwrap(),
            )
        })
        .collect();

    // Bob's use of "shared" does not inflate Alice's counts.
    assert_eq!(counts, vec![("shared".to_string(), 2), ("mine".to_string(), 1)]);
}

#[tokio::test]
async fn search_requires_a_token() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/search?q=anything")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
