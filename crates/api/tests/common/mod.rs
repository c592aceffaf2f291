#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use panel_api::auth::jwt::JwtConfig;
use panel_api::config::ServerConfig;
use panel_api::router::build_app_router;
use panel_api::state::AppState;
use panel_backend::memory::InMemoryBackend;
use panel_core::notice::Locale;
use panel_core::profile::Profile;
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct-horse";
pub const ADMIN_ID: &str = "11111111-1111-4111-8111-111111111111";

pub const STAFF_EMAIL: &str = "staff@example.com";
pub const STAFF_PASSWORD: &str = "battery-staple";
pub const STAFF_ID: &str = "22222222-2222-4222-8222-222222222222";

/// Test `ServerConfig`: English notices, cache enabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_origin: "http://panel.test".to_string(),
        locale: Locale::En,
        cache_ttl_secs: 60,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

pub fn profile(user_id: &str, role: &str, name: &str, surname: &str, active: bool) -> Profile {
    Profile {
        user_id: user_id.to_string(),
        role: role.to_string(),
        name: Some(name.to_string()),
        surname: Some(surname.to_string()),
        active,
    }
}

/// Backend seeded with one admin and one non-admin staff member.
pub fn seeded_backend() -> Arc<InMemoryBackend> {
    Arc::new(
        InMemoryBackend::new()
            .with_account(ADMIN_EMAIL, ADMIN_PASSWORD, ADMIN_ID)
            .with_account(STAFF_EMAIL, STAFF_PASSWORD, STAFF_ID)
            .with_profile(profile(ADMIN_ID, "admin", "Ada", "Admin", true))
            .with_profile(profile(STAFF_ID, "user", "Stan", "Staff", false)),
    )
}

/// Build the full application router (same middleware as production) over
/// the given in-memory backend.
pub fn build_test_app(backend: Arc<InMemoryBackend>) -> Router {
    build_app_router(AppState::new(backend, test_config()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("router should not fail")
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Log in through the API and return the access token.
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), 200, "login should succeed");
    body_json(response).await["access_token"]
        .as_str()
        .expect("access_token should be a string")
        .to_string()
}

pub async fn admin_token(app: &Router) -> String {
    login(app, ADMIN_EMAIL, ADMIN_PASSWORD).await
}
