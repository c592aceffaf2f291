//! HTTP-level integration tests for the profile directory and editor.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, get, get_auth, login, profile, put_json_auth, seeded_backend,
    ADMIN_ID, STAFF_ID,
};
use panel_backend::memory::InMemoryBackend;
use panel_core::profile::Profile;
use serde_json::json;

fn editor_backend() -> Arc<InMemoryBackend> {
    Arc::new(
        InMemoryBackend::new()
            .with_account("root@example.com", "pw", "root")
            .with_profile(profile("root", "admin", "Root", "User", true))
            .with_profile(profile("u1", "admin", "A", "B", false)),
    )
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listing_puts_inactive_profiles_first() {
    let backend = Arc::new(
        InMemoryBackend::new()
            .with_account("root@example.com", "pw", "root")
            .with_profile(profile("root", "admin", "R", "R", true))
            .with_profile(profile("a", "user", "A", "A", false))
            .with_profile(profile("b", "user", "B", "B", true))
            .with_profile(profile("c", "user", "C", "C", false)),
    );
    let app = common::build_test_app(backend);
    let token = login(&app, "root@example.com", "pw").await;

    let response = get_auth(&app, "/api/v1/admin/profiles", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let flags: Vec<bool> = json["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|p| p["active"].as_bool().expect("active should be a bool"))
        .collect();
    assert_eq!(flags, [false, false, true, true]);
}

#[tokio::test]
async fn listing_is_reordered_when_backend_ignores_ordering() {
    let backend = Arc::new(
        InMemoryBackend::new()
            .with_account("root@example.com", "pw", "root")
            .with_profile(profile("root", "admin", "R", "R", true))
            .with_profile(profile("a", "user", "A", "A", false))
            .with_profile(profile("b", "user", "B", "B", true))
            .with_profile(profile("c", "user", "C", "C", false)),
    );
    backend.set_unordered_listing(true);
    let app = common::build_test_app(Arc::clone(&backend));
    let token = login(&app, "root@example.com", "pw").await;

    let json = body_json(get_auth(&app, "/api/v1/admin/profiles", &token).await).await;
    let ids: Vec<&str> = json["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|p| p["user_id"].as_str().expect("user_id should be a string"))
        .collect();
    assert_eq!(ids, ["a", "c", "root", "b"]);
}

#[tokio::test]
async fn null_names_render_as_empty_strings() {
    let backend = Arc::new(
        InMemoryBackend::new()
            .with_account("root@example.com", "pw", "root")
            .with_profile(profile("root", "admin", "R", "R", true))
            .with_profile(Profile {
                user_id: "blank".to_string(),
                role: "user".to_string(),
                name: None,
                surname: None,
                active: false,
            }),
    );
    let app = common::build_test_app(backend);
    let token = login(&app, "root@example.com", "pw").await;

    let response = get_auth(&app, "/api/v1/admin/profiles/blank", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["profile"]["name"], "");
    assert_eq!(json["data"]["profile"]["surname"], "");
}

#[tokio::test]
async fn directory_requires_a_token() {
    let app = common::build_test_app(seeded_backend());

    let response = get(&app, "/api/v1/admin/profiles").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn revoked_admin_loses_access_immediately() {
    let backend = seeded_backend();
    let app = common::build_test_app(Arc::clone(&backend));
    let token = admin_token(&app).await;

    backend.set_role(ADMIN_ID, "user");

    let response = get_auth(&app, "/api/v1/admin/profiles", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["redirect"], "/admin/permissions");
}

#[tokio::test]
async fn backend_outage_on_listing_is_reported() {
    let backend = seeded_backend();
    let app = common::build_test_app(Arc::clone(&backend));
    let token = admin_token(&app).await;

    backend.set_unavailable(true);

    let response = get_auth(&app, "/api/v1/admin/profiles", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_profile_returns_row() {
    let app = common::build_test_app(seeded_backend());
    let token = admin_token(&app).await;

    let response = get_auth(&app, &format!("/api/v1/admin/profiles/{STAFF_ID}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let p = &json["data"]["profile"];
    assert_eq!(p["user_id"], STAFF_ID);
    assert_eq!(p["role"], "user");
    assert_eq!(p["name"], "Stan");
    assert_eq!(p["surname"], "Staff");
    assert_eq!(p["active"], false);
}

#[tokio::test]
async fn get_unknown_profile_is_null_not_error() {
    let app = common::build_test_app(seeded_backend());
    let token = admin_token(&app).await;

    let response = get_auth(&app, "/api/v1/admin/profiles/does-not-exist", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"]["profile"].is_null());
}

#[tokio::test]
async fn update_then_get_returns_new_values() {
    let backend = editor_backend();
    let app = common::build_test_app(Arc::clone(&backend));
    let token = login(&app, "root@example.com", "pw").await;

    // Prime the cache so the follow-up read proves invalidation.
    let before = body_json(get_auth(&app, "/api/v1/admin/profiles/u1", &token).await).await;
    assert_eq!(before["data"]["profile"]["name"], "A");

    let body = json!({ "name": "A2", "surname": "B2", "active": true });
    let response = put_json_auth(&app, "/api/v1/admin/profiles/u1", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["notice"]["level"], "success");
    assert_eq!(json["data"]["profile"]["name"], "A2");

    let after = body_json(get_auth(&app, "/api/v1/admin/profiles/u1", &token).await).await;
    assert_eq!(
        after["data"]["profile"],
        json!({
            "user_id": "u1",
            "role": "admin",
            "name": "A2",
            "surname": "B2",
            "active": true,
        })
    );
}

#[tokio::test]
async fn update_ignores_role_in_payload() {
    let backend = seeded_backend();
    let app = common::build_test_app(Arc::clone(&backend));
    let token = admin_token(&app).await;

    let body = json!({ "role": "admin", "name": "Stan", "surname": "Staff", "active": true });
    let response =
        put_json_auth(&app, &format!("/api/v1/admin/profiles/{STAFF_ID}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = backend.profile(STAFF_ID).expect("row should exist");
    assert_eq!(stored.role, "user");
    assert!(stored.active);
}

#[tokio::test]
async fn update_refreshes_directory_listing() {
    let backend = seeded_backend();
    let app = common::build_test_app(Arc::clone(&backend));
    let token = admin_token(&app).await;

    let listing = body_json(get_auth(&app, "/api/v1/admin/profiles", &token).await).await;
    assert_eq!(listing["data"][0]["user_id"], STAFF_ID);

    let body = json!({ "name": "Stan", "surname": "Staff", "active": true });
    put_json_auth(&app, &format!("/api/v1/admin/profiles/{STAFF_ID}"), body, &token).await;

    let listing = body_json(get_auth(&app, "/api/v1/admin/profiles", &token).await).await;
    let staff = listing["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .find(|p| p["user_id"] == STAFF_ID)
        .expect("staff should be listed")
        .clone();
    assert_eq!(staff["active"], true);
}

#[tokio::test]
async fn failed_update_reports_and_keeps_state() {
    let backend = editor_backend();
    let app = common::build_test_app(Arc::clone(&backend));
    let token = login(&app, "root@example.com", "pw").await;

    backend.set_fail_writes(true);
    let body = json!({ "name": "X", "surname": "Y", "active": true });
    let response = put_json_auth(&app, "/api/v1/admin/profiles/u1", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["notice"]["title"], "Something went wrong");
    assert_eq!(json["notice"]["description"], "An error occurred while saving");

    let stored = backend.profile("u1").expect("row should exist");
    assert_eq!(stored.name.as_deref(), Some("A"));
    assert!(!stored.active);
}

#[tokio::test]
async fn update_of_unknown_profile_matches_nothing() {
    let app = common::build_test_app(seeded_backend());
    let token = admin_token(&app).await;

    let body = json!({ "name": "N", "surname": "S", "active": false });
    let response = put_json_auth(&app, "/api/v1/admin/profiles/nobody", body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"]["profile"].is_null());
}

#[tokio::test]
async fn non_admin_token_cannot_edit() {
    let backend = seeded_backend();
    let app = common::build_test_app(Arc::clone(&backend));
    let config = common::test_config();
    let token = panel_api::auth::jwt::generate_access_token(
        STAFF_ID,
        "staff@example.com",
        "user",
        &config.jwt,
    )
    .expect("token generation should succeed");

    let body = json!({ "name": "Hacked", "surname": "", "active": true });
    let response =
        put_json_auth(&app, &format!("/api/v1/admin/profiles/{ADMIN_ID}"), body, &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(backend.profile(ADMIN_ID).and_then(|p| p.name).as_deref(), Some("Ada"));
}
