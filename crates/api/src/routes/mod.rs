pub mod auth;
pub mod health;
pub mod profiles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                     login (public)
/// /auth/password-reset            request reset e-mail (public)
/// /auth/session                   current session (requires auth)
///
/// /admin/profiles                 list (admin only)
/// /admin/profiles/{id}            get, update (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin/profiles", profiles::router())
}
