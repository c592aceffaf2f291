//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login           -> login
/// POST /password-reset  -> request_password_reset
/// GET  /session         -> session (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/password-reset", post(auth::request_password_reset))
        .route("/session", get(auth::session))
}
