use axum::extract::State;
use axum::{routing::get, Json, Router};
use panel_core::notice::Locale;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Language notices are rendered in.
    pub locale: Locale,
    /// Reads currently held by the query cache.
    pub cached_queries: usize,
}

/// GET /health
///
/// Liveness of the panel process only; the hosted backend is not probed.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        locale: state.config.locale,
        cached_queries: state.cache.len().await,
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
