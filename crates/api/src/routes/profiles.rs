//! Route definitions for the `/admin/profiles` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::profiles;
use crate::state::AppState;

/// Routes mounted at `/admin/profiles`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET /       -> list_profiles
/// GET /{id}   -> get_profile
/// PUT /{id}   -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(profiles::list_profiles))
        .route(
            "/{id}",
            get(profiles::get_profile).put(profiles::update_profile),
        )
}
