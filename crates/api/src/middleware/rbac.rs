//! Role-based access control extractor.
//!
//! The profile's role column is authoritative, so the token's role claim is
//! only a first filter: the role is read again from the backend on every
//! admin request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use panel_core::error::CoreError;
use panel_core::notice::Notice;
use panel_core::roles::is_admin;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// A caller whose profile currently holds the `admin` role.
///
/// 401 without a valid token, 403 (with the permission-denied notice) when
/// either the token or the live profile row says otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let locale = state.config.locale;
        let denied = || {
            AppError::Core(CoreError::Forbidden("Admin role required".into()))
                .with_notice(Notice::PermissionDenied.render(locale))
        };

        if !is_admin(&user.role) {
            return Err(denied());
        }

        let current_role = state.backend.fetch_role(&user.user_id).await?;
        if !current_role.as_deref().is_some_and(is_admin) {
            tracing::info!(user_id = %user.user_id, "Admin role revoked since login");
            return Err(denied());
        }

        Ok(RequireAdmin(user))
    }
}
