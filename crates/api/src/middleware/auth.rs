//! Bearer-token extractor for panel sessions.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use panel_core::error::CoreError;
use panel_core::types::UserId;

use crate::auth::jwt::{validate_token, Claims};
use crate::error::AppError;
use crate::state::AppState;

/// Identity behind a valid panel token.
///
/// Rejects with 401 (and a redirect hint to the login page) when the header
/// is missing, malformed, or the token does not validate.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: String,
    /// Role when the token was issued; may be stale.
    pub role: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected panel token");
            unauthorized("Invalid or expired token")
        })?;

        Ok(claims.into())
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?
        .to_str()
        .map_err(|_| unauthorized("Authorization header is not valid text"))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("Expected: Bearer <token>"))
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}
