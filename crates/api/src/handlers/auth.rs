//! Handlers for the `/auth` resource (login, password reset, session).

use axum::extract::State;
use axum::Json;
use panel_backend::BackendError;
use panel_core::email::{check_email, EmailCheck};
use panel_core::error::CoreError;
use panel_core::navigation::{resolve_return_to, PASSWORD_PATH};
use panel_core::notice::Notice;
use panel_core::roles::is_admin;
use panel_core::types::UserId;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, NoticeResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Page the operator was on before being sent to the login form.
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Request body for `POST /auth/password-reset`.
#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    #[serde(default)]
    pub email: String,
}

/// Successful admin login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    /// Where the front-end should navigate next.
    pub redirect_to: String,
    pub user: SessionInfo,
}

/// Identity carried by a panel session.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub id: UserId,
    pub email: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Check the credentials with the identity provider, then require the
/// subject's profile to carry the admin role. Only then is a token issued.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let locale = state.config.locale;
    let login_failed = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        ))
        .with_notice(Notice::LoginFailed.render(locale))
    };

    if input.email.is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Email and password are required".into(),
        )));
    }

    // 1. Authenticate. The caller never learns why a sign-in failed.
    let session = match state
        .backend
        .sign_in_with_password(&input.email, &input.password)
        .await
    {
        Ok(session) => session,
        Err(BackendError::InvalidCredentials) => {
            tracing::info!("Login rejected by identity provider");
            return Err(login_failed());
        }
        Err(e) => {
            return Err(AppError::Backend(e).with_notice(Notice::LoginFailed.render(locale)));
        }
    };

    // 2. Authorize against the profile row.
    let role = fetch_own_role(&state, &session.user_id).await?;
    if !is_admin(&role) {
        tracing::info!(user_id = %session.user_id, role = %role, "Login denied: not an admin");
        return Err(permission_denied(&state, "Admin role required"));
    }

    // 3. Issue the panel session.
    let access_token =
        generate_access_token(&session.user_id, &session.email, &role, &state.config.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = %session.user_id, "Admin logged in");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_ttl_secs(),
        redirect_to: resolve_return_to(input.return_to.as_deref()),
        user: SessionInfo {
            id: session.user_id,
            email: session.email,
            role,
        },
    }))
}

/// POST /api/v1/auth/password-reset
///
/// Ask the identity provider to send a reset link. The answer is the same
/// whether or not an account exists for the address.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(input): Json<PasswordResetRequest>,
) -> AppResult<Json<NoticeResponse<()>>> {
    let locale = state.config.locale;

    match check_email(&input.email) {
        EmailCheck::Valid => {}
        EmailCheck::Missing => {
            return Err(
                AppError::Core(CoreError::Validation("Email is required".into()))
                    .with_notice(Notice::ResetEmailMissing.render(locale)),
            );
        }
        EmailCheck::Malformed => {
            return Err(
                AppError::Core(CoreError::Validation("Email is not valid".into()))
                    .with_notice(Notice::ResetEmailInvalid.render(locale)),
            );
        }
    }

    let redirect_to = format!("{}{PASSWORD_PATH}", state.config.public_origin);
    match state
        .backend
        .reset_password_for_email(&input.email, &redirect_to)
        .await
    {
        Ok(()) => {}
        // A reset for this address is already pending; same answer as a fresh one.
        Err(BackendError::RateLimited) => {
            tracing::info!("Password reset already requested, acknowledging");
        }
        Err(e) => {
            return Err(AppError::Backend(e).with_notice(Notice::ResetRequestFailed.render(locale)));
        }
    }

    Ok(Json(NoticeResponse {
        data: (),
        notice: Notice::ResetEmailSent.render(locale),
    }))
}

/// GET /api/v1/auth/session
///
/// Identity behind the presented token.
pub async fn session(user: AuthUser) -> Json<DataResponse<SessionInfo>> {
    Json(DataResponse {
        data: SessionInfo {
            id: user.user_id,
            email: user.email,
            role: user.role,
        },
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Role column of the caller's own profile. A missing row is a denial.
async fn fetch_own_role(state: &AppState, user_id: &str) -> AppResult<String> {
    state
        .backend
        .fetch_role(user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(user_id, "Authenticated subject has no profile row");
            permission_denied(state, "No profile for this account")
        })
}

fn permission_denied(state: &AppState, reason: &str) -> AppError {
    AppError::Core(CoreError::Forbidden(reason.to_string()))
        .with_notice(Notice::PermissionDenied.render(state.config.locale))
}
