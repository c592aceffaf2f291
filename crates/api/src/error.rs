use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use panel_backend::BackendError;
use panel_core::error::CoreError;
use panel_core::navigation::{LOGIN_PATH, PERMISSIONS_PATH};
use panel_core::notice::RenderedNotice;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, [`BackendError`] for failures of
/// the hosted backend, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `panel_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The hosted backend failed or refused the call.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Any of the above, plus a notice for the operator.
    #[error("{error}")]
    WithNotice {
        error: Box<AppError>,
        notice: RenderedNotice,
    },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Attach a user-facing notice to this error.
    pub fn with_notice(self, notice: RenderedNotice) -> Self {
        AppError::WithNotice {
            error: Box::new(self),
            notice,
        }
    }

    /// HTTP status, error code, and client-safe message for this error.
    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            },

            // --- Backend errors ---
            AppError::Backend(err) => classify_backend_error(err),

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }

            AppError::WithNotice { error, .. } => error.classify(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();

        let mut body = json!({
            "error": message,
            "code": code,
        });

        // Tell the front-end where to navigate on auth failures.
        let redirect = match status {
            StatusCode::UNAUTHORIZED => Some(LOGIN_PATH),
            StatusCode::FORBIDDEN => Some(PERMISSIONS_PATH),
            _ => None,
        };
        if let Some(path) = redirect {
            body["redirect"] = json!(path);
        }

        if let AppError::WithNotice { notice, .. } = &self {
            body["notice"] = json!(notice);
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a backend error into an HTTP status, error code, and message.
///
/// - Rejected credentials map to 401 without saying why.
/// - Rate limiting maps to 429.
/// - Everything else maps to 502 with a sanitized message.
fn classify_backend_error(err: &BackendError) -> (StatusCode, &'static str, String) {
    match err {
        BackendError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Invalid email or password".to_string(),
        ),
        BackendError::RateLimited => (
            StatusCode::TOO_MANY_REQUESTS,
            "RATE_LIMITED",
            "Too many requests, try again later".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Backend error");
            (
                StatusCode::BAD_GATEWAY,
                "BACKEND_ERROR",
                "The backend service could not complete the request".to_string(),
            )
        }
    }
}
