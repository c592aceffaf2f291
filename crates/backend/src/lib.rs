//! Client for the hosted backend-as-a-service the panel delegates to.
//!
//! [`Backend`] is the seam the HTTP service depends on. [`client::BackendClient`]
//! talks to the real service (GoTrue-style auth under `/auth/v1`, a
//! PostgREST-style query layer under `/rest/v1`); [`memory::InMemoryBackend`]
//! stands in for it in tests.

pub mod client;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "memory"))]
pub mod memory;

use async_trait::async_trait;
use panel_core::profile::{Profile, ProfileUpdate};
use panel_core::types::UserId;

pub use client::BackendClient;
pub use config::BackendConfig;
pub use error::BackendError;

/// Identity returned by a successful password sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: UserId,
    pub email: String,
}

/// Operations the panel needs from the hosted backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Check an e-mail/password pair with the identity provider.
    ///
    /// Every credential problem surfaces as [`BackendError::InvalidCredentials`].
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackendError>;

    /// Ask the identity provider to e-mail a password-reset link.
    ///
    /// Succeeds for unknown addresses too. A repeated request within the
    /// provider's cool-down surfaces as [`BackendError::RateLimited`].
    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), BackendError>;

    /// Role column of the subject's profile row, or `None` when no row exists.
    async fn fetch_role(&self, user_id: &str) -> Result<Option<String>, BackendError>;

    /// All profiles, ordered by `active` ascending.
    async fn list_profiles(&self) -> Result<Vec<Profile>, BackendError>;

    async fn find_profile(&self, user_id: &str) -> Result<Option<Profile>, BackendError>;

    /// Overwrite name, surname and active. Returns the row as stored after
    /// the write, or `None` when the filter matched nothing.
    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<Option<Profile>, BackendError>;
}
