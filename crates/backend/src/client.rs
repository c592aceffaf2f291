//! HTTP client for the hosted backend.
//!
//! Wraps the identity provider (`/auth/v1`) and the PostgREST query layer
//! (`/rest/v1`) using [`reqwest`].

use async_trait::async_trait;
use panel_core::profile::{Profile, ProfileUpdate, PROFILES_TABLE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;

use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::{AuthSession, Backend};

/// Tells PostgREST to send the affected rows back from a write.
const PREFER_REPRESENTATION: &str = "return=representation";

/// HTTP client for one backend project.
pub struct BackendClient {
    client: reqwest::Client,
    config: BackendConfig,
}

/// Body of a successful `POST /auth/v1/token?grant_type=password`.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RoleRow {
    #[serde(default)]
    role: Option<String>,
}

impl BackendClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{endpoint}", self.config.url)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.config.url)
    }

    /// Identity-provider request carrying the public key.
    fn auth_request(&self, endpoint: &str) -> RequestBuilder {
        self.client
            .post(self.auth_url(endpoint))
            .header("apikey", &self.config.anon_key)
    }

    /// Query-layer request against the `profiles` table.
    fn profiles_request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, self.rest_url(PROFILES_TABLE))
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code.
    ///
    /// 429 maps to [`BackendError::RateLimited`]; any other failure status
    /// becomes [`BackendError::Api`] with the body text attached.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(BackendError::RateLimited);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Parse a PostgREST row set. A `null` body is read as no rows.
    async fn parse_rows<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Vec<T>, BackendError> {
        let rows: Option<Vec<T>> = Self::parse_response(response).await?;
        Ok(rows.unwrap_or_default())
    }
}

/// Collapse a sign-in failure into the variants callers act on.
///
/// The identity provider answers bad credentials with 400 (and some
/// deployments with 401/422, or 429 after repeated attempts); none of those
/// reasons reach the caller.
fn classify_sign_in_error(err: BackendError) -> BackendError {
    match err {
        BackendError::Api { status, body } if (400..500).contains(&status) => {
            tracing::debug!(status, body = %body, "Sign-in rejected by identity provider");
            BackendError::InvalidCredentials
        }
        BackendError::RateLimited => BackendError::InvalidCredentials,
        other => other,
    }
}

#[async_trait]
impl Backend for BackendClient {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackendError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self
            .auth_request("token")
            .query(&[("grant_type", "password")])
            .json(&body)
            .send()
            .await?;

        let token: TokenResponse = Self::parse_response(response)
            .await
            .map_err(classify_sign_in_error)?;

        Ok(AuthSession {
            user_id: token.user.id,
            email: token.user.email.unwrap_or_else(|| email.to_string()),
        })
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), BackendError> {
        let body = serde_json::json!({ "email": email });

        let response = self
            .auth_request("recover")
            .query(&[("redirect_to", redirect_to)])
            .json(&body)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn fetch_role(&self, user_id: &str) -> Result<Option<String>, BackendError> {
        let filter = format!("eq.{user_id}");
        let response = self
            .profiles_request(Method::GET)
            .query(&[("select", "role"), ("user_id", filter.as_str())])
            .send()
            .await?;

        let rows: Vec<RoleRow> = Self::parse_rows(response).await?;
        Ok(rows
            .into_iter()
            .next()
            .map(|row| row.role.unwrap_or_default()))
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, BackendError> {
        let response = self
            .profiles_request(Method::GET)
            .query(&[("select", "*"), ("order", "active.asc")])
            .send()
            .await?;

        Self::parse_rows(response).await
    }

    async fn find_profile(&self, user_id: &str) -> Result<Option<Profile>, BackendError> {
        let filter = format!("eq.{user_id}");
        let response = self
            .profiles_request(Method::GET)
            .query(&[("select", "*"), ("user_id", filter.as_str())])
            .send()
            .await?;

        let rows: Vec<Profile> = Self::parse_rows(response).await?;
        Ok(rows.into_iter().next())
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<Option<Profile>, BackendError> {
        let response = self
            .profiles_request(Method::PATCH)
            .query(&[("user_id", format!("eq.{user_id}"))])
            .header("Prefer", PREFER_REPRESENTATION)
            .json(update)
            .send()
            .await?;

        let rows: Vec<Profile> = Self::parse_rows(response).await?;
        Ok(rows.into_iter().next())
    }
}
