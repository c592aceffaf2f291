//! Panel access tokens.
//!
//! The identity provider only proves the password. Once the profile role has
//! been checked the panel signs its own HS256 token, scoped to this service
//! by the `iss` claim.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use panel_core::types::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer stamped into and required from every panel token.
pub const TOKEN_ISSUER: &str = "staff-panel";

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Identity-provider subject id.
    pub sub: UserId,
    pub email: String,
    /// Profile role at login. Admin routes re-read it from the backend.
    pub role: String,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    fn issue(user_id: &str, email: &str, role: &str, ttl_secs: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iss: TOKEN_ISSUER.to_string(),
            exp: now + ttl_secs,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// `JWT_SECRET` is required; `JWT_ACCESS_EXPIRY_MINS` defaults to 60.
    ///
    /// # Panics
    ///
    /// Panics if the secret is missing or empty, or the expiry is not a
    /// positive integer.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .map(|v| v.parse().expect("JWT_ACCESS_EXPIRY_MINS must be an integer"))
            .unwrap_or(DEFAULT_ACCESS_EXPIRY_MINS);
        assert!(
            access_token_expiry_mins > 0,
            "JWT_ACCESS_EXPIRY_MINS must be positive"
        );

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    /// Token lifetime as reported to clients in `expires_in`.
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }
}

/// Sign a token for a subject whose admin role was just confirmed.
pub fn generate_access_token(
    user_id: &str,
    email: &str,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::issue(user_id, email, role, config.access_token_ttl_secs());
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature, expiry and issuer, returning the claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[TOKEN_ISSUER]);
    validation.set_required_spec_claims(&["exp", "sub", "iss"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}
