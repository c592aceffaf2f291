use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use panel_core::notice::Locale;

use crate::auth::jwt::JwtConfig;

const DEV_FRONT_END: &str = "http://localhost:5173";

/// Panel server settings, read once at start-up.
///
/// | Env Var                | Default                 |
/// |------------------------|-------------------------|
/// | `HOST`                 | `0.0.0.0`               |
/// | `PORT`                 | `3000`                  |
/// | `CORS_ORIGINS`         | `http://localhost:5173` |
/// | `REQUEST_TIMEOUT_SECS` | `30`                    |
/// | `PUBLIC_ORIGIN`        | `http://localhost:5173` |
/// | `PANEL_LOCALE`         | `pl`                    |
/// | `QUERY_CACHE_TTL_SECS` | `5`                     |
///
/// JWT settings come from [`JwtConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated in `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Origin of the browser front-end; password-reset links point back here.
    pub public_origin: String,
    /// Language of user-facing notices.
    pub locale: Locale,
    /// Freshness of cached reads; `0` turns the cache off.
    pub cache_ttl_secs: u64,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// # Panics
    ///
    /// Panics on any value that does not parse. A misconfigured panel should
    /// not start.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            cors_origins: parse_origins(&env_or("CORS_ORIGINS", DEV_FRONT_END.to_string())),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            public_origin: env_or("PUBLIC_ORIGIN", DEV_FRONT_END.to_string())
                .trim_end_matches('/')
                .to_string(),
            locale: env_or("PANEL_LOCALE", Locale::Pl),
            cache_ttl_secs: env_or("QUERY_CACHE_TTL_SECS", 5),
            jwt: JwtConfig::from_env(),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// # Panics
    ///
    /// Panics if `host` is not an IP address.
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = self
            .host
            .parse()
            .unwrap_or_else(|e| panic!("HOST '{}' is not an IP address: {e}", self.host));
        SocketAddr::new(ip, self.port)
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| origin.trim_end_matches('/').to_string())
        .collect()
}
