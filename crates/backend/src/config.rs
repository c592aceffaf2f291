use std::time::Duration;

/// Default timeout for a single backend request.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`. No trailing slash.
    pub url: String,
    /// Public key sent with identity-provider calls.
    pub anon_key: String,
    /// Key used for queries against the `profiles` table.
    pub service_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let anon_key = anon_key.into();
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            service_key: anon_key.clone(),
            anon_key,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_service_key(mut self, key: impl Into<String>) -> Self {
        self.service_key = key.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load backend settings from environment variables.
    ///
    /// | Env Var                | Required | Default        |
    /// |------------------------|----------|----------------|
    /// | `BACKEND_URL`          | **yes**  | --             |
    /// | `BACKEND_ANON_KEY`     | **yes**  | --             |
    /// | `BACKEND_SERVICE_KEY`  | no       | anon key       |
    /// | `BACKEND_TIMEOUT_SECS` | no       | `10`           |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or empty, or if the timeout
    /// does not parse. The panel cannot do anything without its backend.
    pub fn from_env() -> Self {
        let url = std::env::var("BACKEND_URL").expect("BACKEND_URL must be set in the environment");
        assert!(!url.is_empty(), "BACKEND_URL must not be empty");

        let anon_key = std::env::var("BACKEND_ANON_KEY")
            .expect("BACKEND_ANON_KEY must be set in the environment");
        assert!(!anon_key.is_empty(), "BACKEND_ANON_KEY must not be empty");

        let timeout_secs: u64 = std::env::var("BACKEND_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("BACKEND_TIMEOUT_SECS must be a valid u64");

        let mut config =
            Self::new(url, anon_key).with_timeout(Duration::from_secs(timeout_secs));
        if let Ok(service_key) = std::env::var("BACKEND_SERVICE_KEY") {
            if !service_key.is_empty() {
                config = config.with_service_key(service_key);
            }
        }
        config
    }
}
