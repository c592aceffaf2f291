/// Errors from the hosted backend layer.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status code.
    #[error("Backend API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The identity provider rejected the sign-in.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// The backend refused the call because of rate limiting (HTTP 429).
    #[error("Rate limited by backend")]
    RateLimited,
}
