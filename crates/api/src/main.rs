use std::sync::Arc;

use panel_backend::{BackendClient, BackendConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use panel_api::config::ServerConfig;
use panel_api::router::build_app_router;
use panel_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    // LOG_FORMAT=json switches to one JSON object per line.
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "panel_api=debug,panel_backend=debug,tower_http=debug".into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        locale = ?config.locale,
        cache_ttl_secs = config.cache_ttl_secs,
        "Loaded server configuration"
    );

    // --- Backend ---
    let backend_config = BackendConfig::from_env();
    tracing::info!(url = %backend_config.url, "Using hosted backend");
    let backend = BackendClient::new(backend_config).expect("Failed to build backend HTTP client");

    // --- App state + router ---
    let addr = config.socket_addr();
    let state = AppState::new(Arc::new(backend), config);
    let app = build_app_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
