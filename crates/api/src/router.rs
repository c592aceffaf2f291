//! Router assembly shared by the binary and the integration tests.

use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// `/health` plus the `/api/v1` tree, wrapped in the panel's middleware.
pub fn build_app_router(state: AppState) -> Router {
    let config = state.config.clone();

    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .with_state(state);

    with_middleware(app, &config)
}

/// Outermost first: CORS, request id, tracing, id propagation, timeout,
/// panic recovery.
fn with_middleware(app: Router, config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    app.layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(build_cors_layer(&config.cors_origins))
}

/// Span carrying method, path and the id assigned by `SetRequestIdLayer`.
fn request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id,
    )
}

/// CORS for the panel front-end. An unparsable origin aborts start-up.
pub fn build_cors_layer(cors_origins: &[String]) -> CorsLayer {
    let origins: Vec<_> = cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{origin}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(600))
}
