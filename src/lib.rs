pub mod config;
pub mod error;
pub mod modules;
pub mod services;

use axum::{
    http::Method,
    middleware,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    trace::TraceLayer,
};

use config::Config;
use modules::{api_routes, pages::page_routes};
use services::rate_limit::{create_rate_limiter, spawn_limiter_cleanup, RateLimitLayer};
use services::security::security_headers;
use services::upstream::{UpstreamClient, UpstreamError};

const LIMITER_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

pub struct AppState {
    pub config: Config,
    pub upstream: UpstreamClient,
}

/// Fails only when the HTTP client for the upstream cannot be built.
pub fn create_app(config: Config) -> Result<Router, UpstreamError> {
    let upstream = UpstreamClient::new(config.upstream_base.clone(), config.upstream_timeout())?;
    let rate_limiter = create_rate_limiter(config.rate_limit_per_min);
    spawn_limiter_cleanup(&rate_limiter, LIMITER_CLEANUP_INTERVAL);
    let body_limit = config.body_limit_bytes;
    let public_dir = ServeDir::new(&config.public_dir);

    let state = Arc::new(AppState { config, upstream });

    let app = Router::new()
        .route("/health", get(health_check))
        .merge(page_routes())
        .nest("/api", api_routes())
        .nest_service("/public", public_dir)
        .layer(middleware::from_fn(security_headers))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(RateLimitLayer::new(rate_limiter))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state);

    Ok(app)
}

/// Any origin is mirrored back; no credentials.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
