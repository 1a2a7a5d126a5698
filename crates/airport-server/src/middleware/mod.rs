//! HTTP middleware
//!
//! - CORS, configured from [`CorsConfig`]
//! - Request tracing through `tower-http`

use axum::http::{header, HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;

use crate::config::CorsConfig;
use crate::features::shared::CUSTOMER_HEADER;

/// Create CORS layer from configuration
///
/// An empty origin list or `*` allows any origin.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_LANGUAGE,
            header::CONTENT_TYPE,
            HeaderName::from_static(CUSTOMER_HEADER),
        ])
        .max_age(Duration::from_secs(3600));

    if allows_any_origin(config) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "Ignoring unparsable CORS origin");
                    None
                },
            })
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Credentials cannot be combined with a wildcard origin
    if config.allow_credentials && !allows_any_origin(config) {
        cors = cors.allow_credentials(true);
    }

    cors
}

fn allows_any_origin(config: &CorsConfig) -> bool {
    config.allowed_origins.is_empty() || config.allowed_origins.iter().any(|o| o == "*")
}

/// Create tracing/logging layer
pub fn tracing_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Micros),
        )
}
