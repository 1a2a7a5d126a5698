//! HTTP surface: router assembly, operational endpoints and the server loop

pub mod response;

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use std::future::Future;
use std::net::SocketAddr;
use tower_http::compression::CompressionLayer;

use crate::config::{Config, CorsConfig};
use crate::db::SharedRepository;
use crate::error::{ApiResult, AppError};
use crate::{features, middleware};

/// Full application router: `/`, `/health` and the `/api/v1` features
pub fn create_router(repo: SharedRepository, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(repo.clone())
        .nest("/api/v1", features::router(repo))
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(cors))
}

/// Bind and serve until `shutdown` resolves
pub async fn serve(
    config: &Config,
    repo: SharedRepository,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = create_router(repo, &config.cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, storage = %config.storage, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Airport Server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn health(State(repo): State<SharedRepository>) -> ApiResult<impl IntoResponse> {
    match repo.ping().await {
        Ok(()) => Ok(Json(json!({
            "status": "healthy",
            "storage": repo.backend(),
        }))),
        Err(e) => {
            tracing::error!(error = %e, storage = repo.backend(), "Storage health check failed");
            Err(AppError::Unavailable(format!(
                "{} storage is unreachable",
                repo.backend()
            )))
        },
    }
}
