//! Plate Solver HTTP Server

use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use log::{info, warn};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use plate_solver::prelude::*;

const DEFAULT_ADDR: &str = "0.0.0.0:8086";

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn analyze(Json(request): Json<AnalysisRequest>) -> impl IntoResponse {
    // Dense factorisation is CPU bound
    let result = tokio::task::spawn_blocking(move || request.run()).await;

    let response = match result {
        Ok(result) => AnalysisResponse::from(result),
        Err(e) => AnalysisResponse::failure(format!("Analysis task failed: {}", e)),
    };

    let status = if response.success {
        StatusCode::OK
    } else {
        warn!("Analysis failed: {}", response.error.as_deref().unwrap_or_default());
        StatusCode::BAD_REQUEST
    };
    (status, Json(response))
}

fn app() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/v1/analyze", post(analyze))
        .layer(cors)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let addr: SocketAddr = std::env::var("PLATE_SERVER_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .context("PLATE_SERVER_ADDR must be a socket address such as 0.0.0.0:8086")?;

    info!("Plate Solver Server listening on http://{}", addr);
    info!("  Health check: GET  /health");
    info!("  Analysis:     POST /api/v1/analyze");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app()).await?;
    Ok(())
}
