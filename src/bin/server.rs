//! Fin Flutter HTTP Server

use anyhow::Context;
use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

use fin_flutter::prelude::*;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<T>,
}

#[derive(Debug, Serialize)]
struct EnvelopeResults {
    method: FlutterMethod,
    min_flutter_speed_m_s: Option<f64>,
    min_flutter_altitude_m: Option<f64>,
    envelope: Envelope,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn flutter(Json(config): Json<FinConfig>) -> impl IntoResponse {
    respond(tokio::task::spawn_blocking(move || run_flutter(config)).await)
}

async fn envelope(Json(config): Json<FinConfig>) -> impl IntoResponse {
    respond(tokio::task::spawn_blocking(move || run_envelope(config)).await)
}

fn respond<T: Serialize>(
    outcome: Result<FlutterResult<T>, tokio::task::JoinError>,
) -> (StatusCode, Json<ApiResponse<T>>) {
    let (status, result) = match outcome {
        Ok(Ok(results)) => (StatusCode::OK, Ok(results)),
        Ok(Err(e)) => (StatusCode::BAD_REQUEST, Err(e.to_string())),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Err(e.to_string())),
    };
    match result {
        Ok(results) => (
            status,
            Json(ApiResponse {
                success: true,
                error: None,
                results: Some(results),
            }),
        ),
        Err(error) => {
            log::warn!("request failed: {error}");
            (
                status,
                Json(ApiResponse {
                    success: false,
                    error: Some(error),
                    results: None,
                }),
            )
        }
    }
}

fn run_flutter(config: FinConfig) -> FlutterResult<FlutterReport> {
    log::info!(
        "flutter request: {} + {} layers, method {}",
        config.core_layer.material,
        config.additional_layers.len(),
        config.analysis.method.name()
    );
    FinModel::new(config)?.analyze()
}

fn run_envelope(config: FinConfig) -> FlutterResult<EnvelopeResults> {
    log::info!(
        "envelope request: {} m to {} m step {} m, method {}",
        config.envelope.min_altitude,
        config.envelope.max_altitude,
        config.envelope.step,
        config.analysis.method.name()
    );
    let model = FinModel::new(config)?;
    let envelope = model.envelope()?;
    let min = envelope.min_flutter_speed();
    Ok(EnvelopeResults {
        method: model.config().analysis.method,
        min_flutter_speed_m_s: min.map(|(_, v)| v),
        min_flutter_altitude_m: min.map(|(h, _)| h),
        envelope,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/flutter", post(flutter))
        .route("/api/v1/envelope", post(envelope))
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], 8086));
    println!("Fin Flutter Server listening on http://{}", addr);
    println!("  Health check: GET  /health");
    println!("  Flutter:      POST /api/v1/flutter");
    println!("  Envelope:     POST /api/v1/envelope");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
