//! HTTP request handlers for the Mirror server
//!
//! Thin glue only: request validation and response mapping live here, all
//! verification logic lives in `mirror-pipeline`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use mirror_domain::traits::{FactSource, Oracle};
use mirror_pipeline::VerificationPipeline;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "mirror";

/// Shared application state
pub struct AppState<O: Oracle, F: FactSource> {
    /// The verification pipeline
    pub pipeline: Arc<VerificationPipeline<O, F>>,
}

impl<O: Oracle, F: FactSource> Clone for AppState<O, F> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

/// Verification request body
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// Text to verify; missing or empty text is a client error
    #[serde(default)]
    pub text: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" when the server is up
    pub status: String,
    /// Service name
    pub service: String,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// POST /api/verify - run the verification pipeline on a block of text
///
/// Missing or empty text is the one error class surfaced to the caller; the
/// pipeline itself absorbs every external failure. A panic escaping the
/// pipeline (which should be unreachable) maps to a generic 500.
async fn verify<O, F>(
    State(state): State<AppState<O, F>>,
    Json(request): Json<VerifyRequest>,
) -> Response
where
    O: Oracle + 'static,
    F: FactSource + 'static,
{
    let Some(text) = request.text.filter(|t| !t.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "Text is required");
    };

    let pipeline = Arc::clone(&state.pipeline);
    let handle = tokio::spawn(async move { pipeline.verify(&text).await });

    match handle.await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            error!("Verification task failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Verification failed")
        }
    }
}

/// GET /health - liveness check
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router<O, F>(state: AppState<O, F>) -> Router
where
    O: Oracle + 'static,
    F: FactSource + 'static,
{
    Router::new()
        .route("/api/verify", post(verify::<O, F>))
        .route("/health", get(health_check))
        .with_state(state)
}
