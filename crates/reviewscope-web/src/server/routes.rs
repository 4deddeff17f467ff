use crate::server::app::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use reviewscope_classifiers::{Analysis, ArtifactStatus, InputRejection};
use reviewscope_core::Error;
use serde::{Deserialize, Serialize};

// ============================================================================
// Health endpoints
// ============================================================================

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.analyzer.artifacts().status() {
        ArtifactStatus::Ready => Json(serde_json::json!({
            "status": "ok",
            "artifacts": "ready"
        })),
        ArtifactStatus::NotLoaded => Json(serde_json::json!({
            "status": "ok",
            "artifacts": "unavailable",
            "message": "Model artifacts have not been loaded yet"
        })),
        ArtifactStatus::Failed(message) => Json(serde_json::json!({
            "status": "ok",
            "artifacts": "unavailable",
            "message": message
        })),
    }
}

// ============================================================================
// Analysis endpoint
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub review: String,
}

#[derive(Debug, Serialize)]
struct RejectionBody {
    status: &'static str,
    #[serde(flatten)]
    rejection: InputRejection,
    message: String,
}

pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Response {
    let analyzer = state.analyzer.clone();
    let outcome = tokio::task::spawn_blocking(move || analyzer.analyze(&req.review)).await;

    match outcome {
        Ok(Ok(Analysis::Completed(report))) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ok", "report": report })),
        )
            .into_response(),
        Ok(Ok(Analysis::Rejected(rejection))) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(RejectionBody {
                status: "warning",
                message: rejection.message(),
                rejection,
            }),
        )
            .into_response(),
        Ok(Err(Error::ArtifactLoad(message))) => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            format!("Error loading model or tokenizer: {message}"),
        ),
        Ok(Err(e)) => {
            tracing::error!("Analysis failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        Err(e) => {
            tracing::error!("Analysis task failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Analysis task failed".to_string(),
            )
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(serde_json::json!({ "status": "error", "message": message })),
    )
        .into_response()
}

// ============================================================================
// Metrics endpoint
// ============================================================================

pub async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
