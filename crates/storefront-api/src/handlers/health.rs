use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use tracing::warn;

use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub async fn health_check() -> ApiResponse<HealthResponse> {
    ApiResponse::ok(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Ready once the session store answers.
pub async fn readiness_check(State(state): State<AppState>) -> ApiResponse<HealthResponse> {
    match state.sessions.get("readiness-probe", "ping").await {
        Ok(_) => ApiResponse::ok(HealthResponse {
            status: "ready",
            version: env!("CARGO_PKG_VERSION"),
        }),
        Err(e) => {
            warn!("Readiness check failed: {}", e);
            ApiResponse::failure(
                StatusCode::SERVICE_UNAVAILABLE,
                "NOT_READY",
                "Session store unavailable",
            )
        }
    }
}
