use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::models::HomeResponse;
use crate::services::get_metrics;

/// Fixed status message served on `/`.
pub const HOME_MESSAGE: &str = "🚀 Server running successfully!";

pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: HOME_MESSAGE.to_string(),
    })
}

/// Liveness probe. Never calls the model backend.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "codeassist-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
