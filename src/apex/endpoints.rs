use axum::{Extension, Json, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use super::utils::VerboseHTTPError;
use crate::config::AppConfig;

pub async fn root_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Billing System SMS Gateway API",
        "documentation": "Visit /api/status for available endpoints",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn health_endpoint(
    Extension(config): Extension<Arc<AppConfig>>,
) -> Json<serde_json::Value> {
    Json(json!({
        "status": "OK",
        "service": "Billing System SMS Gateway",
        "timestamp": Utc::now().to_rfc3339(),
        "configured": config.api_configured()
    }))
}

pub async fn status_endpoint(
    Extension(config): Extension<Arc<AppConfig>>,
) -> Json<serde_json::Value> {
    Json(json!({
        "status": "active",
        "gateway": "Fast2SMS",
        "timestamp": Utc::now().to_rfc3339(),
        "apiConfigured": config.api_configured(),
        "corsEnabled": config.cors_origin.is_some(),
        "environment": config.environment,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/api/health",
            "/api/status",
            "/api/send-sms",
            "/api/send-sms-batch",
            "/api/send-batch-sms",
            "/api/billing-notification"
        ]
    }))
}

pub async fn not_found_endpoint() -> impl IntoResponse {
    VerboseHTTPError::Standard(StatusCode::NOT_FOUND, "Endpoint not found".to_string())
}
