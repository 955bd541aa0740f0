use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use super::{delegates::compose_billing_message, schemas::BillingNotificationRequest};
use crate::{
    apex::utils::VerboseHTTPError,
    sms::{delegates::SmsGateway, validation::validate_phone},
};

pub(crate) async fn billing_notification_endpoint(
    Extension(gateway): Extension<Arc<SmsGateway>>,
    body: String,
) -> impl IntoResponse {
    let payload: BillingNotificationRequest = match serde_json::from_str(&body) {
        Ok(data) => data,
        Err(e) => {
            return VerboseHTTPError::Standard(
                StatusCode::BAD_REQUEST,
                format!("Invalid request format: {}", e),
            )
            .into_response();
        }
    };

    let Some(phone) = payload.phone.as_deref() else {
        return VerboseHTTPError::Standard(
            StatusCode::BAD_REQUEST,
            "Missing required fields".to_string(),
        )
        .into_response();
    };

    let digits = match validate_phone(phone) {
        Ok(digits) => digits,
        Err(invalid) => {
            tracing::warn!(error = %invalid, "Rejected billing notification");
            return VerboseHTTPError::from(invalid).into_response();
        }
    };

    let message = compose_billing_message(&payload);

    match gateway.deliver(&digits, &message).await {
        Ok(result) => match result.failure() {
            None => Json(json!({
                "success": true,
                "message": "Billing notification sent",
                "timestamp": Utc::now().to_rfc3339()
            }))
            .into_response(),
            Some(failure) => VerboseHTTPError::from(failure).into_response(),
        },
        Err(err) => VerboseHTTPError::from(err).into_response(),
    }
}
