use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use super::{
    delegates::SmsGateway,
    schemas::{AudienceSendRequest, BatchSendRequest, SmsSendRequest, TestSmsQuery},
    validation::{validate_batch_size, validate_phone, validate_sms_input},
};
use crate::{apex::utils::VerboseHTTPError, config::AppConfig};

pub(crate) async fn send_sms_endpoint(
    Extension(gateway): Extension<Arc<SmsGateway>>,
    body: String,
) -> impl IntoResponse {
    let payload: SmsSendRequest = match serde_json::from_str(&body) {
        Ok(data) => data,
        Err(e) => {
            return VerboseHTTPError::Standard(
                StatusCode::BAD_REQUEST,
                format!("Invalid request format: {}", e),
            )
            .into_response();
        }
    };

    let phone = match validate_sms_input(payload.phone.as_deref(), payload.message.as_deref()) {
        Ok(digits) => digits,
        Err(invalid) => {
            tracing::warn!(error = %invalid, "Rejected SMS request");
            return VerboseHTTPError::from(invalid).into_response();
        }
    };
    let message = payload.message.unwrap_or_default();

    match gateway.deliver(&phone, &message).await {
        Ok(result) => match result.failure() {
            None => Json(json!({
                "success": true,
                "message": "SMS sent successfully",
                "requestId": result.request_id(),
                "timestamp": Utc::now().to_rfc3339(),
                "data": result.provider_payload()
            }))
            .into_response(),
            Some(failure) => VerboseHTTPError::from(failure).into_response(),
        },
        Err(err) => VerboseHTTPError::from(err).into_response(),
    }
}

pub(crate) async fn send_sms_batch_endpoint(
    Extension(gateway): Extension<Arc<SmsGateway>>,
    body: String,
) -> impl IntoResponse {
    let payload: BatchSendRequest = match serde_json::from_str(&body) {
        Ok(data) => data,
        Err(e) => {
            return VerboseHTTPError::Standard(
                StatusCode::BAD_REQUEST,
                format!("Invalid request format: {}", e),
            )
            .into_response();
        }
    };

    let sms_list = payload.sms_list.unwrap_or_default();
    match gateway.deliver_batch(&sms_list).await {
        Ok(outcome) => Json(json!({
            "success": true,
            "message": format!(
                "Batch sent: {}/{} successful",
                outcome.successful,
                outcome.results.len()
            ),
            "results": outcome.results,
            "timestamp": Utc::now().to_rfc3339()
        }))
        .into_response(),
        Err(err) => VerboseHTTPError::from(err).into_response(),
    }
}

pub(crate) async fn send_batch_sms_endpoint(
    Extension(gateway): Extension<Arc<SmsGateway>>,
    body: String,
) -> impl IntoResponse {
    let payload: AudienceSendRequest = match serde_json::from_str(&body) {
        Ok(data) => data,
        Err(e) => {
            return VerboseHTTPError::Standard(
                StatusCode::BAD_REQUEST,
                format!("Invalid request format: {}", e),
            )
            .into_response();
        }
    };

    let (numbers, message) = match (payload.numbers, payload.message) {
        (Some(numbers), Some(message)) if !message.is_empty() => (numbers, message),
        _ => {
            return VerboseHTTPError::Standard(
                StatusCode::BAD_REQUEST,
                "Missing numbers or message".to_string(),
            )
            .into_response();
        }
    };

    if let Err(invalid) = validate_batch_size(&numbers, "numbers") {
        return VerboseHTTPError::from(invalid).into_response();
    }

    let mut normalized = Vec::with_capacity(numbers.len());
    for number in &numbers {
        match validate_phone(number) {
            Ok(digits) => normalized.push(digits),
            Err(invalid) => return VerboseHTTPError::from(invalid).into_response(),
        }
    }

    match gateway.deliver_to_many(&normalized, &message).await {
        Ok(result) => match result.failure() {
            None => Json(json!({
                "success": true,
                "message": "Batch SMS sent successfully",
                "count": normalized.len(),
                "timestamp": Utc::now().to_rfc3339()
            }))
            .into_response(),
            Some(failure) => VerboseHTTPError::from(failure).into_response(),
        },
        Err(err) => VerboseHTTPError::from(err).into_response(),
    }
}

// Development probe: reports the provider payload instead of the error
// body, 200/400 by outcome.
pub(crate) async fn test_sms_endpoint(
    Extension(config): Extension<Arc<AppConfig>>,
    Extension(gateway): Extension<Arc<SmsGateway>>,
    Query(params): Query<TestSmsQuery>,
) -> impl IntoResponse {
    if config.is_production() {
        return VerboseHTTPError::Standard(
            StatusCode::FORBIDDEN,
            "Test endpoint disabled in production".to_string(),
        )
        .into_response();
    }

    let Some(phone) = params.phone else {
        return VerboseHTTPError::Standard(
            StatusCode::BAD_REQUEST,
            "phone query parameter required".to_string(),
        )
        .into_response();
    };

    let digits = match validate_phone(&phone) {
        Ok(digits) => digits,
        Err(invalid) => return VerboseHTTPError::from(invalid).into_response(),
    };

    let test_message = format!(
        "TEST SMS from Billing System - {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S")
    );

    match gateway.deliver(&digits, &test_message).await {
        Ok(result) => {
            let status = if result.success() {
                StatusCode::OK
            } else {
                StatusCode::BAD_REQUEST
            };
            (
                status,
                Json(json!({
                    "success": result.success(),
                    "message": "Test SMS sent",
                    "phone": phone,
                    "data": result.provider_payload()
                })),
            )
                .into_response()
        }
        Err(err) => VerboseHTTPError::from(err).into_response(),
    }
}
