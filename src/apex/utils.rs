use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;

use crate::sms::delegates::GatewayError;
use crate::sms::schemas::DeliveryFailure;
use crate::sms::validation::ValidationError;

#[derive(Serialize)]
pub struct ErrorMessage {
    pub success: bool,
    pub error: String,
    pub timestamp: String,
}

impl ErrorMessage {
    #[inline]
    pub fn new(error: String) -> Self {
        Self {
            success: false,
            error,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug)]
pub enum VerboseHTTPError {
    Standard(StatusCode, String),
}

impl IntoResponse for VerboseHTTPError {
    fn into_response(self) -> Response {
        match self {
            Self::Standard(status, message) => {
                let error_message = ErrorMessage::new(message);
                (status, axum::Json(error_message)).into_response()
            }
        }
    }
}

impl From<ValidationError> for VerboseHTTPError {
    fn from(invalid: ValidationError) -> Self {
        Self::Standard(StatusCode::BAD_REQUEST, invalid.to_string())
    }
}

impl From<GatewayError> for VerboseHTTPError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotConfigured => {
                Self::Standard(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            GatewayError::Invalid(invalid) => invalid.into(),
        }
    }
}

// Provider rejections are the client's problem (bad number, DLT issues);
// anything transport-shaped means the upstream gateway was unreachable.
impl From<&DeliveryFailure> for VerboseHTTPError {
    fn from(failure: &DeliveryFailure) -> Self {
        let status = match failure {
            DeliveryFailure::Rejected { .. } => StatusCode::BAD_REQUEST,
            DeliveryFailure::Transport(_) | DeliveryFailure::InvalidResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
        };
        Self::Standard(status, failure.to_string())
    }
}
