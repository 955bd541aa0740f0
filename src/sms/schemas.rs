use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const FAST2SMS_API_BASE_URL: &str = "https://www.fast2sms.com/dev/bulkV2";

/// Single send request body. Fields stay optional so a missing key
/// surfaces as a field validation error instead of a deserialize failure.
#[derive(Debug, Clone, Deserialize)]
pub struct SmsSendRequest {
    pub phone: Option<String>,
    pub message: Option<String>,
}

/// Per-item batch: independent (phone, message) pairs.
#[derive(Debug, Deserialize)]
pub struct BatchSendRequest {
    #[serde(rename = "smsList")]
    pub sms_list: Option<Vec<SmsSendRequest>>,
}

/// Audience batch: one message, many recipients, one provider call.
#[derive(Debug, Deserialize)]
pub struct AudienceSendRequest {
    pub numbers: Option<Vec<String>>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TestSmsQuery {
    pub phone: Option<String>,
}

/// Outbound Fast2SMS bulkV2 payload. `numbers` carries comma-joined
/// recipients when one call covers several of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderPayload {
    pub route: &'static str,
    pub message: String,
    pub language: &'static str,
    pub flash: u8,
    pub numbers: String,
}

impl ProviderPayload {
    pub fn new(numbers: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            route: "q",
            message: message.into(),
            language: "english",
            flash: 0,
            numbers: numbers.into(),
        }
    }
}

/// The subset of the Fast2SMS response the relay consumes. The full body
/// is carried through opaquely as the result's provider payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderResponse {
    #[serde(rename = "return", default)]
    pub accepted: bool,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Error)]
pub enum TransportFailure {
    #[error("Request timeout - SMS gateway not responding")]
    Timeout,
    #[error("Connection error - Cannot reach SMS gateway")]
    Connection,
    #[error("SMS gateway error: {0}")]
    Other(String),
}

#[derive(Debug, Clone, Error)]
pub enum DeliveryFailure {
    /// The provider answered but declined to send.
    #[error("{message}")]
    Rejected { message: String },
    #[error(transparent)]
    Transport(#[from] TransportFailure),
    #[error("Invalid response from SMS gateway: {0}")]
    InvalidResponse(String),
}

/// Outcome of one provider call. Invariant: a success never carries a
/// failure, and every failure carries a message. Immutable once built.
#[derive(Debug, Clone)]
pub struct DeliveryResult {
    request_id: Option<String>,
    provider_payload: Option<Value>,
    failure: Option<DeliveryFailure>,
}

impl DeliveryResult {
    pub fn sent(request_id: Option<String>, provider_payload: Value) -> Self {
        Self {
            request_id,
            provider_payload: Some(provider_payload),
            failure: None,
        }
    }

    pub fn failed(failure: DeliveryFailure, provider_payload: Option<Value>) -> Self {
        Self {
            request_id: None,
            provider_payload,
            failure: Some(failure),
        }
    }

    pub fn success(&self) -> bool {
        self.failure.is_none()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn provider_payload(&self) -> Option<&Value> {
        self.provider_payload.as_ref()
    }

    pub fn failure(&self) -> Option<&DeliveryFailure> {
        self.failure.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.failure.as_ref().map(|failure| failure.to_string())
    }
}

/// Per-item outcome of a batch fan-out. Echoes the phone exactly as the
/// client sent it.
#[derive(Debug, Clone, Serialize)]
pub struct BatchItemResult {
    pub phone: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchItemResult {
    pub fn sent(phone: String) -> Self {
        Self {
            phone,
            success: true,
            message: Some("SMS sent".to_string()),
            error: None,
        }
    }

    pub fn failed(phone: String, error: String) -> Self {
        Self {
            phone,
            success: false,
            message: None,
            error: Some(error),
        }
    }
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub results: Vec<BatchItemResult>,
    pub successful: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn provider_payload_defaults_to_quick_route() {
        let payload = ProviderPayload::new("919876543210", "Hello");
        assert_eq!(payload.route, "q");
        assert_eq!(payload.language, "english");
        assert_eq!(payload.flash, 0);
        assert_eq!(payload.numbers, "919876543210");
    }

    #[test]
    fn provider_response_tolerates_missing_fields() {
        let parsed: ProviderResponse = serde_json::from_value(json!({})).unwrap();
        assert!(!parsed.accepted);
        assert!(parsed.request_id.is_none());
        assert!(parsed.message.is_none());

        let parsed: ProviderResponse =
            serde_json::from_value(json!({"return": true, "request_id": "abc123"})).unwrap();
        assert!(parsed.accepted);
        assert_eq!(parsed.request_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn delivery_result_upholds_its_invariant() {
        let sent = DeliveryResult::sent(Some("abc123".to_string()), json!({"return": true}));
        assert!(sent.success());
        assert!(sent.failure().is_none());
        assert!(sent.error_message().is_none());
        assert_eq!(sent.request_id(), Some("abc123"));

        let failed = DeliveryResult::failed(
            DeliveryFailure::Rejected {
                message: "Invalid number".to_string(),
            },
            None,
        );
        assert!(!failed.success());
        assert!(failed.request_id().is_none());
        assert_eq!(failed.error_message().as_deref(), Some("Invalid number"));
    }

    #[test]
    fn batch_item_serializes_message_or_error_not_both() {
        let sent = serde_json::to_value(BatchItemResult::sent("987".to_string())).unwrap();
        assert_eq!(sent["message"], "SMS sent");
        assert!(sent.get("error").is_none());

        let failed =
            serde_json::to_value(BatchItemResult::failed("987".to_string(), "nope".to_string()))
                .unwrap();
        assert_eq!(failed["error"], "nope");
        assert!(failed.get("message").is_none());
    }

    #[test]
    fn sms_list_field_uses_camel_case_on_the_wire() {
        let parsed: BatchSendRequest = serde_json::from_value(json!({
            "smsList": [{"phone": "9876543210", "message": "hi"}]
        }))
        .unwrap();
        assert_eq!(parsed.sms_list.unwrap().len(), 1);
    }
}
