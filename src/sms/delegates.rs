//! Delivery adapter for the Fast2SMS bulkV2 endpoint.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use super::schemas::{
    BatchItemResult, BatchOutcome, DeliveryFailure, DeliveryResult, FAST2SMS_API_BASE_URL,
    ProviderPayload, ProviderResponse, SmsSendRequest, TransportFailure,
};
use super::validation::{ValidationError, validate_batch_size, validate_sms_input};
use crate::config::AppConfig;

/// Per-call provider timeout. One attempt per send, no retries.
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: String,
}

/// Transport seam: one JSON POST carrying the provider's `authorization`
/// header. Production goes through reqwest; tests swap in a recorded fake.
pub trait SmsTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        api_key: &'a str,
        payload: &'a ProviderPayload,
    ) -> BoxFuture<'a, Result<GatewayResponse, TransportFailure>>;
}

struct ReqwestTransport {
    client: reqwest::Client,
}

impl SmsTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        api_key: &'a str,
        payload: &'a ProviderPayload,
    ) -> BoxFuture<'a, Result<GatewayResponse, TransportFailure>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header("authorization", api_key)
                .json(payload)
                .send()
                .await
                .map_err(classify_transport_error)?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(classify_transport_error)?;
            Ok(GatewayResponse { status, body })
        })
    }
}

fn classify_transport_error(err: reqwest::Error) -> TransportFailure {
    if err.is_timeout() {
        TransportFailure::Timeout
    } else if err.is_connect() {
        TransportFailure::Connection
    } else {
        TransportFailure::Other(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("SMS service not configured")]
    NotConfigured,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Relay to the Fast2SMS API. Holds the credential and endpoint read once
/// at startup; shared across requests behind an `Arc`.
pub struct SmsGateway {
    api_key: Option<String>,
    endpoint: String,
    http: Arc<dyn SmsTransport>,
}

impl SmsGateway {
    pub fn new(config: &AppConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(PROVIDER_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            api_key: config.api_key.clone(),
            endpoint: FAST2SMS_API_BASE_URL.to_string(),
            http: Arc::new(ReqwestTransport { client }),
        }
    }

    fn credential(&self) -> Result<&str, GatewayError> {
        self.api_key.as_deref().ok_or(GatewayError::NotConfigured)
    }

    /// Send one message to one normalized phone number.
    ///
    /// Exactly one provider call per invocation: no retry, no caching.
    /// Provider rejections and transport failures come back inside the
    /// `DeliveryResult`; only a missing credential is an `Err`.
    pub async fn deliver(
        &self,
        phone: &str,
        message: &str,
    ) -> Result<DeliveryResult, GatewayError> {
        let api_key = self.credential()?;
        Ok(self.send(api_key, ProviderPayload::new(phone, message)).await)
    }

    /// Send one message to several recipients as a single provider call.
    /// Fast2SMS takes the recipients comma-joined in `numbers`.
    pub async fn deliver_to_many(
        &self,
        numbers: &[String],
        message: &str,
    ) -> Result<DeliveryResult, GatewayError> {
        let api_key = self.credential()?;
        Ok(self
            .send(api_key, ProviderPayload::new(numbers.join(","), message))
            .await)
    }

    /// Fan a batch out item by item, strictly in input order. Size
    /// violations are rejected before any provider call; one item's
    /// failure never aborts its siblings.
    pub async fn deliver_batch(
        &self,
        items: &[SmsSendRequest],
    ) -> Result<BatchOutcome, GatewayError> {
        let api_key = self.credential()?;
        validate_batch_size(items, "smsList")?;

        tracing::info!(count = items.len(), "Sending SMS batch");

        let mut results = Vec::with_capacity(items.len());
        for item in items {
            let phone = item.phone.clone().unwrap_or_default();
            let result = match validate_sms_input(item.phone.as_deref(), item.message.as_deref()) {
                Ok(digits) => {
                    let message = item.message.as_deref().unwrap_or_default();
                    let outcome = self.send(api_key, ProviderPayload::new(digits, message)).await;
                    match outcome.failure() {
                        None => BatchItemResult::sent(phone),
                        Some(failure) => BatchItemResult::failed(phone, failure.to_string()),
                    }
                }
                Err(invalid) => BatchItemResult::failed(phone, invalid.to_string()),
            };
            results.push(result);
        }

        let successful = results.iter().filter(|result| result.success).count();
        tracing::info!(
            successful = successful,
            total = results.len(),
            "Batch complete"
        );
        Ok(BatchOutcome {
            results,
            successful,
        })
    }

    // Detached so a disconnecting inbound client cannot cancel an
    // in-flight provider call; it runs to completion or timeout.
    async fn send(&self, api_key: &str, payload: ProviderPayload) -> DeliveryResult {
        let http = Arc::clone(&self.http);
        let endpoint = self.endpoint.clone();
        let api_key = api_key.to_owned();
        match tokio::spawn(send_once(http, endpoint, api_key, payload)).await {
            Ok(result) => result,
            Err(err) => DeliveryResult::failed(
                DeliveryFailure::Transport(TransportFailure::Other(err.to_string())),
                None,
            ),
        }
    }
}

async fn send_once(
    http: Arc<dyn SmsTransport>,
    endpoint: String,
    api_key: String,
    payload: ProviderPayload,
) -> DeliveryResult {
    tracing::info!(numbers = %payload.numbers, "Sending SMS via Fast2SMS");

    let response = match http.post_json(&endpoint, &api_key, &payload).await {
        Ok(response) => response,
        Err(failure) => {
            tracing::error!(error = %failure, "Fast2SMS transport failure");
            return DeliveryResult::failed(failure.into(), None);
        }
    };

    tracing::debug!(status = response.status, "Fast2SMS response received");

    let body: Value = match serde_json::from_str(&response.body) {
        Ok(body) => body,
        Err(err) => {
            tracing::error!(error = %err, "Fast2SMS returned a non-JSON body");
            return DeliveryResult::failed(DeliveryFailure::InvalidResponse(err.to_string()), None);
        }
    };

    // The `return` indicator decides the outcome regardless of the
    // provider's HTTP status; anything else in the body is opaque.
    let parsed: ProviderResponse = serde_json::from_value(body.clone()).unwrap_or_default();
    if parsed.accepted {
        tracing::info!(request_id = ?parsed.request_id, "SMS accepted by Fast2SMS");
        DeliveryResult::sent(parsed.request_id, body)
    } else {
        let message = parsed
            .message
            .unwrap_or_else(|| "API returned error".to_string());
        tracing::warn!(error = %message, "Fast2SMS rejected the message");
        DeliveryResult::failed(DeliveryFailure::Rejected { message }, Some(body))
    }
}
