use serde::Deserialize;

/// Billing-notification request. Optional fields fall back to the
/// template defaults; `amount` travels as a string on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingNotificationRequest {
    pub phone: Option<String>,
    pub customer_name: Option<String>,
    pub amount: Option<String>,
    pub invoice_id: Option<String>,
}
