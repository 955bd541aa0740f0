use super::schemas::BillingNotificationRequest;

const DEFAULT_CUSTOMER_NAME: &str = "Customer";
const DEFAULT_AMOUNT: &str = "0";
const DEFAULT_INVOICE_ID: &str = "N/A";

/// Render the billing SMS template, substituting safe defaults for any
/// absent field.
pub fn compose_billing_message(request: &BillingNotificationRequest) -> String {
    let customer_name = request
        .customer_name
        .as_deref()
        .unwrap_or(DEFAULT_CUSTOMER_NAME);
    let amount = request.amount.as_deref().unwrap_or(DEFAULT_AMOUNT);
    let invoice_id = request.invoice_id.as_deref().unwrap_or(DEFAULT_INVOICE_ID);
    format!(
        "Hi {customer_name}, Your billing amount is Rs. {amount}. Invoice ID: {invoice_id}. Thank you!"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        customer_name: Option<&str>,
        amount: Option<&str>,
        invoice_id: Option<&str>,
    ) -> BillingNotificationRequest {
        BillingNotificationRequest {
            phone: Some("919876543210".to_string()),
            customer_name: customer_name.map(str::to_string),
            amount: amount.map(str::to_string),
            invoice_id: invoice_id.map(str::to_string),
        }
    }

    #[test]
    fn absent_fields_fall_back_to_defaults() {
        assert_eq!(
            compose_billing_message(&request(None, None, None)),
            "Hi Customer, Your billing amount is Rs. 0. Invoice ID: N/A. Thank you!"
        );
    }

    #[test]
    fn provided_fields_are_substituted() {
        assert_eq!(
            compose_billing_message(&request(Some("John Doe"), Some("500"), Some("INV-001"))),
            "Hi John Doe, Your billing amount is Rs. 500. Invoice ID: INV-001. Thank you!"
        );
    }

    #[test]
    fn partial_fields_mix_values_and_defaults() {
        assert_eq!(
            compose_billing_message(&request(Some("Asha"), None, Some("INV-042"))),
            "Hi Asha, Your billing amount is Rs. 0. Invoice ID: INV-042. Thank you!"
        );
    }
}
