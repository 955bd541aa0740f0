use thiserror::Error;

pub const MIN_PHONE_DIGITS: usize = 10;
pub const MAX_PHONE_DIGITS: usize = 12;
pub const MAX_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Phone number and message are required")]
    MissingField,
    #[error("Invalid phone number format (10-12 digits required)")]
    InvalidPhoneFormat,
    #[error("{0} array required with at least one item")]
    EmptyBatch(&'static str),
    #[error("Maximum 100 SMS per batch")]
    BatchTooLarge,
}

/// Strip everything but ASCII digits from a raw phone string.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalize a phone number and bounds-check its digit count.
pub fn validate_phone(raw: &str) -> Result<String, ValidationError> {
    let digits = normalize_phone(raw);
    if digits.len() < MIN_PHONE_DIGITS || digits.len() > MAX_PHONE_DIGITS {
        return Err(ValidationError::InvalidPhoneFormat);
    }
    Ok(digits)
}

/// Validate a (phone, message) pair before any provider call is made.
/// Returns the normalized digit-only phone number.
pub fn validate_sms_input(
    phone: Option<&str>,
    message: Option<&str>,
) -> Result<String, ValidationError> {
    let phone = match phone {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Err(ValidationError::MissingField),
    };
    match message {
        Some(value) if !value.is_empty() => {}
        _ => return Err(ValidationError::MissingField),
    }
    validate_phone(phone)
}

/// Bounds-check a batch before any delivery is attempted.
pub fn validate_batch_size<T>(items: &[T], field: &'static str) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::EmptyBatch(field));
    }
    if items.len() > MAX_BATCH_SIZE {
        return Err(ValidationError::BatchTooLarge);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_non_digit_characters() {
        assert_eq!(normalize_phone("+91 98765-43210"), "919876543210");
        assert_eq!(normalize_phone("(987) 654 3210"), "9876543210");
        assert_eq!(normalize_phone("abc"), "");
    }

    #[test]
    fn phone_digit_count_must_be_within_bounds() {
        assert!(validate_phone("987654321").is_err()); // 9 digits
        assert_eq!(validate_phone("9876543210").unwrap(), "9876543210"); // 10
        assert_eq!(validate_phone("919876543210").unwrap(), "919876543210"); // 12
        assert_eq!(
            validate_phone("9198765432101"),
            Err(ValidationError::InvalidPhoneFormat)
        ); // 13
    }

    #[test]
    fn punctuation_does_not_count_toward_digit_length() {
        // 9 digits dressed up with separators still fails.
        assert_eq!(
            validate_phone("98-76-54-32-1"),
            Err(ValidationError::InvalidPhoneFormat)
        );
        // 12 digits with separators passes.
        assert_eq!(
            validate_phone("+91 98765 43210").unwrap(),
            "919876543210"
        );
    }

    #[test]
    fn missing_or_empty_fields_are_rejected() {
        assert_eq!(
            validate_sms_input(None, Some("hi")),
            Err(ValidationError::MissingField)
        );
        assert_eq!(
            validate_sms_input(Some("9876543210"), None),
            Err(ValidationError::MissingField)
        );
        assert_eq!(
            validate_sms_input(Some("   "), Some("hi")),
            Err(ValidationError::MissingField)
        );
        assert_eq!(
            validate_sms_input(Some("9876543210"), Some("")),
            Err(ValidationError::MissingField)
        );
        assert_eq!(
            validate_sms_input(Some("9876543210"), Some("hi")).unwrap(),
            "9876543210"
        );
    }

    #[test]
    fn batch_size_bounds_are_enforced() {
        let empty: [u8; 0] = [];
        assert_eq!(
            validate_batch_size(&empty, "smsList"),
            Err(ValidationError::EmptyBatch("smsList"))
        );
        let full = vec![0u8; MAX_BATCH_SIZE];
        assert!(validate_batch_size(&full, "smsList").is_ok());
        let over = vec![0u8; MAX_BATCH_SIZE + 1];
        assert_eq!(
            validate_batch_size(&over, "smsList"),
            Err(ValidationError::BatchTooLarge)
        );
    }

    #[test]
    fn display_messages_are_human_readable() {
        assert_eq!(
            ValidationError::MissingField.to_string(),
            "Phone number and message are required"
        );
        assert_eq!(
            ValidationError::InvalidPhoneFormat.to_string(),
            "Invalid phone number format (10-12 digits required)"
        );
        assert_eq!(
            ValidationError::EmptyBatch("smsList").to_string(),
            "smsList array required with at least one item"
        );
        assert_eq!(
            ValidationError::BatchTooLarge.to_string(),
            "Maximum 100 SMS per batch"
        );
    }
}
