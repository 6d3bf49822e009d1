//! Common validation utilities and input normalization.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Allowed gender values on an enrollment application.
pub const GENDERS: [&str; 2] = ["male", "female"];

/// Allowed payment method labels on an enrollment application.
pub const PAYMENT_METHODS: [&str; 3] = ["onsite", "card", "transfer"];

/// Allowed prior-experience buckets on an enrollment application.
pub const EXPERIENCE_LEVELS: [&str; 4] = ["none", "beginner", "intermediate", "advanced"];

lazy_static! {
    // Digits with optional hyphen or space separators, 9 to 11 digits total.
    static ref PHONE_RE: Regex = Regex::new(r"^\d[\d\- ]{7,13}\d$").unwrap();
    static ref SLUG_RE: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Validates a phone number: digits with optional separators.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if PHONE_RE.is_match(phone) && (9..=11).contains(&digits) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Phone must be 9 to 11 digits with optional separators".into());
        Err(err)
    }
}

/// Validates a URL-safe course slug (lowercase alphanumerics and hyphens).
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if SLUG_RE.is_match(slug) {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug_format");
        err.message = Some("Slug must contain only lowercase letters, digits and hyphens".into());
        Err(err)
    }
}

/// Validates that a gender value is one of the allowed set.
pub fn validate_gender(value: &str) -> Result<(), ValidationError> {
    validate_one_of(value, &GENDERS, "gender_value", "Gender must be one of: male, female")
}

/// Validates that a payment method label is one of the allowed set.
pub fn validate_payment_method(value: &str) -> Result<(), ValidationError> {
    validate_one_of(
        value,
        &PAYMENT_METHODS,
        "payment_method_value",
        "Payment method must be one of: onsite, card, transfer",
    )
}

/// Validates that an experience bucket is one of the allowed set.
pub fn validate_experience(value: &str) -> Result<(), ValidationError> {
    validate_one_of(
        value,
        &EXPERIENCE_LEVELS,
        "experience_value",
        "Experience must be one of: none, beginner, intermediate, advanced",
    )
}

/// Validates that a price amount in the smallest currency unit is non-negative.
pub fn validate_price(amount: i64) -> Result<(), ValidationError> {
    if amount >= 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("price_range");
        err.message = Some("Price must be non-negative".into());
        Err(err)
    }
}

fn validate_one_of(
    value: &str,
    allowed: &[&str],
    code: &'static str,
    message: &'static str,
) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new(code);
        err.message = Some(message.into());
        Err(err)
    }
}

/// Normalizes an email address for duplicate detection: trim and lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalizes a phone number for duplicate detection: digits only.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("010-1111-1111").is_ok());
        assert!(validate_phone("01011112222").is_ok());
        assert!(validate_phone("02-123-4567").is_ok());
        assert!(validate_phone("010 1234 5678").is_ok());
    }

    #[test]
    fn test_validate_phone_rejects_garbage() {
        assert!(validate_phone("").is_err());
        assert!(validate_phone("abc").is_err());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("010-1111-11119999").is_err());
        assert!(validate_phone("+82-10-1234-5678").is_err());
    }

    #[test]
    fn test_validate_phone_error_message() {
        let err = validate_phone("nope").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Phone must be 9 to 11 digits with optional separators"
        );
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("mat-pilates-101").is_ok());
        assert!(validate_slug("reformer").is_ok());
        assert!(validate_slug("Mat-Pilates").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug("double--hyphen").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn test_validate_gender() {
        assert!(validate_gender("male").is_ok());
        assert!(validate_gender("female").is_ok());
        assert!(validate_gender("other").is_err());
        assert!(validate_gender("MALE").is_err());
        assert!(validate_gender("").is_err());
    }

    #[test]
    fn test_validate_payment_method() {
        assert!(validate_payment_method("onsite").is_ok());
        assert!(validate_payment_method("card").is_ok());
        assert!(validate_payment_method("transfer").is_ok());
        assert!(validate_payment_method("cash").is_err());
    }

    #[test]
    fn test_validate_experience() {
        assert!(validate_experience("none").is_ok());
        assert!(validate_experience("beginner").is_ok());
        assert!(validate_experience("intermediate").is_ok());
        assert!(validate_experience("advanced").is_ok());
        assert!(validate_experience("expert").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(100_000).is_ok());
        assert!(validate_price(-1).is_err());
    }

    #[test]
    fn test_validate_price_error_message() {
        let err = validate_price(-500).unwrap_err();
        assert_eq!(err.message.unwrap().to_string(), "Price must be non-negative");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  A@X.Com "), "a@x.com");
        assert_eq!(normalize_email("a@x.com"), "a@x.com");
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("010-1111-1111"), "01011111111");
        assert_eq!(normalize_phone("010 1111 1111"), "01011111111");
        assert_eq!(normalize_phone("01011111111"), "01011111111");
    }

    #[test]
    fn test_normalized_keys_match_across_formats() {
        // The duplicate check treats these as the same applicant.
        assert_eq!(normalize_phone("010-1111-1111"), normalize_phone("01011111111"));
        assert_eq!(normalize_email("A@x.com"), normalize_email("a@x.com "));
    }
}
