use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::models::StudentRecord;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern");
    static ref PHONE: Regex = Regex::new(r"^[0-9\s\-()+]{8,}$").expect("valid phone pattern");
}

/// Reasons a record is refused. The display text is shown to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill all fields")]
    MissingField,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
}

/// Check a record against the roster rules. Rules run in a fixed order and the
/// first failure is reported: empty fields, then email, then phone.
pub fn validate(record: &StudentRecord) -> Result<(), ValidationError> {
    let fields = [
        &record.first_name,
        &record.last_name,
        &record.phone,
        &record.email,
    ];
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(ValidationError::MissingField);
    }
    if !EMAIL.is_match(&record.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !PHONE.is_match(&record.phone) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(phone: &str, email: &str) -> StudentRecord {
        StudentRecord::new("Ada", "Lovelace", phone, email)
    }

    #[test]
    fn accepts_well_formed_record() {
        assert_eq!(validate(&record("12345678", "a@b.com")), Ok(()));
    }

    #[test]
    fn email_needs_a_dotted_domain() {
        assert_eq!(
            validate(&record("12345678", "a@b")),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate(&record("12345678", "a b@c.com")),
            Err(ValidationError::InvalidEmail)
        );
    }

    #[test]
    fn phone_needs_eight_characters() {
        assert_eq!(
            validate(&record("1234567", "a@b.com")),
            Err(ValidationError::InvalidPhone)
        );
        assert_eq!(validate(&record("12345678", "a@b.com")), Ok(()));
    }

    #[test]
    fn phone_allows_punctuation_only_from_the_set() {
        assert_eq!(validate(&record("+1 (555) 123-4567", "a@b.com")), Ok(()));
        assert_eq!(
            validate(&record("555.123.4567", "a@b.com")),
            Err(ValidationError::InvalidPhone)
        );
    }

    #[test]
    fn blank_field_wins_over_pattern_errors() {
        let blank = StudentRecord::new("  ", "Lovelace", "12", "nope");
        assert_eq!(validate(&blank), Err(ValidationError::MissingField));
    }

    #[test]
    fn messages_match_form_copy() {
        assert_eq!(
            ValidationError::MissingField.to_string(),
            "Please fill all fields"
        );
        assert_eq!(
            ValidationError::InvalidPhone.to_string(),
            "Please enter a valid phone number"
        );
    }
}
