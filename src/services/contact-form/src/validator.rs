//! Form validation rules
//!
//! The aggregate check run on submit and the per-field check run on blur/input
//! are both built from the predicates below, so the two cannot drift apart.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ContactFormError, Result};
use crate::view::{ControlKind, FormControl};
use contact_relay_shared::{SubmissionRecord, ValidationOutcome, REQUIRED_FIELDS};

/// Minimum message length, in characters
pub const MIN_MESSAGE_LENGTH: usize = 10;

pub const MISSING_FIELDS_PREFIX: &str = "Please fill in all required fields: ";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const SHORT_MESSAGE_MESSAGE: &str = "Please enter a message with at least 10 characters.";

// Pragmatic shape check, not RFC 5322
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub fn meets_message_length(value: &str) -> bool {
    value.chars().count() >= MIN_MESSAGE_LENGTH
}

/// Check a record against the form rules; first failure wins
pub fn validate(record: &SubmissionRecord) -> ValidationOutcome {
    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !is_present(record.value(field)))
        .collect();

    if !missing.is_empty() {
        return ValidationOutcome::invalid(format!(
            "{}{}",
            MISSING_FIELDS_PREFIX,
            missing.join(", ")
        ));
    }

    if !is_valid_email(record.value("email")) {
        return ValidationOutcome::invalid(INVALID_EMAIL_MESSAGE);
    }

    if !meets_message_length(record.value("message")) {
        return ValidationOutcome::invalid(SHORT_MESSAGE_MESSAGE);
    }

    ValidationOutcome::Valid
}

/// [`validate`] as a `Result`, for callers that propagate with `?`
pub fn require_valid(record: &SubmissionRecord) -> Result<()> {
    match validate(record) {
        ValidationOutcome::Valid => Ok(()),
        ValidationOutcome::Invalid { reason } => Err(ContactFormError::validation(reason)),
    }
}

/// Live check of a single control; optional controls always pass
pub fn check_field(control: &FormControl) -> bool {
    if !control.required {
        return true;
    }

    let value = control.value.trim();

    if control.kind == ControlKind::Email && !value.is_empty() {
        return is_valid_email(value);
    }

    if control.kind == ControlKind::TextArea
        && control.name == "message"
        && !value.is_empty()
        && !meets_message_length(value)
    {
        return false;
    }

    is_present(value)
}
