//! Registration-form validation: aggregates per-field errors in a fixed,
//! deterministic order.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::rules::validate_age;

/// Minimum age required to register an identity.
pub const MIN_REGISTRATION_AGE: i32 = 18;

/// User input collected by the registration form.
///
/// Values are ephemeral: they live only for the duration of one
/// registration attempt and are never persisted in plaintext.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationInput {
    /// Full legal name.
    pub full_name: String,
    /// Date of birth (ISO 8601, `YYYY-MM-DD`).
    pub date_of_birth: String,
    /// Country of residence.
    pub country: String,
    /// Optional government ID document.
    pub government_id: Option<PathBuf>,
    /// Optional selfie for liveness comparison.
    pub selfie: Option<PathBuf>,
}

/// One failed input constraint: the field it belongs to and a
/// human-readable message. Always recoverable by correcting input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Form field key (camelCase, matching the UI field names).
    pub field: String,
    /// Human-readable message to render next to the field.
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Validate a registration form, returning one error per violated
/// constraint.
///
/// Checks run independently in a fixed order (fullName, dateOfBirth,
/// country) and the output preserves that order, so consumers may rely
/// on first-error-first display. An empty vec is the success signal.
pub fn validate_registration_form(input: &RegistrationInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if input.full_name.trim().len() < 2 {
        errors.push(ValidationError::new("fullName", "Full name is required"));
    }

    if input.date_of_birth.is_empty() {
        errors.push(ValidationError::new(
            "dateOfBirth",
            "Date of birth is required",
        ));
    } else if !validate_age(&input.date_of_birth, MIN_REGISTRATION_AGE) {
        errors.push(ValidationError::new(
            "dateOfBirth",
            "You must be at least 18 years old",
        ));
    }

    if input.country.trim().len() < 2 {
        errors.push(ValidationError::new("country", "Country is required"));
    }

    if !errors.is_empty() {
        tracing::debug!(error_count = errors.len(), "registration form invalid");
    }

    errors
}
