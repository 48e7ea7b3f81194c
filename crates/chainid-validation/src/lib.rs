//! ChainID Validation: the registration-form validation core.
//!
//! Field rules are stateless predicates over strings; the form
//! aggregator produces an ordered list of (field, message) errors.

pub mod form;
pub mod rules;

pub use form::{
    validate_registration_form, RegistrationInput, ValidationError, MIN_REGISTRATION_AGE,
};
pub use rules::{
    age_on, validate_age, validate_date, validate_email, validate_ipfs_hash,
    validate_wallet_address,
};
