//! The identity profile: the plaintext claims that are encrypted before
//! storage.

use serde::{Deserialize, Serialize};

use chainid_validation::RegistrationInput;

/// Personal claims backing an identity. Exists in plaintext only inside
/// the registration and verification flows; at rest it is always an
/// encrypted envelope in the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProfile {
    pub full_name: String,
    pub date_of_birth: String,
    pub country: String,
}

impl IdentityProfile {
    /// Build a profile from validated registration input.
    pub fn from_input(input: &RegistrationInput) -> Self {
        Self {
            full_name: input.full_name.trim().to_string(),
            date_of_birth: input.date_of_birth.clone(),
            country: input.country.trim().to_string(),
        }
    }

    /// Reconstruct form input from the profile, for re-running the full
    /// validation suite against stored claims.
    pub fn to_input(&self) -> RegistrationInput {
        RegistrationInput {
            full_name: self.full_name.clone(),
            date_of_birth: self.date_of_birth.clone(),
            country: self.country.clone(),
            government_id: None,
            selfie: None,
        }
    }
}
