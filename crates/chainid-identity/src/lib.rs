//! ChainID Identity Flows
//!
//! Orchestrates the identity lifecycle over the capability providers:
//! - Registration: validate → encrypt → store → mint → audit
//! - Attribute verification via gasless sessions
//! - Revocation and verification history

pub mod error;
pub mod profile;
pub mod registration;
pub mod session;
pub mod verification;

pub use error::IdentityError;
pub use profile::IdentityProfile;
pub use registration::{RegistrationService, TOPIC_IDENTITY};
pub use session::AuthSession;
pub use verification::{VerificationService, TOPIC_VERIFICATION};
