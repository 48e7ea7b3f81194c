//! ChainID Core: Fundamental types, identity lifecycle, errors, and
//! configuration for the ChainID decentralized identity toolkit.

pub mod config;
pub mod error;
pub mod identity_status;
pub mod types;

pub use config::ChainIdConfig;
pub use error::CoreError;
pub use identity_status::{IdentityEvent, IdentityLifecycle, IdentityStatus};
pub use types::{
    AttributeType, ContentId, Credential, CredentialStatus, Identity, TokenId,
    VerificationEvent, VerificationRequest, VerificationResult, WalletAddress,
};
