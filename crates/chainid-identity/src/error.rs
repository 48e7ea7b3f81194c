use chainid_validation::ValidationError;

/// Identity flow errors.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// Registration input failed validation; carries the per-field
    /// errors in check order.
    #[error("registration input invalid: {} field error(s)", .0.len())]
    InvalidInput(Vec<ValidationError>),

    #[error("no identity registered for {0}")]
    NotRegistered(String),

    #[error("identity already registered for {0}")]
    AlreadyRegistered(String),

    #[error("identity has been revoked")]
    IdentityRevoked,

    #[error("provider error: {0}")]
    Provider(#[from] chainid_providers::ProviderError),

    #[error("core error: {0}")]
    Core(#[from] chainid_core::CoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
