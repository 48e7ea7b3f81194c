/// Errors from the capability providers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("encryption error: {0}")]
    Encryption(String),

    #[error("content not found: {0}")]
    ContentNotFound(String),

    #[error("ledger error: {0}")]
    Ledger(String),

    #[error("no identity registered for {0}")]
    NoIdentity(String),

    #[error("unknown session: {0}")]
    UnknownSession(String),

    #[error("session expired: {0}")]
    SessionExpired(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("core error: {0}")]
    Core(#[from] chainid_core::CoreError),
}
