use crate::identity_status::IdentityStatus;

/// Core errors shared across the ChainID crates.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("invalid content identifier: {0}")]
    InvalidContentId(String),

    #[error("unknown attribute type: {0}")]
    InvalidAttribute(String),

    #[error("invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        from: IdentityStatus,
        to: IdentityStatus,
    },

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config encode error: {0}")]
    ConfigEncode(#[from] toml::ser::Error),
}
