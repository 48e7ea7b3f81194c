use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::identity_status::IdentityStatus;

/// An EVM-style wallet address: `0x` followed by 40 hex digits.
///
/// No checksum verification is performed; only the shape is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Create a wallet address, validating its shape.
    pub fn new(addr: impl Into<String>) -> Result<Self, CoreError> {
        let addr = addr.into();
        let hex_part = addr
            .strip_prefix("0x")
            .ok_or_else(|| CoreError::InvalidAddress(addr.clone()))?;
        if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidAddress(addr));
        }
        Ok(Self(addr))
    }

    /// Get the address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WalletAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A legacy (CIDv0) content identifier: `Qm` followed by 44 base58 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(String);

impl ContentId {
    /// Create a content identifier, validating the CIDv0 shape.
    pub fn new(cid: impl Into<String>) -> Result<Self, CoreError> {
        let cid = cid.into();
        let valid = cid.len() == 46
            && cid.starts_with("Qm")
            && cid.chars().all(is_base58);
        if !valid {
            return Err(CoreError::InvalidContentId(cid));
        }
        Ok(Self(cid))
    }

    /// Derive the CIDv0 for a blob of content.
    ///
    /// CIDv0 is the base58btc encoding of the SHA-256 multihash
    /// (0x12 0x20 followed by the 32-byte digest), which always yields
    /// a 46-character string starting with `Qm`.
    pub fn for_content(data: &[u8]) -> Self {
        let digest = Sha256::digest(data);
        let mut multihash = Vec::with_capacity(34);
        multihash.extend_from_slice(&[0x12, 0x20]);
        multihash.extend_from_slice(&digest);
        Self(bs58::encode(multihash).into_string())
    }

    /// Get the CID string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a character belongs to the base58btc alphabet
/// (alphanumeric minus `0`, `O`, `I`, `l`).
fn is_base58(c: char) -> bool {
    c.is_ascii_alphanumeric() && !matches!(c, '0' | 'O' | 'I' | 'l')
}

/// Identifier of an identity token on the ledger (e.g., `0.0.12345`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenId(pub String);

impl TokenId {
    /// Build a token ID from a serial number.
    pub fn from_serial(serial: u64) -> Self {
        Self(format!("0.0.{}", serial))
    }

    /// Get the token ID string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered identity record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Ledger token backing this identity.
    pub token_id: TokenId,
    /// Wallet that owns the identity.
    pub wallet_address: WalletAddress,
    /// Content identifier of the encrypted profile.
    pub content_id: ContentId,
    /// When the identity was registered.
    pub created_at: DateTime<Utc>,
    /// Current lifecycle status.
    pub status: IdentityStatus,
    /// Number of attribute verifications performed against this identity.
    pub verification_count: u64,
}

/// Status of a credential held by an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialStatus {
    Verified,
    Pending,
    Expired,
}

impl fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verified => write!(f, "Verified"),
            Self::Pending => write!(f, "Pending"),
            Self::Expired => write!(f, "Expired"),
        }
    }
}

/// A credential attached to an identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    /// Unique credential identifier.
    pub id: String,
    /// Credential type (e.g., "KYC Verification").
    pub credential_type: String,
    /// Current status.
    pub status: CredentialStatus,
    /// When the credential was issued.
    pub issued_at: DateTime<Utc>,
    /// The dApp that requested or consumed the credential.
    pub dapp: String,
}

/// Identity attributes that a dApp can request verification for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    AgeOver18,
    AgeOver21,
    CountryVerification,
    KycComplete,
    CredentialCheck,
}

impl AttributeType {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AgeOver18 => "Age Over 18+",
            Self::AgeOver21 => "Age Over 21+",
            Self::CountryVerification => "Country Verification",
            Self::KycComplete => "KYC Completion",
            Self::CredentialCheck => "Credential Check",
        }
    }

    /// All supported attribute types.
    pub fn all() -> &'static [AttributeType] {
        &[
            Self::AgeOver18,
            Self::AgeOver21,
            Self::CountryVerification,
            Self::KycComplete,
            Self::CredentialCheck,
        ]
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AgeOver18 => "age_over_18",
            Self::AgeOver21 => "age_over_21",
            Self::CountryVerification => "country_verification",
            Self::KycComplete => "kyc_complete",
            Self::CredentialCheck => "credential_check",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for AttributeType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "age_over_18" => Ok(Self::AgeOver18),
            "age_over_21" => Ok(Self::AgeOver21),
            "country_verification" => Ok(Self::CountryVerification),
            "kyc_complete" => Ok(Self::KycComplete),
            "credential_check" => Ok(Self::CredentialCheck),
            _ => Err(CoreError::InvalidAttribute(s.to_string())),
        }
    }
}

/// A dApp's request to verify one attribute of a user's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Wallet of the user being verified.
    pub user_address: WalletAddress,
    /// Attribute to verify.
    pub attribute: AttributeType,
    /// Identifier of the requesting dApp.
    pub dapp_id: String,
    /// Optional pre-established gasless session to reuse.
    pub session_id: Option<String>,
}

/// One completed verification, as recorded in the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationEvent {
    /// Unique event identifier.
    pub id: String,
    /// Attribute that was verified.
    pub attribute: AttributeType,
    /// The requesting dApp.
    pub dapp: String,
    /// Outcome of the verification.
    pub result: bool,
    /// When the verification completed.
    pub timestamp: DateTime<Utc>,
    /// Ledger transaction that recorded the attestation.
    pub tx_hash: Option<String>,
    /// Reference to the proof presented.
    pub proof: Option<String>,
}

/// Outcome returned to the requesting dApp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Whether the attribute holds.
    pub verified: bool,
    /// Reference to the proof presented.
    pub proof: Option<String>,
    /// When the verification completed.
    pub timestamp: DateTime<Utc>,
    /// Ledger transaction that recorded the attestation.
    pub tx_hash: Option<String>,
}
