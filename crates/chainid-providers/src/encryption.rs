//! Encryption capability: profile data is encrypted under access-control
//! conditions before it ever reaches the content store.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use chainid_core::WalletAddress;

use crate::error::ProviderError;

/// One condition a caller must satisfy to decrypt a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessControlCondition {
    pub contract_address: String,
    pub standard_contract_type: String,
    pub chain: String,
    pub method: String,
    pub parameters: Vec<String>,
    pub return_value_test: ReturnValueTest,
}

/// Comparison applied to the resolved parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnValueTest {
    pub comparator: String,
    pub value: String,
}

/// Conditions that restrict decryption to the owning wallet.
pub fn generate_access_control_conditions(
    wallet: &WalletAddress,
) -> Vec<AccessControlCondition> {
    vec![AccessControlCondition {
        contract_address: String::new(),
        standard_contract_type: String::new(),
        chain: "hedera".into(),
        method: String::new(),
        parameters: vec![":userAddress".into()],
        return_value_test: ReturnValueTest {
            comparator: "=".into(),
            value: wallet.as_str().to_string(),
        },
    }]
}

/// An encrypted payload together with everything needed to decrypt it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    /// The ciphertext, base64-encoded.
    pub ciphertext: String,
    /// Identifier of the wrapped symmetric key.
    pub key_id: String,
    /// Conditions under which the key is released.
    pub conditions: Vec<AccessControlCondition>,
}

/// Encrypts and decrypts payloads under access-control conditions.
///
/// The production implementation will delegate to a key-management
/// network; `PassthroughEncryption` is the deterministic stand-in.
#[async_trait]
pub trait EncryptionProvider: Send + Sync {
    /// Encrypt a payload under the given conditions.
    async fn encrypt(
        &self,
        plaintext: &[u8],
        conditions: &[AccessControlCondition],
    ) -> Result<EncryptedEnvelope, ProviderError>;

    /// Decrypt an envelope.
    async fn decrypt(&self, envelope: &EncryptedEnvelope) -> Result<Vec<u8>, ProviderError>;
}

#[async_trait]
impl<T: EncryptionProvider + ?Sized> EncryptionProvider for std::sync::Arc<T> {
    async fn encrypt(
        &self,
        plaintext: &[u8],
        conditions: &[AccessControlCondition],
    ) -> Result<EncryptedEnvelope, ProviderError> {
        (**self).encrypt(plaintext, conditions).await
    }

    async fn decrypt(&self, envelope: &EncryptedEnvelope) -> Result<Vec<u8>, ProviderError> {
        (**self).decrypt(envelope).await
    }
}

/// Deterministic encryption stand-in: base64 envelope plus a key id
/// derived from the payload digest. Offers no confidentiality.
#[derive(Debug, Default)]
pub struct PassthroughEncryption;

impl PassthroughEncryption {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EncryptionProvider for PassthroughEncryption {
    async fn encrypt(
        &self,
        plaintext: &[u8],
        conditions: &[AccessControlCondition],
    ) -> Result<EncryptedEnvelope, ProviderError> {
        let digest = Sha256::digest(plaintext);
        let key_id = format!("key-{}", hex::encode(&digest[..8]));

        tracing::debug!(key_id = %key_id, bytes = plaintext.len(), "encrypting payload");

        Ok(EncryptedEnvelope {
            ciphertext: BASE64.encode(plaintext),
            key_id,
            conditions: conditions.to_vec(),
        })
    }

    async fn decrypt(&self, envelope: &EncryptedEnvelope) -> Result<Vec<u8>, ProviderError> {
        BASE64
            .decode(&envelope.ciphertext)
            .map_err(|e| ProviderError::Encryption(format!("invalid ciphertext: {}", e)))
    }
}
