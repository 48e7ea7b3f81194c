//! Ledger capability: identity token minting, attribute attestations,
//! and revocation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

use chainid_core::{AttributeType, ContentId, TokenId, WalletAddress};

use crate::error::ProviderError;

/// Receipt for a mint transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintReceipt {
    pub token_id: TokenId,
    pub tx_hash: String,
}

/// What the ledger knows about a registered identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerIdentity {
    pub token_id: TokenId,
    pub content_id: ContentId,
    pub created_at: DateTime<Utc>,
    pub revoked: bool,
    pub verification_count: u64,
}

/// One transaction touching an identity, as a block explorer would list it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxRecord {
    pub hash: String,
    pub kind: String,
    pub timestamp: DateTime<Utc>,
}

/// Smart-contract gateway for the identity registry.
///
/// The production implementation will submit transactions over JSON-RPC;
/// `InMemoryLedger` mimics the contract state in-process.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Mint an identity token bound to a wallet and an encrypted profile.
    /// Fails if the wallet already holds an identity.
    async fn mint_identity(
        &self,
        wallet: &WalletAddress,
        content_id: &ContentId,
    ) -> Result<MintReceipt, ProviderError>;

    /// Record an attribute attestation; returns the transaction hash.
    async fn record_attestation(
        &self,
        wallet: &WalletAddress,
        attribute: AttributeType,
        result: bool,
    ) -> Result<String, ProviderError>;

    /// Revoke the identity token; returns the transaction hash.
    async fn revoke(&self, token_id: &TokenId) -> Result<String, ProviderError>;

    /// Look up the identity bound to a wallet, if any.
    async fn identity_of(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Option<LedgerIdentity>, ProviderError>;

    /// Transactions recorded for a wallet, oldest first.
    async fn transactions(&self, wallet: &WalletAddress)
        -> Result<Vec<TxRecord>, ProviderError>;
}

#[async_trait]
impl<T: LedgerClient + ?Sized> LedgerClient for std::sync::Arc<T> {
    async fn mint_identity(
        &self,
        wallet: &WalletAddress,
        content_id: &ContentId,
    ) -> Result<MintReceipt, ProviderError> {
        (**self).mint_identity(wallet, content_id).await
    }

    async fn record_attestation(
        &self,
        wallet: &WalletAddress,
        attribute: AttributeType,
        result: bool,
    ) -> Result<String, ProviderError> {
        (**self).record_attestation(wallet, attribute, result).await
    }

    async fn revoke(&self, token_id: &TokenId) -> Result<String, ProviderError> {
        (**self).revoke(token_id).await
    }

    async fn identity_of(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Option<LedgerIdentity>, ProviderError> {
        (**self).identity_of(wallet).await
    }

    async fn transactions(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Vec<TxRecord>, ProviderError> {
        (**self).transactions(wallet).await
    }
}

/// In-process ledger fake with sequential token serials and transaction
/// hashes derived from the call payload, so runs are reproducible.
pub struct InMemoryLedger {
    serial: AtomicU64,
    nonce: AtomicU64,
    identities: DashMap<String, LedgerIdentity>,
    txs: DashMap<String, Vec<TxRecord>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            serial: AtomicU64::new(10001),
            nonce: AtomicU64::new(0),
            identities: DashMap::new(),
            txs: DashMap::new(),
        }
    }

    fn tx_hash(&self, kind: &str, payload: &str) -> String {
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
        let digest = Sha256::digest(format!("{}:{}:{}", kind, payload, nonce));
        format!("0x{}", hex::encode(&digest[..16]))
    }

    fn record_tx(&self, wallet: &str, kind: &str, hash: String) {
        self.txs.entry(wallet.to_string()).or_default().push(TxRecord {
            hash,
            kind: kind.to_string(),
            timestamp: Utc::now(),
        });
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn mint_identity(
        &self,
        wallet: &WalletAddress,
        content_id: &ContentId,
    ) -> Result<MintReceipt, ProviderError> {
        if self.identities.contains_key(wallet.as_str()) {
            return Err(ProviderError::Ledger(format!(
                "identity already registered for {}",
                wallet
            )));
        }

        let token_id = TokenId::from_serial(self.serial.fetch_add(1, Ordering::SeqCst));
        let tx_hash = self.tx_hash("mint", wallet.as_str());

        self.identities.insert(
            wallet.as_str().to_string(),
            LedgerIdentity {
                token_id: token_id.clone(),
                content_id: content_id.clone(),
                created_at: Utc::now(),
                revoked: false,
                verification_count: 0,
            },
        );
        self.record_tx(wallet.as_str(), "NFT Mint", tx_hash.clone());

        tracing::info!(wallet = %wallet, token_id = %token_id, tx = %tx_hash, "minted identity");
        Ok(MintReceipt { token_id, tx_hash })
    }

    async fn record_attestation(
        &self,
        wallet: &WalletAddress,
        attribute: AttributeType,
        result: bool,
    ) -> Result<String, ProviderError> {
        let mut identity = self
            .identities
            .get_mut(wallet.as_str())
            .ok_or_else(|| ProviderError::NoIdentity(wallet.to_string()))?;
        identity.verification_count += 1;
        drop(identity);

        let tx_hash = self.tx_hash(
            "attest",
            &format!("{}:{}:{}", wallet, attribute, result),
        );
        self.record_tx(wallet.as_str(), "Verification", tx_hash.clone());
        Ok(tx_hash)
    }

    async fn revoke(&self, token_id: &TokenId) -> Result<String, ProviderError> {
        let mut entry = self
            .identities
            .iter_mut()
            .find(|entry| entry.token_id == *token_id)
            .ok_or_else(|| ProviderError::Ledger(format!("unknown token: {}", token_id)))?;
        entry.revoked = true;
        let wallet = entry.key().clone();
        drop(entry);

        let tx_hash = self.tx_hash("revoke", token_id.as_str());
        self.record_tx(&wallet, "Revocation", tx_hash.clone());

        tracing::info!(token_id = %token_id, tx = %tx_hash, "revoked identity");
        Ok(tx_hash)
    }

    async fn identity_of(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Option<LedgerIdentity>, ProviderError> {
        Ok(self
            .identities
            .get(wallet.as_str())
            .map(|entry| entry.clone()))
    }

    async fn transactions(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Vec<TxRecord>, ProviderError> {
        Ok(self
            .txs
            .get(wallet.as_str())
            .map(|entry| entry.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet() -> WalletAddress {
        WalletAddress::new("0x742d35Cc6634C0532925a3b8D4C5fD7E492c0b17").unwrap()
    }

    fn cid() -> ContentId {
        ContentId::for_content(b"encrypted profile")
    }

    #[tokio::test]
    async fn test_mint_identity() {
        let ledger = InMemoryLedger::new();
        let receipt = ledger.mint_identity(&wallet(), &cid()).await.unwrap();
        assert_eq!(receipt.token_id.as_str(), "0.0.10001");
        assert!(receipt.tx_hash.starts_with("0x"));

        let identity = ledger.identity_of(&wallet()).await.unwrap().unwrap();
        assert_eq!(identity.token_id, receipt.token_id);
        assert!(!identity.revoked);
        assert_eq!(identity.verification_count, 0);
    }

    #[tokio::test]
    async fn test_mint_twice_fails() {
        let ledger = InMemoryLedger::new();
        ledger.mint_identity(&wallet(), &cid()).await.unwrap();
        assert!(matches!(
            ledger.mint_identity(&wallet(), &cid()).await,
            Err(ProviderError::Ledger(_))
        ));
    }

    #[tokio::test]
    async fn test_sequential_token_serials() {
        let ledger = InMemoryLedger::new();
        let other =
            WalletAddress::new("0x0000000000000000000000000000000000000001").unwrap();
        let a = ledger.mint_identity(&wallet(), &cid()).await.unwrap();
        let b = ledger.mint_identity(&other, &cid()).await.unwrap();
        assert_eq!(a.token_id.as_str(), "0.0.10001");
        assert_eq!(b.token_id.as_str(), "0.0.10002");
    }

    #[tokio::test]
    async fn test_attestation_increments_count() {
        let ledger = InMemoryLedger::new();
        ledger.mint_identity(&wallet(), &cid()).await.unwrap();

        let tx = ledger
            .record_attestation(&wallet(), AttributeType::AgeOver18, true)
            .await
            .unwrap();
        assert!(tx.starts_with("0x"));

        let identity = ledger.identity_of(&wallet()).await.unwrap().unwrap();
        assert_eq!(identity.verification_count, 1);
    }

    #[tokio::test]
    async fn test_attestation_without_identity() {
        let ledger = InMemoryLedger::new();
        assert!(matches!(
            ledger
                .record_attestation(&wallet(), AttributeType::AgeOver18, true)
                .await,
            Err(ProviderError::NoIdentity(_))
        ));
    }

    #[tokio::test]
    async fn test_revoke() {
        let ledger = InMemoryLedger::new();
        let receipt = ledger.mint_identity(&wallet(), &cid()).await.unwrap();
        ledger.revoke(&receipt.token_id).await.unwrap();

        let identity = ledger.identity_of(&wallet()).await.unwrap().unwrap();
        assert!(identity.revoked);
    }

    #[tokio::test]
    async fn test_revoke_unknown_token() {
        let ledger = InMemoryLedger::new();
        let result = ledger.revoke(&TokenId::from_serial(99999)).await;
        assert!(matches!(result, Err(ProviderError::Ledger(_))));
    }

    #[tokio::test]
    async fn test_transaction_history_in_order() {
        let ledger = InMemoryLedger::new();
        let receipt = ledger.mint_identity(&wallet(), &cid()).await.unwrap();
        ledger
            .record_attestation(&wallet(), AttributeType::KycComplete, true)
            .await
            .unwrap();
        ledger.revoke(&receipt.token_id).await.unwrap();

        let txs = ledger.transactions(&wallet()).await.unwrap();
        assert_eq!(txs.len(), 3);
        assert_eq!(txs[0].kind, "NFT Mint");
        assert_eq!(txs[1].kind, "Verification");
        assert_eq!(txs[2].kind, "Revocation");
    }

    #[tokio::test]
    async fn test_identity_of_unknown_wallet() {
        let ledger = InMemoryLedger::new();
        assert!(ledger.identity_of(&wallet()).await.unwrap().is_none());
    }
}
