//! Gasless session capability: off-chain execution with batched
//! settlement.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

use chainid_core::WalletAddress;

use crate::error::ProviderError;

/// An open gasless session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub wallet: WalletAddress,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has expired at the given instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Receipt for one off-chain execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffchainReceipt {
    pub result: bool,
    pub gasless: bool,
}

/// Receipt for a batch settlement transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub tx_hash: String,
    pub settled_count: usize,
}

/// Opens gasless sessions, executes actions off-chain, and settles
/// batches on-chain.
///
/// The production implementation will speak the state-channel network's
/// protocol; `InMemorySessionBroker` tracks sessions in-process.
#[async_trait]
pub trait SessionBroker: Send + Sync {
    /// Open a session for a wallet.
    async fn create_session(&self, wallet: &WalletAddress) -> Result<Session, ProviderError>;

    /// Execute an action inside an open session without paying gas.
    async fn execute_offchain(
        &self,
        session_id: &str,
        action: &str,
    ) -> Result<OffchainReceipt, ProviderError>;

    /// Settle a batch of sessions in one on-chain transaction.
    async fn settle_batch(
        &self,
        session_ids: &[String],
    ) -> Result<SettlementReceipt, ProviderError>;
}

#[async_trait]
impl<T: SessionBroker + ?Sized> SessionBroker for std::sync::Arc<T> {
    async fn create_session(&self, wallet: &WalletAddress) -> Result<Session, ProviderError> {
        (**self).create_session(wallet).await
    }

    async fn execute_offchain(
        &self,
        session_id: &str,
        action: &str,
    ) -> Result<OffchainReceipt, ProviderError> {
        (**self).execute_offchain(session_id, action).await
    }

    async fn settle_batch(
        &self,
        session_ids: &[String],
    ) -> Result<SettlementReceipt, ProviderError> {
        (**self).settle_batch(session_ids).await
    }
}

/// In-process session broker with counter-derived session ids and a
/// configurable time-to-live (one hour by default).
pub struct InMemorySessionBroker {
    sessions: DashMap<String, Session>,
    counter: AtomicU64,
    ttl: Duration,
}

impl InMemorySessionBroker {
    pub fn new() -> Self {
        Self::with_ttl(Duration::hours(1))
    }

    /// Broker with a custom session time-to-live.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            counter: AtomicU64::new(0),
            ttl,
        }
    }

    fn lookup(&self, session_id: &str) -> Result<Session, ProviderError> {
        let session = self
            .sessions
            .get(session_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| ProviderError::UnknownSession(session_id.to_string()))?;
        if session.is_expired_at(Utc::now()) {
            return Err(ProviderError::SessionExpired(session_id.to_string()));
        }
        Ok(session)
    }
}

impl Default for InMemorySessionBroker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionBroker for InMemorySessionBroker {
    async fn create_session(&self, wallet: &WalletAddress) -> Result<Session, ProviderError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let digest = Sha256::digest(format!("{}:{}", wallet, n));
        let id = format!("session-{}", hex::encode(&digest[..6]));

        let now = Utc::now();
        let session = Session {
            id: id.clone(),
            wallet: wallet.clone(),
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.sessions.insert(id.clone(), session.clone());

        tracing::debug!(session = %id, wallet = %wallet, "opened gasless session");
        Ok(session)
    }

    async fn execute_offchain(
        &self,
        session_id: &str,
        action: &str,
    ) -> Result<OffchainReceipt, ProviderError> {
        let session = self.lookup(session_id)?;
        tracing::debug!(session = %session.id, action = action, "executed off-chain");
        Ok(OffchainReceipt {
            result: true,
            gasless: true,
        })
    }

    async fn settle_batch(
        &self,
        session_ids: &[String],
    ) -> Result<SettlementReceipt, ProviderError> {
        for id in session_ids {
            // Settlement requires the session to exist, expired or not.
            if !self.sessions.contains_key(id) {
                return Err(ProviderError::UnknownSession(id.clone()));
            }
        }

        let digest = Sha256::digest(session_ids.join(","));
        let tx_hash = format!("0x{}", hex::encode(&digest[..16]));

        for id in session_ids {
            self.sessions.remove(id);
        }

        tracing::info!(count = session_ids.len(), tx = %tx_hash, "settled session batch");
        Ok(SettlementReceipt {
            tx_hash,
            settled_count: session_ids.len(),
        })
    }
}
