//! Authenticated wallet sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chainid_core::WalletAddress;

/// An authenticated wallet session.
///
/// Passed explicitly into every service call; there is no ambient
/// global session, so tests can construct isolated instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    wallet_address: WalletAddress,
    established_at: DateTime<Utc>,
}

impl AuthSession {
    /// Establish a session for a connected wallet.
    pub fn establish(wallet_address: WalletAddress) -> Self {
        Self {
            wallet_address,
            established_at: Utc::now(),
        }
    }

    /// The wallet this session authenticates.
    pub fn wallet(&self) -> &WalletAddress {
        &self.wallet_address
    }

    /// When the wallet connected.
    pub fn established_at(&self) -> DateTime<Utc> {
        self.established_at
    }
}
