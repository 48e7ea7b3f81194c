//! Configuration loading and management.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CoreError;

/// Full configuration for a ChainID deployment.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChainIdConfig {
    /// Target network settings.
    #[serde(default)]
    pub network: NetworkConfig,

    /// Deployed contract addresses.
    #[serde(default)]
    pub contracts: ContractConfig,

    /// Identity API endpoint paths.
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Ledger network the identity contracts are deployed on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// EVM chain ID.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Network display name.
    #[serde(default = "default_network_name")]
    pub name: String,
    /// JSON-RPC endpoint.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Block explorer base URL.
    #[serde(default = "default_explorer_url")]
    pub explorer_url: String,
}

/// Addresses of the deployed identity contracts.
///
/// Placeholders until the contracts are deployed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Main ChainID contract.
    #[serde(default = "default_contract_addr")]
    pub identity: String,
    /// IdentityVerifier contract.
    #[serde(default = "default_contract_addr")]
    pub verifier: String,
    /// IdentityRegistry contract.
    #[serde(default = "default_contract_addr")]
    pub registry: String,
}

/// Paths of the identity API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_register_path")]
    pub register: String,
    #[serde(default = "default_identity_path")]
    pub identity: String,
    #[serde(default = "default_revoke_path")]
    pub revoke: String,
    #[serde(default = "default_verify_request_path")]
    pub verify_request: String,
    #[serde(default = "default_verify_history_path")]
    pub verify_history: String,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_chain_id() -> u64 {
    296
}
fn default_network_name() -> String {
    "Hedera Testnet".into()
}
fn default_rpc_url() -> String {
    "https://testnet.hashio.io/api".into()
}
fn default_explorer_url() -> String {
    "https://hashscan.io/testnet".into()
}
fn default_contract_addr() -> String {
    "0x...".into()
}
fn default_register_path() -> String {
    "/api/identity/register".into()
}
fn default_identity_path() -> String {
    "/api/identity".into()
}
fn default_revoke_path() -> String {
    "/api/identity/revoke".into()
}
fn default_verify_request_path() -> String {
    "/api/verify/request".into()
}
fn default_verify_history_path() -> String {
    "/api/verify/history".into()
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            name: default_network_name(),
            rpc_url: default_rpc_url(),
            explorer_url: default_explorer_url(),
        }
    }
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            identity: default_contract_addr(),
            verifier: default_contract_addr(),
            registry: default_contract_addr(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            register: default_register_path(),
            identity: default_identity_path(),
            revoke: default_revoke_path(),
            verify_request: default_verify_request_path(),
            verify_history: default_verify_history_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ChainIdConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: ChainIdConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Explorer URL for a transaction hash.
    pub fn explorer_tx_url(&self, tx_hash: &str) -> String {
        format!("{}/transaction/{}", self.network.explorer_url, tx_hash)
    }
}
