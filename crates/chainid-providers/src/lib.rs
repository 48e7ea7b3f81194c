//! ChainID Providers: capability interfaces for the external systems
//! the identity flows depend on, each with one deterministic in-process
//! implementation.
//!
//! - [`EncryptionProvider`]: key-management-network encryption
//! - [`ContentStore`]: content-addressed blob storage
//! - [`LedgerClient`]: identity-registry smart contracts
//! - [`AuditLog`]: consensus-ordered audit topics
//! - [`SessionBroker`]: gasless sessions with batched settlement
//!
//! The in-memory implementations never perform network I/O and never
//! sleep; production implementations arrive behind the same traits.

pub mod audit;
pub mod content_store;
pub mod encryption;
pub mod error;
pub mod ledger;
pub mod session;

pub use audit::{AuditEntry, AuditLog, InMemoryAuditLog};
pub use content_store::{ContentStore, InMemoryContentStore};
pub use encryption::{
    generate_access_control_conditions, AccessControlCondition, EncryptedEnvelope,
    EncryptionProvider, PassthroughEncryption, ReturnValueTest,
};
pub use error::ProviderError;
pub use ledger::{InMemoryLedger, LedgerClient, LedgerIdentity, MintReceipt, TxRecord};
pub use session::{
    InMemorySessionBroker, OffchainReceipt, Session, SessionBroker, SettlementReceipt,
};
