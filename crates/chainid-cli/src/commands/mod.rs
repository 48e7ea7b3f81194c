pub mod history;
pub mod init;
pub mod register;
pub mod revoke;
pub mod status;
pub mod validate;
pub mod verify;

use std::sync::Arc;

use chainid_identity::{RegistrationService, VerificationService};
use chainid_providers::{
    InMemoryAuditLog, InMemoryContentStore, InMemoryLedger, InMemorySessionBroker,
    PassthroughEncryption,
};

pub(crate) type DemoRegistration = RegistrationService<
    Arc<PassthroughEncryption>,
    Arc<InMemoryContentStore>,
    Arc<InMemoryLedger>,
    Arc<InMemoryAuditLog>,
>;

pub(crate) type DemoVerification = VerificationService<
    Arc<PassthroughEncryption>,
    Arc<InMemoryContentStore>,
    Arc<InMemoryLedger>,
    Arc<InMemoryAuditLog>,
    Arc<InMemorySessionBroker>,
>;

/// Registration and verification services sharing one set of in-memory
/// providers.
pub(crate) struct DemoStack {
    pub registration: DemoRegistration,
    pub verification: DemoVerification,
}

pub(crate) fn demo_stack() -> DemoStack {
    let encryption = Arc::new(PassthroughEncryption::new());
    let store = Arc::new(InMemoryContentStore::new());
    let ledger = Arc::new(InMemoryLedger::new());
    let audit = Arc::new(InMemoryAuditLog::new());
    let broker = Arc::new(InMemorySessionBroker::new());

    DemoStack {
        registration: RegistrationService::new(
            Arc::clone(&encryption),
            Arc::clone(&store),
            Arc::clone(&ledger),
            Arc::clone(&audit),
        ),
        verification: VerificationService::new(encryption, store, ledger, audit, broker),
    }
}
