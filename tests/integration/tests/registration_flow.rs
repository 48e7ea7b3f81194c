//! Integration test: Full registration lifecycle across crates.
//!
//! Exercises chainid-validation, chainid-providers, and chainid-identity
//! together: validate → encrypt → store → mint → audit.

use std::sync::Arc;

use chainid_core::{IdentityStatus, WalletAddress};
use chainid_identity::{AuthSession, IdentityError, RegistrationService, TOPIC_IDENTITY};
use chainid_providers::{
    AuditLog, ContentStore, InMemoryAuditLog, InMemoryContentStore, InMemoryLedger,
    LedgerClient, PassthroughEncryption,
};
use chainid_validation::{validate_ipfs_hash, validate_wallet_address, RegistrationInput};

type Stack = RegistrationService<
    Arc<PassthroughEncryption>,
    Arc<InMemoryContentStore>,
    Arc<InMemoryLedger>,
    Arc<InMemoryAuditLog>,
>;

struct Harness {
    service: Stack,
    store: Arc<InMemoryContentStore>,
    ledger: Arc<InMemoryLedger>,
    audit: Arc<InMemoryAuditLog>,
}

fn harness() -> Harness {
    let encryption = Arc::new(PassthroughEncryption::new());
    let store = Arc::new(InMemoryContentStore::new());
    let ledger = Arc::new(InMemoryLedger::new());
    let audit = Arc::new(InMemoryAuditLog::new());
    Harness {
        service: RegistrationService::new(
            encryption,
            Arc::clone(&store),
            Arc::clone(&ledger),
            Arc::clone(&audit),
        ),
        store,
        ledger,
        audit,
    }
}

fn wallet() -> WalletAddress {
    WalletAddress::new("0x742d35Cc6634C0532925a3b8D4C5fD7E492c0b17").unwrap()
}

fn input() -> RegistrationInput {
    RegistrationInput {
        full_name: "Jane Doe".into(),
        date_of_birth: "1990-01-01".into(),
        country: "Canada".into(),
        government_id: None,
        selfie: None,
    }
}

#[tokio::test]
async fn registration_produces_consistent_identity() {
    let h = harness();
    let session = AuthSession::establish(wallet());

    let identity = h.service.register(&session, &input()).await.unwrap();

    // The record itself satisfies the field validators.
    assert!(validate_wallet_address(identity.wallet_address.as_str()));
    assert!(validate_ipfs_hash(identity.content_id.as_str()));
    assert_eq!(identity.status, IdentityStatus::Active);

    // The ledger agrees with the returned record.
    let on_ledger = h.ledger.identity_of(&wallet()).await.unwrap().unwrap();
    assert_eq!(on_ledger.token_id, identity.token_id);
    assert_eq!(on_ledger.content_id, identity.content_id);
    assert!(!on_ledger.revoked);

    // The encrypted envelope is stored and pinned.
    assert!(h.store.get(&identity.content_id).await.is_ok());
    assert!(h.store.is_pinned(&identity.content_id));
}

#[tokio::test]
async fn stored_envelope_never_contains_plaintext() {
    let h = harness();
    let session = AuthSession::establish(wallet());
    let identity = h.service.register(&session, &input()).await.unwrap();

    let blob = h.store.get(&identity.content_id).await.unwrap();
    let text = String::from_utf8_lossy(&blob);
    assert!(!text.contains("Jane Doe"));
    assert!(!text.contains("1990-01-01"));

    // Decrypting through the service recovers the claims.
    let profile = h.service.fetch_profile(&session).await.unwrap();
    assert_eq!(profile.full_name, "Jane Doe");
}

#[tokio::test]
async fn invalid_input_prevents_any_side_effect() {
    let h = harness();
    let session = AuthSession::establish(wallet());

    let underage = (chrono::Utc::now().date_naive() - chrono::Months::new(12 * 10))
        .format("%Y-%m-%d")
        .to_string();
    let bad = RegistrationInput {
        full_name: "".into(),
        date_of_birth: underage,
        country: "".into(),
        government_id: None,
        selfie: None,
    };
    let err = h.service.register(&session, &bad).await.unwrap_err();
    let IdentityError::InvalidInput(errors) = err else {
        panic!("expected InvalidInput");
    };
    assert_eq!(
        errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>(),
        vec!["fullName", "dateOfBirth", "country"]
    );

    // Nothing was stored, minted, or logged.
    assert!(h.store.is_empty());
    assert!(h.ledger.identity_of(&wallet()).await.unwrap().is_none());
    assert!(h.audit.query(TOPIC_IDENTITY).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_registration_leaves_store_untouched() {
    let h = harness();
    let session = AuthSession::establish(wallet());
    h.service.register(&session, &input()).await.unwrap();
    assert_eq!(h.store.len(), 1);

    let err = h
        .service
        .register(
            &session,
            &RegistrationInput {
                full_name: "Janet Doe".into(),
                ..input()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, IdentityError::AlreadyRegistered(_)));

    // The rejected attempt stored no second envelope and logged nothing.
    assert_eq!(h.store.len(), 1);
    assert_eq!(h.audit.query(TOPIC_IDENTITY).await.unwrap().len(), 1);
}

#[tokio::test]
async fn revocation_is_reflected_everywhere() {
    let h = harness();
    let session = AuthSession::establish(wallet());
    let identity = h.service.register(&session, &input()).await.unwrap();

    let revoked = h.service.revoke(&session, identity).await.unwrap();
    assert_eq!(revoked.status, IdentityStatus::Revoked);

    let on_ledger = h.ledger.identity_of(&wallet()).await.unwrap().unwrap();
    assert!(on_ledger.revoked);

    let entries = h.audit.query(TOPIC_IDENTITY).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].message["event"], "identity_registered");
    assert_eq!(entries[1].message["event"], "identity_revoked");

    let txs = h.ledger.transactions(&wallet()).await.unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[1].kind, "Revocation");
}

#[tokio::test]
async fn two_wallets_register_independently() {
    let h = harness();
    let other = WalletAddress::new("0x0000000000000000000000000000000000000042").unwrap();

    let a = h
        .service
        .register(&AuthSession::establish(wallet()), &input())
        .await
        .unwrap();
    let b = h
        .service
        .register(
            &AuthSession::establish(other.clone()),
            &RegistrationInput {
                full_name: "John Roe".into(),
                ..input()
            },
        )
        .await
        .unwrap();

    assert_ne!(a.token_id, b.token_id);
    assert_ne!(a.content_id, b.content_id);

    let profile = h
        .service
        .fetch_profile(&AuthSession::establish(other))
        .await
        .unwrap();
    assert_eq!(profile.full_name, "John Roe");
}
