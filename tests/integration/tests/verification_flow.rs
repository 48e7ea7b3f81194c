//! Integration test: Attribute verification over the full stack.
//!
//! Registers through RegistrationService, then verifies through
//! VerificationService sharing the same providers.

use std::sync::Arc;

use chainid_core::{AttributeType, CredentialStatus, VerificationRequest, WalletAddress};
use chainid_identity::{
    AuthSession, IdentityError, RegistrationService, VerificationService,
};
use chainid_providers::{
    InMemoryAuditLog, InMemoryContentStore, InMemoryLedger, InMemorySessionBroker,
    LedgerClient, PassthroughEncryption, SessionBroker,
};
use chainid_validation::RegistrationInput;

struct Harness {
    registration: RegistrationService<
        Arc<PassthroughEncryption>,
        Arc<InMemoryContentStore>,
        Arc<InMemoryLedger>,
        Arc<InMemoryAuditLog>,
    >,
    verification: VerificationService<
        Arc<PassthroughEncryption>,
        Arc<InMemoryContentStore>,
        Arc<InMemoryLedger>,
        Arc<InMemoryAuditLog>,
        Arc<InMemorySessionBroker>,
    >,
    ledger: Arc<InMemoryLedger>,
    broker: Arc<InMemorySessionBroker>,
}

fn harness() -> Harness {
    let encryption = Arc::new(PassthroughEncryption::new());
    let store = Arc::new(InMemoryContentStore::new());
    let ledger = Arc::new(InMemoryLedger::new());
    let audit = Arc::new(InMemoryAuditLog::new());
    let broker = Arc::new(InMemorySessionBroker::new());

    Harness {
        registration: RegistrationService::new(
            Arc::clone(&encryption),
            Arc::clone(&store),
            Arc::clone(&ledger),
            Arc::clone(&audit),
        ),
        verification: VerificationService::new(
            encryption,
            store,
            Arc::clone(&ledger),
            audit,
            Arc::clone(&broker),
        ),
        ledger,
        broker,
    }
}

fn wallet() -> WalletAddress {
    WalletAddress::new("0x742d35Cc6634C0532925a3b8D4C5fD7E492c0b17").unwrap()
}

async fn register(h: &Harness, date_of_birth: &str) {
    let input = RegistrationInput {
        full_name: "Jane Doe".into(),
        date_of_birth: date_of_birth.into(),
        country: "Canada".into(),
        government_id: None,
        selfie: None,
    };
    h.registration
        .register(&AuthSession::establish(wallet()), &input)
        .await
        .unwrap();
}

fn request(attribute: AttributeType) -> VerificationRequest {
    VerificationRequest {
        user_address: wallet(),
        attribute,
        dapp_id: "defi-swap".into(),
        session_id: None,
    }
}

#[tokio::test]
async fn register_then_verify_age() {
    let h = harness();
    register(&h, "1990-01-01").await;

    let result = h
        .verification
        .verify(&request(AttributeType::AgeOver18))
        .await
        .unwrap();
    assert!(result.verified);
    assert!(result.tx_hash.unwrap().starts_with("0x"));

    // The attestation shows up in the ledger's count.
    let on_ledger = h.ledger.identity_of(&wallet()).await.unwrap().unwrap();
    assert_eq!(on_ledger.verification_count, 1);
}

#[tokio::test]
async fn verification_history_accumulates() {
    let h = harness();
    register(&h, "1990-01-01").await;

    for attribute in [
        AttributeType::AgeOver18,
        AttributeType::CountryVerification,
        AttributeType::KycComplete,
    ] {
        h.verification.verify(&request(attribute)).await.unwrap();
    }

    let events = h.verification.history(&wallet()).await.unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].attribute, AttributeType::AgeOver18);
    assert_eq!(events[2].attribute, AttributeType::KycComplete);

    let on_ledger = h.ledger.identity_of(&wallet()).await.unwrap().unwrap();
    assert_eq!(on_ledger.verification_count, 3);
}

#[tokio::test]
async fn underage_profile_fails_age_checks_but_passes_country() {
    let h = harness();
    // A 19-year-old passes the registration age gate but not the 21
    // threshold, regardless of when the test runs.
    let dob = (chrono::Utc::now().date_naive() - chrono::Months::new(12 * 19))
        .format("%Y-%m-%d")
        .to_string();
    register(&h, &dob).await;

    let over_21 = h
        .verification
        .verify(&request(AttributeType::AgeOver21))
        .await
        .unwrap();
    assert!(!over_21.verified);

    let country = h
        .verification
        .verify(&request(AttributeType::CountryVerification))
        .await
        .unwrap();
    assert!(country.verified);
}

#[tokio::test]
async fn credentials_follow_the_verification_history() {
    let h = harness();
    register(&h, "1990-01-01").await;

    // No checks yet, so no credential backs a credential check.
    let check = h
        .verification
        .verify(&request(AttributeType::CredentialCheck))
        .await
        .unwrap();
    assert!(!check.verified);

    h.verification
        .verify(&request(AttributeType::KycComplete))
        .await
        .unwrap();

    let check = h
        .verification
        .verify(&request(AttributeType::CredentialCheck))
        .await
        .unwrap();
    assert!(check.verified);

    let credentials = h.verification.credentials(&wallet()).await.unwrap();
    assert_eq!(credentials.len(), 3);
    assert_eq!(credentials[0].status, CredentialStatus::Pending);
    assert_eq!(credentials[1].credential_type, "KYC Completion");
    assert_eq!(credentials[1].status, CredentialStatus::Verified);
    assert_eq!(credentials[2].status, CredentialStatus::Verified);
}

#[tokio::test]
async fn revoked_identity_cannot_be_verified() {
    let h = harness();
    register(&h, "1990-01-01").await;

    let on_ledger = h.ledger.identity_of(&wallet()).await.unwrap().unwrap();
    h.ledger.revoke(&on_ledger.token_id).await.unwrap();

    let err = h
        .verification
        .verify(&request(AttributeType::AgeOver18))
        .await
        .unwrap_err();
    assert!(matches!(err, IdentityError::IdentityRevoked));
}

#[tokio::test]
async fn sessions_can_be_settled_in_batch() {
    let h = harness();
    register(&h, "1990-01-01").await;

    let a = h.broker.create_session(&wallet()).await.unwrap();
    let b = h.broker.create_session(&wallet()).await.unwrap();

    let mut req = request(AttributeType::AgeOver18);
    req.session_id = Some(a.id.clone());
    h.verification.verify(&req).await.unwrap();

    let receipt = h
        .broker
        .settle_batch(&[a.id.clone(), b.id.clone()])
        .await
        .unwrap();
    assert_eq!(receipt.settled_count, 2);
    assert!(receipt.tx_hash.starts_with("0x"));

    // Settled sessions can no longer be used.
    let mut stale = request(AttributeType::AgeOver18);
    stale.session_id = Some(a.id);
    assert!(h.verification.verify(&stale).await.is_err());
}
