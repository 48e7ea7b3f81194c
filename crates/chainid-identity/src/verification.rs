//! Attribute verification: a dApp asks whether an identity satisfies an
//! attribute without learning the underlying claims.

use chrono::Utc;
use uuid::Uuid;

use chainid_core::{
    AttributeType, Credential, CredentialStatus, VerificationEvent, VerificationRequest,
    VerificationResult, WalletAddress,
};
use chainid_providers::{
    AuditLog, ContentStore, EncryptedEnvelope, EncryptionProvider, LedgerClient, SessionBroker,
};
use chainid_validation::{validate_age, validate_registration_form};

use crate::error::IdentityError;
use crate::profile::IdentityProfile;

/// Audit topic for verification events.
pub const TOPIC_VERIFICATION: &str = "verification";

/// Serves dApp verification requests over the capability providers.
pub struct VerificationService<E, C, L, A, S> {
    encryption: E,
    store: C,
    ledger: L,
    audit: A,
    broker: S,
}

impl<E, C, L, A, S> VerificationService<E, C, L, A, S>
where
    E: EncryptionProvider,
    C: ContentStore,
    L: LedgerClient,
    A: AuditLog,
    S: SessionBroker,
{
    pub fn new(encryption: E, store: C, ledger: L, audit: A, broker: S) -> Self {
        Self {
            encryption,
            store,
            ledger,
            audit,
            broker,
        }
    }

    /// Verify one attribute of a user's identity.
    ///
    /// Opens a gasless session (unless the request carries one),
    /// evaluates the attribute against the decrypted profile, executes
    /// the check off-chain, records the attestation on the ledger, and
    /// appends a verification event to the audit log.
    pub async fn verify(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, IdentityError> {
        let wallet = &request.user_address;

        let session_id = match &request.session_id {
            Some(id) => id.clone(),
            None => self.broker.create_session(wallet).await?.id,
        };

        let profile = self.load_profile(wallet).await?;
        let verified = self.evaluate(wallet, &profile, request.attribute).await?;

        self.broker
            .execute_offchain(&session_id, &request.attribute.to_string())
            .await?;

        let tx_hash = self
            .ledger
            .record_attestation(wallet, request.attribute, verified)
            .await?;

        let timestamp = Utc::now();
        let event = VerificationEvent {
            id: Uuid::now_v7().to_string(),
            attribute: request.attribute,
            dapp: request.dapp_id.clone(),
            result: verified,
            timestamp,
            tx_hash: Some(tx_hash.clone()),
            proof: Some(format!("urn:uuid:{}", Uuid::now_v7())),
        };

        self.audit
            .record(
                TOPIC_VERIFICATION,
                serde_json::json!({
                    "user": wallet.as_str(),
                    "event": event,
                }),
            )
            .await?;

        tracing::info!(
            wallet = %wallet,
            attribute = %request.attribute,
            verified,
            "attribute verification completed"
        );

        Ok(VerificationResult {
            verified,
            proof: event.proof,
            timestamp,
            tx_hash: Some(tx_hash),
        })
    }

    /// Credentials held by a user, derived from the verification
    /// history: a passing check is a `Verified` credential, a failing
    /// one is `Pending`, and revoking the identity expires them all.
    pub async fn credentials(
        &self,
        user: &WalletAddress,
    ) -> Result<Vec<Credential>, IdentityError> {
        let revoked = self
            .ledger
            .identity_of(user)
            .await?
            .map(|identity| identity.revoked)
            .unwrap_or(false);

        let credentials = self
            .history(user)
            .await?
            .into_iter()
            .map(|event| {
                let status = if revoked {
                    CredentialStatus::Expired
                } else if event.result {
                    CredentialStatus::Verified
                } else {
                    CredentialStatus::Pending
                };
                Credential {
                    id: event.id,
                    credential_type: event.attribute.label().to_string(),
                    status,
                    issued_at: event.timestamp,
                    dapp: event.dapp,
                }
            })
            .collect();
        Ok(credentials)
    }

    /// Verification events previously recorded for a user, oldest first.
    pub async fn history(
        &self,
        user: &WalletAddress,
    ) -> Result<Vec<VerificationEvent>, IdentityError> {
        let entries = self.audit.query(TOPIC_VERIFICATION).await?;
        let mut events = Vec::new();
        for entry in entries {
            if entry.message["user"] == user.as_str() {
                let event: VerificationEvent =
                    serde_json::from_value(entry.message["event"].clone())?;
                events.push(event);
            }
        }
        Ok(events)
    }

    async fn load_profile(
        &self,
        wallet: &WalletAddress,
    ) -> Result<IdentityProfile, IdentityError> {
        let ledger_identity = self
            .ledger
            .identity_of(wallet)
            .await?
            .ok_or_else(|| IdentityError::NotRegistered(wallet.to_string()))?;
        if ledger_identity.revoked {
            return Err(IdentityError::IdentityRevoked);
        }

        let blob = self.store.get(&ledger_identity.content_id).await?;
        let envelope: EncryptedEnvelope = serde_json::from_slice(&blob)?;
        let payload = self.encryption.decrypt(&envelope).await?;
        Ok(serde_json::from_slice(&payload)?)
    }

    async fn evaluate(
        &self,
        wallet: &WalletAddress,
        profile: &IdentityProfile,
        attribute: AttributeType,
    ) -> Result<bool, IdentityError> {
        Ok(match attribute {
            AttributeType::AgeOver18 => validate_age(&profile.date_of_birth, 18),
            AttributeType::AgeOver21 => validate_age(&profile.date_of_birth, 21),
            AttributeType::CountryVerification => profile.country.trim().len() >= 2,
            AttributeType::KycComplete => {
                validate_registration_form(&profile.to_input()).is_empty()
            }
            // Holds when at least one earlier check produced a verified
            // credential.
            AttributeType::CredentialCheck => self
                .credentials(wallet)
                .await?
                .iter()
                .any(|credential| credential.status == CredentialStatus::Verified),
        })
    }
}
