//! Identity registration: validate → encrypt → store → mint → audit.

use chrono::Utc;

use chainid_core::{Identity, IdentityEvent, IdentityLifecycle, IdentityStatus};
use chainid_providers::{
    generate_access_control_conditions, AuditLog, ContentStore, EncryptedEnvelope,
    EncryptionProvider, LedgerClient,
};
use chainid_validation::{validate_registration_form, RegistrationInput};

use crate::error::IdentityError;
use crate::profile::IdentityProfile;
use crate::session::AuthSession;

/// Audit topic for identity lifecycle events.
pub const TOPIC_IDENTITY: &str = "identity";

/// Drives the identity registration lifecycle over the capability
/// providers.
pub struct RegistrationService<E, C, L, A> {
    encryption: E,
    store: C,
    ledger: L,
    audit: A,
}

impl<E, C, L, A> RegistrationService<E, C, L, A>
where
    E: EncryptionProvider,
    C: ContentStore,
    L: LedgerClient,
    A: AuditLog,
{
    pub fn new(encryption: E, store: C, ledger: L, audit: A) -> Self {
        Self {
            encryption,
            store,
            ledger,
            audit,
        }
    }

    /// Register an identity for the session's wallet.
    ///
    /// Pipeline: validate the form, encrypt the profile under
    /// wallet-bound access conditions, store the envelope, mint the
    /// identity token, and append an audit entry. Validation failures
    /// return the ordered per-field errors; a wallet that already holds
    /// an identity is rejected before anything is stored or minted.
    pub async fn register(
        &self,
        session: &AuthSession,
        input: &RegistrationInput,
    ) -> Result<Identity, IdentityError> {
        let errors = validate_registration_form(input);
        if !errors.is_empty() {
            return Err(IdentityError::InvalidInput(errors));
        }

        let wallet = session.wallet();
        if self.ledger.identity_of(wallet).await?.is_some() {
            return Err(IdentityError::AlreadyRegistered(wallet.to_string()));
        }

        let profile = IdentityProfile::from_input(input);
        let payload = serde_json::to_vec(&profile)?;

        let conditions = generate_access_control_conditions(wallet);
        let envelope = self.encryption.encrypt(&payload, &conditions).await?;

        let blob = serde_json::to_vec(&envelope)?;
        let content_id = self.store.put(&blob).await?;
        self.store.pin(&content_id).await?;

        let receipt = self.ledger.mint_identity(wallet, &content_id).await?;

        self.audit
            .record(
                TOPIC_IDENTITY,
                serde_json::json!({
                    "event": "identity_registered",
                    "wallet": wallet.as_str(),
                    "token_id": receipt.token_id.as_str(),
                    "content_id": content_id.as_str(),
                    "tx_hash": receipt.tx_hash,
                }),
            )
            .await?;

        tracing::info!(
            wallet = %wallet,
            token_id = %receipt.token_id,
            cid = %content_id,
            "identity registered"
        );

        Ok(Identity {
            token_id: receipt.token_id,
            wallet_address: wallet.clone(),
            content_id,
            created_at: Utc::now(),
            status: IdentityStatus::Active,
            verification_count: 0,
        })
    }

    /// The current identity record for the session's wallet, rebuilt
    /// from ledger state so the status and verification count are live.
    pub async fn identity_record(
        &self,
        session: &AuthSession,
    ) -> Result<Identity, IdentityError> {
        let wallet = session.wallet();
        let ledger_identity = self
            .ledger
            .identity_of(wallet)
            .await?
            .ok_or_else(|| IdentityError::NotRegistered(wallet.to_string()))?;

        let status = if ledger_identity.revoked {
            IdentityStatus::Revoked
        } else {
            IdentityStatus::Active
        };
        Ok(Identity {
            token_id: ledger_identity.token_id,
            wallet_address: wallet.clone(),
            content_id: ledger_identity.content_id,
            created_at: ledger_identity.created_at,
            status,
            verification_count: ledger_identity.verification_count,
        })
    }

    /// Fetch and decrypt the profile behind the session's identity.
    pub async fn fetch_profile(
        &self,
        session: &AuthSession,
    ) -> Result<IdentityProfile, IdentityError> {
        let wallet = session.wallet();
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
        let profile: IdentityProfile = serde_json::from_slice(&payload)?;
        Ok(profile)
    }

    /// Revoke the identity: ledger revocation, audit entry, and status
    /// transition. Returns the updated record.
    pub async fn revoke(
        &self,
        session: &AuthSession,
        identity: Identity,
    ) -> Result<Identity, IdentityError> {
        let status = IdentityLifecycle::transition(identity.status, IdentityEvent::Revoke)?;
        let tx_hash = self.ledger.revoke(&identity.token_id).await?;

        self.audit
            .record(
                TOPIC_IDENTITY,
                serde_json::json!({
                    "event": "identity_revoked",
                    "wallet": session.wallet().as_str(),
                    "token_id": identity.token_id.as_str(),
                    "tx_hash": tx_hash,
                }),
            )
            .await?;

        tracing::info!(token_id = %identity.token_id, "identity revoked");

        Ok(Identity { status, ..identity })
    }
}
