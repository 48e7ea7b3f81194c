use std::fmt;

use crate::error::CoreError;

/// The states of an on-ledger identity token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum IdentityStatus {
    /// Identity is registered and usable for verifications.
    Active,
    /// Identity is temporarily suspended by the holder or an operator.
    Suspended,
    /// Identity has been permanently revoked. Final state.
    Revoked,
}

impl IdentityStatus {
    /// Whether this is a final (terminal) state.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Revoked)
    }
}

impl fmt::Display for IdentityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Suspended => write!(f, "Suspended"),
            Self::Revoked => write!(f, "Revoked"),
        }
    }
}

/// Events that trigger identity status transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityEvent {
    /// Temporarily suspend the identity.
    Suspend,
    /// Reinstate a suspended identity.
    Reinstate,
    /// Permanently revoke the identity.
    Revoke,
}

/// Manages identity status transitions.
///
/// Valid transitions:
/// - Active → Suspended (Suspend)
/// - Active → Revoked (Revoke)
/// - Suspended → Active (Reinstate)
/// - Suspended → Revoked (Revoke)
pub struct IdentityLifecycle;

impl IdentityLifecycle {
    /// Attempt a status transition based on an event.
    /// Returns the new status on success, or an error for invalid transitions.
    pub fn transition(
        current: IdentityStatus,
        event: IdentityEvent,
    ) -> Result<IdentityStatus, CoreError> {
        let new_status = match (current, event) {
            (IdentityStatus::Active, IdentityEvent::Suspend) => IdentityStatus::Suspended,
            (IdentityStatus::Active, IdentityEvent::Revoke) => IdentityStatus::Revoked,
            (IdentityStatus::Suspended, IdentityEvent::Reinstate) => IdentityStatus::Active,
            (IdentityStatus::Suspended, IdentityEvent::Revoke) => IdentityStatus::Revoked,
            _ => {
                let target = match event {
                    IdentityEvent::Suspend => IdentityStatus::Suspended,
                    IdentityEvent::Reinstate => IdentityStatus::Active,
                    IdentityEvent::Revoke => IdentityStatus::Revoked,
                };
                return Err(CoreError::InvalidStatusTransition {
                    from: current,
                    to: target,
                });
            }
        };

        tracing::debug!(
            from = %current,
            to = %new_status,
            event = ?event,
            "identity status transition"
        );

        Ok(new_status)
    }

    /// Check if a transition is valid without performing it.
    pub fn can_transition(current: IdentityStatus, event: IdentityEvent) -> bool {
        Self::transition(current, event).is_ok()
    }
}
