//! Append-only audit log capability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// One entry in a consensus-ordered topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Position within the topic, starting at 1.
    pub sequence_number: u64,
    /// Topic the entry belongs to.
    pub topic: String,
    /// Arbitrary JSON message body.
    pub message: serde_json::Value,
    /// When consensus was reached on the entry.
    pub consensus_timestamp: DateTime<Utc>,
}

/// Append-only, per-topic ordered log.
///
/// The production implementation will write to a consensus service;
/// `InMemoryAuditLog` keeps topics in-process.
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Append a message to a topic.
    async fn record(
        &self,
        topic: &str,
        message: serde_json::Value,
    ) -> Result<AuditEntry, ProviderError>;

    /// Read back a topic's entries in sequence order.
    async fn query(&self, topic: &str) -> Result<Vec<AuditEntry>, ProviderError>;
}

#[async_trait]
impl<T: AuditLog + ?Sized> AuditLog for std::sync::Arc<T> {
    async fn record(
        &self,
        topic: &str,
        message: serde_json::Value,
    ) -> Result<AuditEntry, ProviderError> {
        (**self).record(topic, message).await
    }

    async fn query(&self, topic: &str) -> Result<Vec<AuditEntry>, ProviderError> {
        (**self).query(topic).await
    }
}

/// In-process audit log with per-topic sequence numbers.
#[derive(Default)]
pub struct InMemoryAuditLog {
    topics: DashMap<String, Vec<AuditEntry>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditLog for InMemoryAuditLog {
    async fn record(
        &self,
        topic: &str,
        message: serde_json::Value,
    ) -> Result<AuditEntry, ProviderError> {
        let mut entries = self.topics.entry(topic.to_string()).or_default();
        let entry = AuditEntry {
            sequence_number: entries.len() as u64 + 1,
            topic: topic.to_string(),
            message,
            consensus_timestamp: Utc::now(),
        };
        entries.push(entry.clone());

        tracing::debug!(topic = topic, seq = entry.sequence_number, "recorded audit entry");
        Ok(entry)
    }

    async fn query(&self, topic: &str) -> Result<Vec<AuditEntry>, ProviderError> {
        Ok(self
            .topics
            .get(topic)
            .map(|entries| entries.clone())
            .unwrap_or_default())
    }
}
