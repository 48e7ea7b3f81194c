//! Content-addressed storage capability.

use async_trait::async_trait;
use dashmap::DashMap;

use chainid_core::ContentId;

use crate::error::ProviderError;

/// Content-addressed blob storage.
///
/// The production implementation will talk to an IPFS pinning service;
/// `InMemoryContentStore` keeps blobs in-process for tests and demos.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store a blob and return its content identifier.
    async fn put(&self, data: &[u8]) -> Result<ContentId, ProviderError>;

    /// Retrieve a blob by content identifier.
    async fn get(&self, id: &ContentId) -> Result<Vec<u8>, ProviderError>;

    /// Pin a blob so it is retained.
    async fn pin(&self, id: &ContentId) -> Result<(), ProviderError>;
}

#[async_trait]
impl<T: ContentStore + ?Sized> ContentStore for std::sync::Arc<T> {
    async fn put(&self, data: &[u8]) -> Result<ContentId, ProviderError> {
        (**self).put(data).await
    }

    async fn get(&self, id: &ContentId) -> Result<Vec<u8>, ProviderError> {
        (**self).get(id).await
    }

    async fn pin(&self, id: &ContentId) -> Result<(), ProviderError> {
        (**self).pin(id).await
    }
}

struct StoredBlob {
    data: Vec<u8>,
    pinned: bool,
}

/// In-process content store keyed by real CIDv0 identifiers, so every
/// id it hands out satisfies the legacy-CID shape check.
#[derive(Default)]
pub struct InMemoryContentStore {
    blobs: DashMap<String, StoredBlob>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    /// Whether a blob is pinned.
    pub fn is_pinned(&self, id: &ContentId) -> bool {
        self.blobs
            .get(id.as_str())
            .map(|blob| blob.pinned)
            .unwrap_or(false)
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn put(&self, data: &[u8]) -> Result<ContentId, ProviderError> {
        let id = ContentId::for_content(data);
        self.blobs.insert(
            id.as_str().to_string(),
            StoredBlob {
                data: data.to_vec(),
                pinned: false,
            },
        );
        tracing::debug!(cid = %id, bytes = data.len(), "stored content");
        Ok(id)
    }

    async fn get(&self, id: &ContentId) -> Result<Vec<u8>, ProviderError> {
        self.blobs
            .get(id.as_str())
            .map(|blob| blob.data.clone())
            .ok_or_else(|| ProviderError::ContentNotFound(id.to_string()))
    }

    async fn pin(&self, id: &ContentId) -> Result<(), ProviderError> {
        let mut blob = self
            .blobs
            .get_mut(id.as_str())
            .ok_or_else(|| ProviderError::ContentNotFound(id.to_string()))?;
        blob.pinned = true;
        Ok(())
    }
}
