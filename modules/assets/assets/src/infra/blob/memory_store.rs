use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use crate::domain::blob::{BlobStore, StoredBlob};

/// Process-local blob store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, StoredBlob>,
}

impl MemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.blobs.contains_key(name)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, name: &str, bytes: Bytes, content_type: &str) -> anyhow::Result<()> {
        self.blobs.insert(
            name.to_owned(),
            StoredBlob {
                bytes,
                content_type: content_type.to_owned(),
            },
        );
        Ok(())
    }

    async fn get(&self, name: &str) -> anyhow::Result<Option<StoredBlob>> {
        Ok(self.blobs.get(name).map(|entry| entry.value().clone()))
    }

    async fn delete(&self, name: &str) -> anyhow::Result<bool> {
        Ok(self.blobs.remove(name).is_some())
    }
}
