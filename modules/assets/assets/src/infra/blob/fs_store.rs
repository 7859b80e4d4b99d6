use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use crate::domain::blob::{BlobStore, StoredBlob, content_type_for_name, is_valid_blob_name};

/// Blob store backed by a flat local directory.
///
/// The content type is derived from the blob name's extension on read.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// # Errors
    /// Returns an error if the root directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("failed to create blob directory {}", root.display()))?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> anyhow::Result<PathBuf> {
        anyhow::ensure!(is_valid_blob_name(name), "invalid blob name '{name}'");
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, name: &str, bytes: Bytes, _content_type: &str) -> anyhow::Result<()> {
        let path = self.path_for(name)?;
        // write-then-rename so readers never observe a partial file
        let tmp = self.root.join(format!(".{}.tmp", Uuid::new_v4()));
        tokio::fs::write(&tmp, &bytes)
            .await
            .with_context(|| format!("failed to write blob '{name}'"))?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e).with_context(|| format!("failed to commit blob '{name}'"));
        }
        Ok(())
    }

    async fn get(&self, name: &str) -> anyhow::Result<Option<StoredBlob>> {
        let path = self.path_for(name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(StoredBlob {
                bytes: Bytes::from(bytes),
                content_type: content_type_for_name(name).to_owned(),
            })),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read blob '{name}'")),
        }
    }

    async fn delete(&self, name: &str) -> anyhow::Result<bool> {
        let path = self.path_for(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("failed to delete blob '{name}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::open(dir.path().join("blobs")).await.unwrap();

        store
            .put("x-original.png", Bytes::from_static(b"\x89PNG"), "image/png")
            .await
            .unwrap();
        assert!(store.root().join("x-original.png").is_file());

        let blob = store.get("x-original.png").await.unwrap().unwrap();
        assert_eq!(blob.content_type, "image/png");
        assert_eq!(&blob.bytes[..], b"\x89PNG");

        assert!(store.delete("x-original.png").await.unwrap());
        assert!(!store.delete("x-original.png").await.unwrap());
        assert!(store.get("x-original.png").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::open(dir.path()).await.unwrap();
        assert!(store.get("../secret").await.is_err());
        assert!(
            store
                .put("a/b.jpg", Bytes::from_static(b"x"), "image/jpeg")
                .await
                .is_err()
        );
    }
}
