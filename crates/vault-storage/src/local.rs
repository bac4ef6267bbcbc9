//! Local filesystem blob store.

use std::path::PathBuf;

use async_trait::async_trait;
use futures::stream::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};
use uuid::Uuid;

use vault_core::error::{ErrorKind, VaultError};
use vault_core::result::VaultResult;
use vault_core::traits::blob::{BlobStore, ByteStream};
use vault_core::types::key::validate_key;

/// Local filesystem blob store.
///
/// Blobs live directly under the storage root, one file per storage key.
/// Writes go to a dot-prefixed temporary file and are published with an
/// atomic rename, so readers never observe a partially written blob.
/// Sanitized keys never start with a dot, which keeps temporaries invisible
/// to every other operation.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Root directory for all stored blobs.
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a blob store rooted at the given path, creating it if needed.
    pub async fn new(root_path: &str) -> VaultResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            VaultError::with_source(
                ErrorKind::Storage,
                format!("Failed to create upload root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a storage key to its path within the root.
    ///
    /// Keys are opaque tokens; anything resembling a path is an internal
    /// invariant violation because only the key generator produces keys.
    fn resolve(&self, key: &str) -> VaultResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }

    /// Drain the stream into an open temp file, enforcing the byte cap.
    async fn drain_to_file(
        file: &mut fs::File,
        stream: &mut ByteStream,
        max_bytes: u64,
    ) -> VaultResult<u64> {
        let mut total_bytes = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                VaultError::with_source(ErrorKind::Storage, "Stream read error", e)
            })?;
            total_bytes += chunk.len() as u64;
            if total_bytes > max_bytes {
                return Err(VaultError::validation(format!(
                    "Upload exceeds maximum size of {max_bytes} bytes"
                )));
            }
            file.write_all(&chunk).await.map_err(|e| {
                VaultError::with_source(ErrorKind::Storage, "Failed to write chunk", e)
            })?;
        }

        file.flush()
            .await
            .map_err(|e| VaultError::with_source(ErrorKind::Storage, "Failed to flush blob", e))?;
        file.sync_all()
            .await
            .map_err(|e| VaultError::with_source(ErrorKind::Storage, "Failed to sync blob", e))?;
        Ok(total_bytes)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn save(&self, key: &str, mut stream: ByteStream, max_bytes: u64) -> VaultResult<u64> {
        let final_path = self.resolve(key)?;
        let tmp_path = self.root.join(format!(".tmp-{}", Uuid::new_v4()));

        let mut file = fs::File::create(&tmp_path).await.map_err(|e| {
            VaultError::with_source(
                ErrorKind::Storage,
                format!("Failed to create temp file for key: {key}"),
                e,
            )
        })?;

        let written = Self::drain_to_file(&mut file, &mut stream, max_bytes).await;
        drop(file);

        let total_bytes = match written {
            Ok(n) => n,
            Err(e) => {
                // No dangling temp artifact on a failed or aborted upload.
                if let Err(cleanup) = fs::remove_file(&tmp_path).await {
                    warn!(key, error = %cleanup, "Failed to remove temp file after aborted save");
                }
                return Err(e);
            }
        };

        if let Err(e) = fs::rename(&tmp_path, &final_path).await {
            if let Err(cleanup) = fs::remove_file(&tmp_path).await {
                warn!(key, error = %cleanup, "Failed to remove temp file after failed publish");
            }
            return Err(VaultError::with_source(
                ErrorKind::Storage,
                format!("Failed to publish blob for key: {key}"),
                e,
            ));
        }

        debug!(key, bytes = total_bytes, "Saved blob");
        Ok(total_bytes)
    }

    async fn open(&self, key: &str) -> VaultResult<ByteStream> {
        let path = self.resolve(key)?;
        let file = fs::File::open(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VaultError::not_found(format!("Blob not found: {key}"))
            } else {
                VaultError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to open blob: {key}"),
                    e,
                )
            }
        })?;

        let stream = ReaderStream::new(file);
        Ok(Box::pin(stream))
    }

    async fn delete(&self, key: &str) -> VaultResult<bool> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "Deleted blob");
                Ok(true)
            }
            // Idempotent: racing deletes and absent keys are not faults.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(VaultError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete blob: {key}"),
                e,
            )),
        }
    }

    async fn exists(&self, key: &str) -> VaultResult<bool> {
        let path = self.resolve(key)?;
        fs::try_exists(&path).await.map_err(|e| {
            VaultError::with_source(
                ErrorKind::Storage,
                format!("Failed to check blob existence: {key}"),
                e,
            )
        })
    }
}
