//! JSON sidecar metadata store.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use vault_core::error::{ErrorKind, VaultError};
use vault_core::result::VaultResult;
use vault_core::traits::metadata::{MetadataStore, RecordListing};
use vault_core::types::FileRecord;
use vault_core::types::key::validate_key;

/// Sidecar file extension for record documents.
const RECORD_EXT: &str = "json";

/// Metadata store backed by one JSON document per storage key.
///
/// The directory scan *is* the index, which is fine at this scale; anything
/// bigger swaps in another [`MetadataStore`] implementation without touching
/// the service layer.
#[derive(Debug, Clone)]
pub struct JsonMetadataStore {
    /// Root directory for all record documents.
    root: PathBuf,
}

impl JsonMetadataStore {
    /// Create a metadata store rooted at the given path, creating it if
    /// needed.
    pub async fn new(root_path: &str) -> VaultResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            VaultError::with_source(
                ErrorKind::Storage,
                format!("Failed to create metadata root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a storage key to its sidecar path within the root.
    fn resolve(&self, key: &str) -> VaultResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.{RECORD_EXT}")))
    }
}

#[async_trait]
impl MetadataStore for JsonMetadataStore {
    async fn put(&self, record: &FileRecord) -> VaultResult<()> {
        let final_path = self.resolve(&record.storage_key)?;
        let tmp_path = self.root.join(format!(".tmp-{}", Uuid::new_v4()));

        let body = serde_json::to_vec_pretty(record)?;

        fs::write(&tmp_path, &body).await.map_err(|e| {
            VaultError::with_source(
                ErrorKind::Storage,
                format!("Failed to write record for key: {}", record.storage_key),
                e,
            )
        })?;

        // Publish atomically so readers never parse a half-written record.
        if let Err(e) = fs::rename(&tmp_path, &final_path).await {
            if let Err(cleanup) = fs::remove_file(&tmp_path).await {
                warn!(
                    key = %record.storage_key,
                    error = %cleanup,
                    "Failed to remove temp record after failed publish"
                );
            }
            return Err(VaultError::with_source(
                ErrorKind::Storage,
                format!("Failed to publish record for key: {}", record.storage_key),
                e,
            ));
        }

        debug!(key = %record.storage_key, "Wrote file record");
        Ok(())
    }

    async fn get(&self, key: &str) -> VaultResult<Option<FileRecord>> {
        let path = self.resolve(key)?;
        let body = match fs::read(&path).await {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(VaultError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read record: {key}"),
                    e,
                ));
            }
        };

        let record = serde_json::from_slice(&body)?;
        Ok(Some(record))
    }

    async fn delete(&self, key: &str) -> VaultResult<bool> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "Deleted file record");
                Ok(true)
            }
            // Idempotent: racing deletes and absent keys are not faults.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(VaultError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete record: {key}"),
                e,
            )),
        }
    }

    async fn list_all(&self) -> VaultResult<RecordListing> {
        let mut listing = RecordListing::default();

        let mut dir = fs::read_dir(&self.root).await.map_err(|e| {
            VaultError::with_source(
                ErrorKind::Storage,
                format!("Failed to list metadata root: {}", self.root.display()),
                e,
            )
        })?;

        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            VaultError::with_source(ErrorKind::Storage, "Failed to read metadata entry", e)
        })? {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') || !name.ends_with(&format!(".{RECORD_EXT}")) {
                continue;
            }

            // A damaged entry is skipped and counted, never fatal.
            match fs::read(&path).await {
                Ok(body) => match serde_json::from_slice::<FileRecord>(&body) {
                    Ok(record) => listing.records.push(record),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Skipping corrupt record");
                        listing.corrupt_records += 1;
                    }
                },
                // The sidecar can vanish under a racing delete.
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable record");
                    listing.corrupt_records += 1;
                }
            }
        }

        listing.records.sort_by(|a, b| {
            b.uploaded_at
                .cmp(&a.uploaded_at)
                .then_with(|| a.storage_key.cmp(&b.storage_key))
        });

        Ok(listing)
    }
}
