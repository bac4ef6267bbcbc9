//! The vault service: authorize → validate → store orchestration.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use vault_auth::AccessController;
use vault_core::config::storage::StorageConfig;
use vault_core::error::{ErrorKind, PartialState, VaultError};
use vault_core::result::VaultResult;
use vault_core::traits::blob::{BlobStore, ByteStream};
use vault_core::traits::metadata::MetadataStore;
use vault_core::types::key::{extension_of, sanitize_filename};
use vault_core::types::{FileRecord, Principal, VaultOperation};
use vault_storage::KeyGenerator;

use crate::preview;

/// The result of a listing: user-visible records plus diagnostics.
///
/// Corrupt sidecars and records whose blob has gone missing are never
/// surfaced as user-facing entries; their counts are reported so the fault
/// is observable instead of swallowed.
#[derive(Debug, Clone, Default)]
pub struct VaultListing {
    /// Records with an intact blob, newest first.
    pub records: Vec<FileRecord>,
    /// Metadata entries that failed to parse and were skipped.
    pub corrupt_records: usize,
    /// Records excluded because their blob no longer exists.
    pub missing_blobs: usize,
}

/// An opened file ready to be offered as an attachment.
pub struct Download {
    /// The blob content.
    pub stream: ByteStream,
    /// The sanitized display name to offer the file as.
    pub original_filename: String,
}

impl std::fmt::Debug for Download {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Download")
            .field("original_filename", &self.original_filename)
            .finish_non_exhaustive()
    }
}

/// An opened file ready for inline rendering.
pub struct Preview {
    /// The blob content.
    pub stream: ByteStream,
    /// Content-type hint for inline rendering.
    pub content_type: &'static str,
}

impl std::fmt::Debug for Preview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preview")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Orchestrates upload, list, download, preview, and delete.
///
/// The only component transport code calls. Holds no per-request state and
/// no locks; the stores are the only shared mutable state.
#[derive(Clone)]
pub struct VaultService {
    /// Blob store.
    blob: Arc<dyn BlobStore>,
    /// Metadata store.
    metadata: Arc<dyn MetadataStore>,
    /// Storage-key generator.
    keys: KeyGenerator,
    /// Access policy gate.
    access: AccessController,
    /// Storage configuration.
    config: StorageConfig,
}

impl std::fmt::Debug for VaultService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultService").finish()
    }
}

impl VaultService {
    /// Creates a vault service over the given stores.
    pub fn new(
        blob: Arc<dyn BlobStore>,
        metadata: Arc<dyn MetadataStore>,
        access: AccessController,
        config: StorageConfig,
    ) -> Self {
        let keys = KeyGenerator::new(config.key_retry_limit);
        Self {
            blob,
            metadata,
            keys,
            access,
            config,
        }
    }

    /// Store a new file.
    ///
    /// Validation and authorization failures are terminal with no side
    /// effects. A blob that was written but whose record could not be
    /// persisted is rolled back; a failed rollback is reported as a partial
    /// failure, never left silent.
    pub async fn upload(
        &self,
        principal: &Principal,
        filename: &str,
        stream: ByteStream,
        declared_size: u64,
    ) -> VaultResult<FileRecord> {
        self.access.authorize(principal, VaultOperation::Upload)?;

        let display_name = sanitize_filename(filename);
        if display_name.is_empty() {
            return Err(VaultError::validation("Filename is empty"));
        }
        let ext = extension_of(&display_name)
            .ok_or_else(|| VaultError::validation("Filename has no extension"))?;
        if !self.config.is_allowed_extension(&ext) {
            return Err(VaultError::validation(format!(
                "File type '.{ext}' is not allowed"
            )));
        }
        if declared_size > self.config.max_upload_size_bytes {
            return Err(VaultError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.config.max_upload_size_bytes
            )));
        }

        let key = self
            .keys
            .generate(self.blob.as_ref(), &principal.email, &display_name)
            .await?;

        // The save enforces the byte cap on the actual stream; the declared
        // size above is only an early reject.
        let size_bytes = self
            .blob
            .save(&key, stream, self.config.max_upload_size_bytes)
            .await?;

        let record = FileRecord {
            storage_key: key.clone(),
            original_filename: display_name,
            owner_email: principal.email.clone(),
            uploaded_at: Utc::now(),
            size_bytes,
        };

        if let Err(put_err) = self.metadata.put(&record).await {
            error!(key, error = %put_err, "Record write failed after blob save; rolling back");
            return match self.blob.delete(&key).await {
                Ok(_) => Err(VaultError::with_source(
                    ErrorKind::Storage,
                    "Failed to persist file record; uploaded blob was rolled back",
                    put_err,
                )),
                Err(rollback_err) => {
                    error!(key, error = %rollback_err, "Rollback failed; orphaned blob remains");
                    Err(VaultError::partial_failure(
                        format!("Record write and blob rollback both failed for key '{key}'"),
                        PartialState {
                            blob_removed: false,
                            record_removed: true,
                        },
                    ))
                }
            };
        }

        info!(
            owner = %record.owner_email,
            key = %record.storage_key,
            name = %record.original_filename,
            size = record.size_bytes,
            "Upload completed"
        );
        Ok(record)
    }

    /// Enumerate stored files.
    pub async fn list(&self, principal: &Principal) -> VaultResult<VaultListing> {
        self.access.authorize(principal, VaultOperation::List)?;

        let listing = self.metadata.list_all().await?;
        if listing.corrupt_records > 0 {
            warn!(
                count = listing.corrupt_records,
                "Corrupt metadata entries skipped during listing"
            );
        }

        let mut result = VaultListing {
            corrupt_records: listing.corrupt_records,
            ..VaultListing::default()
        };

        for record in listing.records {
            if self.blob.exists(&record.storage_key).await? {
                result.records.push(record);
            } else {
                warn!(key = %record.storage_key, "Record has no blob; omitted from listing");
                result.missing_blobs += 1;
            }
        }

        Ok(result)
    }

    /// Open a file for download as an attachment.
    pub async fn download(&self, principal: &Principal, key: &str) -> VaultResult<Download> {
        self.access.authorize(principal, VaultOperation::Download)?;

        let record = self.lookup(key).await?;
        let stream = self.open_blob(&record).await?;
        Ok(Download {
            stream,
            original_filename: record.original_filename,
        })
    }

    /// Open a file for inline preview.
    pub async fn preview(&self, principal: &Principal, key: &str) -> VaultResult<Preview> {
        self.access.authorize(principal, VaultOperation::Preview)?;

        let record = self.lookup(key).await?;
        let ext = record.extension().unwrap_or_default();
        let content_type = preview::preview_content_type(&ext).ok_or_else(|| {
            VaultError::unsupported_preview(format!("File type '.{ext}' cannot be previewed"))
        })?;

        let stream = self.open_blob(&record).await?;
        Ok(Preview {
            stream,
            content_type,
        })
    }

    /// Remove a file: blob first, then its record.
    ///
    /// If either half fails the caller gets a partial failure naming exactly
    /// what was removed, so a reconciliation pass knows what is left.
    pub async fn delete(&self, principal: &Principal, key: &str) -> VaultResult<()> {
        self.access.authorize(principal, VaultOperation::Delete)?;

        self.lookup(key).await?;

        if let Err(blob_err) = self.blob.delete(key).await {
            error!(key, error = %blob_err, "Blob removal failed; record retained");
            return Err(VaultError::partial_failure(
                format!("Blob removal failed for key '{key}'; record retained"),
                PartialState {
                    blob_removed: false,
                    record_removed: false,
                },
            ));
        }

        if let Err(meta_err) = self.metadata.delete(key).await {
            error!(key, error = %meta_err, "Record removal failed after blob delete");
            return Err(VaultError::partial_failure(
                format!("Blob removed but record removal failed for key '{key}'"),
                PartialState {
                    blob_removed: true,
                    record_removed: false,
                },
            ));
        }

        info!(owner = %principal.email, key, "Delete completed");
        Ok(())
    }

    /// Fetch the record for a key, mapping absence to `NotFound`.
    async fn lookup(&self, key: &str) -> VaultResult<FileRecord> {
        self.metadata
            .get(key)
            .await?
            .ok_or_else(|| VaultError::not_found(format!("File not found: {key}")))
    }

    /// Open a record's blob, degrading a missing blob to `NotFound`.
    ///
    /// Metadata without a blob is a detected inconsistency; it is logged as
    /// a fault but surfaced to the caller as a clean not-found, never a
    /// crash.
    async fn open_blob(&self, record: &FileRecord) -> VaultResult<ByteStream> {
        match self.blob.open(&record.storage_key).await {
            Ok(stream) => Ok(stream),
            Err(e) if e.is_kind(ErrorKind::NotFound) => {
                error!(
                    key = %record.storage_key,
                    "Record exists but blob is missing"
                );
                Err(VaultError::not_found(format!(
                    "File not found: {}",
                    record.storage_key
                )))
            }
            Err(e) => Err(e),
        }
    }
}
