//! Metadata store trait: durable mapping from storage key to file record.

use async_trait::async_trait;

use crate::result::VaultResult;
use crate::types::FileRecord;

/// The result of enumerating all records.
#[derive(Debug, Clone, Default)]
pub struct RecordListing {
    /// Every well-formed record, newest first (ties broken by storage key
    /// ascending for determinism).
    pub records: Vec<FileRecord>,
    /// Number of entries that failed to parse and were skipped. A damaged
    /// entry never aborts the listing and is never silently hidden.
    pub corrupt_records: usize,
}

/// Durable storage for [`FileRecord`]s, addressed by storage key.
///
/// The store knows nothing about blob content. The backing index (directory
/// scan today) is an implementation detail behind this contract.
#[async_trait]
pub trait MetadataStore: Send + Sync + std::fmt::Debug + 'static {
    /// Write or overwrite the record keyed by its `storage_key`. Durable on
    /// return; readers never observe a half-written record.
    async fn put(&self, record: &FileRecord) -> VaultResult<()>;

    /// Fetch the record for a key, or `None` if absent.
    async fn get(&self, key: &str) -> VaultResult<Option<FileRecord>>;

    /// Delete the record. Idempotent: returns `true` if a record was
    /// removed, `false` if the key was already absent. `Err` is reserved
    /// for storage faults.
    async fn delete(&self, key: &str) -> VaultResult<bool>;

    /// Enumerate all records, skipping (and counting) damaged entries.
    async fn list_all(&self) -> VaultResult<RecordListing>;
}
