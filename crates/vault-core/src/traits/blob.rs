//! Blob store trait: durable mapping from storage key to raw content bytes.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::VaultResult;

/// A byte stream type used for reading and writing file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Durable storage for raw uploaded content, addressed by opaque storage key.
///
/// The store knows nothing about file semantics. Keys are produced solely by
/// the key generator; implementations must treat them as opaque tokens
/// confined to the storage root and reject anything resembling a path.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Write the full stream to the location addressed by `key`.
    ///
    /// The blob must never be visible to readers in a partially written
    /// state: implementations write to a temporary location and atomically
    /// publish. Streams longer than `max_bytes` are rejected with a
    /// validation error, and any temporary artifact is removed on failure
    /// (including the caller aborting mid-stream).
    ///
    /// Returns the number of bytes written.
    async fn save(&self, key: &str, stream: ByteStream, max_bytes: u64) -> VaultResult<u64>;

    /// Open the blob for reading. `NotFound` if absent.
    async fn open(&self, key: &str) -> VaultResult<ByteStream>;

    /// Delete the blob. Idempotent: returns `true` if a blob was removed,
    /// `false` if the key was already absent. `Err` is reserved for storage
    /// faults.
    async fn delete(&self, key: &str) -> VaultResult<bool>;

    /// Whether a blob exists for the key.
    async fn exists(&self, key: &str) -> VaultResult<bool>;
}
