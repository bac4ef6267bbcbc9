//! Store traits implemented by the leaf crates.
//!
//! The traits are defined here in `vault-core` and implemented in
//! `vault-storage` (blobs) and `vault-metadata` (records), so the service
//! layer depends only on the contracts.

pub mod blob;
pub mod metadata;

pub use blob::{BlobStore, ByteStream};
pub use metadata::{MetadataStore, RecordListing};
