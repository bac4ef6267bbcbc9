//! # vault-storage
//!
//! Blob storage for SecureVault: the local filesystem implementation of the
//! [`vault_core::traits::BlobStore`] contract, plus the storage-key
//! generator.

pub mod key;
pub mod local;

pub use key::KeyGenerator;
pub use local::LocalBlobStore;
