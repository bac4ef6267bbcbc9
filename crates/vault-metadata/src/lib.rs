//! # vault-metadata
//!
//! The JSON sidecar implementation of the
//! [`vault_core::traits::MetadataStore`] contract: one structured record
//! document per storage key under a metadata root directory.

pub mod store;

pub use store::JsonMetadataStore;
