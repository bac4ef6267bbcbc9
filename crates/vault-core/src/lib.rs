//! # vault-core
//!
//! Core crate for SecureVault. Contains the `BlobStore` and `MetadataStore`
//! traits, configuration schemas, domain types (principals, file records,
//! storage keys), and the unified error system.
//!
//! This crate has **no** internal dependencies on other SecureVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::VaultError;
pub use result::VaultResult;
