//! # vault-service
//!
//! The vault service: the single entry point the transport layer calls.
//! Orchestrates the access controller, key generator, blob store, and
//! metadata store to implement upload, list, download, preview, and delete.

pub mod preview;
pub mod service;

pub use service::{Download, Preview, VaultListing, VaultService};
