//! Convenience result type alias for SecureVault.

use crate::error::VaultError;

/// A specialized `Result` type for SecureVault operations.
///
/// This is defined as a convenience so that every crate does not need to
/// write `Result<T, VaultError>` explicitly.
pub type VaultResult<T> = Result<T, VaultError>;
