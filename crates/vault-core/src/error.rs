//! Unified error types for SecureVault.
//!
//! All crates map their internal errors into [`VaultError`] for consistent
//! propagation through the ? operator. Callers receive an [`ErrorKind`] plus
//! a message; raw underlying errors stay in `source` for operator logs.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The requested file was not found.
    NotFound,
    /// The caller does not have permission to perform the operation.
    Authorization,
    /// Input validation failed (bad extension, empty filename, size over limit).
    Validation,
    /// The file type is not in the previewable subset.
    UnsupportedPreview,
    /// A storage I/O fault occurred in one of the stores.
    Storage,
    /// Blob and metadata existence disagree for a key after a cross-store
    /// mutation; the [`PartialState`] payload records which half survived.
    PartialFailure,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// A configuration error occurred.
    Configuration,
    /// An internal invariant was violated.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::UnsupportedPreview => write!(f, "UNSUPPORTED_PREVIEW"),
            Self::Storage => write!(f, "STORAGE"),
            Self::PartialFailure => write!(f, "PARTIAL_FAILURE"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Which halves of a key's blob/record pair are absent after a failed
/// cross-store mutation.
///
/// Carried by [`ErrorKind::PartialFailure`] errors so a reconciliation pass
/// knows exactly what is left behind for a key. The flags describe resulting
/// state, not actions taken: a half that was never written in the first
/// place (an upload whose record write failed) also reports as removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialState {
    /// Whether the blob half is now absent from the blob store.
    pub blob_removed: bool,
    /// Whether the record half is now absent from the metadata store.
    pub record_removed: bool,
}

/// The unified application error used throughout SecureVault.
///
/// All crate-specific errors are mapped into `VaultError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct VaultError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// For `PartialFailure`, which halves of the mutation took effect.
    pub partial: Option<PartialState>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl VaultError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            partial: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            partial: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an unsupported-preview error.
    pub fn unsupported_preview(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedPreview, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a partial-failure error recording which halves took effect.
    pub fn partial_failure(message: impl Into<String>, state: PartialState) -> Self {
        Self {
            kind: ErrorKind::PartialFailure,
            message: message.into(),
            partial: Some(state),
            source: None,
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether this error is of the given kind.
    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl Clone for VaultError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            partial: self.partial,
            source: None,
        }
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for VaultError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
