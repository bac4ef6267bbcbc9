//! The operations a caller can request against the vault.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five vault operations, used by the access policy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VaultOperation {
    /// Store a new file.
    Upload,
    /// Enumerate stored files.
    List,
    /// Retrieve a file's bytes as an attachment.
    Download,
    /// Retrieve a file's bytes for inline rendering.
    Preview,
    /// Remove a file.
    Delete,
}

impl fmt::Display for VaultOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upload => write!(f, "upload"),
            Self::List => write!(f, "list"),
            Self::Download => write!(f, "download"),
            Self::Preview => write!(f, "preview"),
            Self::Delete => write!(f, "delete"),
        }
    }
}
