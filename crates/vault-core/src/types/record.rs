//! The persisted unit of truth for one uploaded document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata describing one uploaded file.
///
/// Created only by a successful upload (blob write and record write both
/// succeeded), destroyed only by delete, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique opaque token identifying both the blob and this record.
    /// Immutable once assigned.
    pub storage_key: String,
    /// User-supplied display name, sanitized.
    pub original_filename: String,
    /// Email of the principal that uploaded the file.
    pub owner_email: String,
    /// Upload timestamp; drives newest-first listing order.
    pub uploaded_at: DateTime<Utc>,
    /// Byte length of the stored blob at write time.
    pub size_bytes: u64,
}

impl FileRecord {
    /// Lowercased extension of the original filename, if it has one.
    pub fn extension(&self) -> Option<String> {
        super::key::extension_of(&self.original_filename)
    }
}
