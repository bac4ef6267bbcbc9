//! Storage configuration.

use serde::{Deserialize, Serialize};

/// File and metadata storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for uploaded blobs.
    #[serde(default = "default_upload_root")]
    pub upload_root: String,
    /// Root directory for metadata sidecar records.
    #[serde(default = "default_metadata_root")]
    pub metadata_root: String,
    /// Maximum upload size in bytes (default 16 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Extensions accepted for upload (lowercase, no dot).
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    /// Maximum attempts when disambiguating a colliding storage key.
    #[serde(default = "default_key_retry_limit")]
    pub key_retry_limit: u32,
}

impl StorageConfig {
    /// Whether the given extension (case-insensitive) is accepted for upload.
    pub fn is_allowed_extension(&self, ext: &str) -> bool {
        let ext = ext.to_ascii_lowercase();
        self.allowed_extensions.iter().any(|e| *e == ext)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_root: default_upload_root(),
            metadata_root: default_metadata_root(),
            max_upload_size_bytes: default_max_upload(),
            allowed_extensions: default_allowed_extensions(),
            key_retry_limit: default_key_retry_limit(),
        }
    }
}

fn default_upload_root() -> String {
    "./data/uploads".to_string()
}

fn default_metadata_root() -> String {
    "./data/metadata".to_string()
}

fn default_max_upload() -> u64 {
    16 * 1024 * 1024 // 16 MiB
}

fn default_allowed_extensions() -> Vec<String> {
    ["txt", "pdf", "doc", "docx", "png", "jpg", "jpeg"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_key_retry_limit() -> u32 {
    8
}
