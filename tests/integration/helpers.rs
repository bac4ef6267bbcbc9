//! Shared test helpers for integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;

use vault_auth::AccessController;
use vault_core::config::storage::StorageConfig;
use vault_core::traits::blob::ByteStream;
use vault_core::types::{FileRecord, Principal, Role};
use vault_metadata::JsonMetadataStore;
use vault_service::VaultService;
use vault_storage::LocalBlobStore;

/// A vault wired over real temp-dir stores.
pub struct TestVault {
    /// The service under test
    pub service: VaultService,
    /// Direct handle on the blob store for fault injection
    pub blob: Arc<LocalBlobStore>,
    /// Blob root on disk
    pub uploads_dir: PathBuf,
    /// Metadata root on disk
    pub metadata_dir: PathBuf,
    _root: tempfile::TempDir,
}

impl TestVault {
    /// Create a fresh vault with default configuration in a temp directory.
    pub async fn new() -> Self {
        let root = tempfile::tempdir().expect("Failed to create temp dir");
        let uploads_dir = root.path().join("uploads");
        let metadata_dir = root.path().join("metadata");

        let config = StorageConfig {
            upload_root: uploads_dir.to_string_lossy().into_owned(),
            metadata_root: metadata_dir.to_string_lossy().into_owned(),
            ..StorageConfig::default()
        };

        let blob = Arc::new(
            LocalBlobStore::new(&config.upload_root)
                .await
                .expect("Failed to init blob store"),
        );
        let metadata = Arc::new(
            JsonMetadataStore::new(&config.metadata_root)
                .await
                .expect("Failed to init metadata store"),
        );
        let service = VaultService::new(
            blob.clone(),
            metadata,
            AccessController::new(),
            config,
        );

        Self {
            service,
            blob,
            uploads_dir,
            metadata_dir,
            _root: root,
        }
    }

    /// Upload fixture content as the given principal, panicking on failure.
    pub async fn upload(
        &self,
        principal: &Principal,
        filename: &str,
        data: &'static [u8],
    ) -> FileRecord {
        self.service
            .upload(principal, filename, body(data), data.len() as u64)
            .await
            .expect("upload failed")
    }
}

/// An Admin principal.
pub fn admin() -> Principal {
    Principal::new("lead@example.com", [Role::Admin])
}

/// A Viewer principal.
pub fn viewer() -> Principal {
    Principal::new("tester@example.com", [Role::Viewer])
}

/// A principal with no recognized role.
pub fn nobody() -> Principal {
    Principal::new("ghost@example.com", [])
}

/// Wrap static bytes as an upload stream.
pub fn body(data: &'static [u8]) -> ByteStream {
    Box::pin(futures::stream::once(async move {
        Ok(Bytes::from_static(data))
    }))
}

/// Drain a byte stream into memory.
pub async fn collect(mut stream: ByteStream) -> Vec<u8> {
    let mut out = Vec::new();
    while let Some(chunk) = stream.next().await {
        out.extend_from_slice(&chunk.expect("stream error"));
    }
    out
}
