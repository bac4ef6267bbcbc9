//! Integration tests for role enforcement across vault operations.

use crate::helpers::{self, TestVault};

use vault_core::error::ErrorKind;

/// Snapshot of how many blobs and records exist on disk.
fn store_counts(vault: &TestVault) -> (usize, usize) {
    let blobs = std::fs::read_dir(&vault.uploads_dir).unwrap().count();
    let records = std::fs::read_dir(&vault.metadata_dir).unwrap().count();
    (blobs, records)
}

#[tokio::test]
async fn viewer_cannot_upload_or_delete_and_stores_are_untouched() {
    let vault = TestVault::new().await;
    let admin = helpers::admin();
    let viewer = helpers::viewer();

    let existing = vault.upload(&admin, "existing.txt", b"already here").await;
    let before = store_counts(&vault);

    let err = vault
        .service
        .upload(&viewer, "sneaky.txt", helpers::body(b"nope"), 4)
        .await
        .unwrap_err();
    assert!(err.is_kind(ErrorKind::Authorization));

    let err = vault
        .service
        .delete(&viewer, &existing.storage_key)
        .await
        .unwrap_err();
    assert!(err.is_kind(ErrorKind::Authorization));

    assert_eq!(store_counts(&vault), before);
}

#[tokio::test]
async fn viewer_can_list_download_and_preview() {
    let vault = TestVault::new().await;
    let admin = helpers::admin();
    let viewer = helpers::viewer();

    let record = vault.upload(&admin, "shared.png", b"image bytes").await;

    let listing = vault.service.list(&viewer).await.unwrap();
    assert_eq!(listing.records.len(), 1);

    let download = vault
        .service
        .download(&viewer, &record.storage_key)
        .await
        .unwrap();
    assert_eq!(helpers::collect(download.stream).await, b"image bytes");

    let preview = vault
        .service
        .preview(&viewer, &record.storage_key)
        .await
        .unwrap();
    assert_eq!(preview.content_type, "image/png");
}

#[tokio::test]
async fn principal_without_roles_is_denied_everything() {
    let vault = TestVault::new().await;
    let admin = helpers::admin();
    let nobody = helpers::nobody();

    let record = vault.upload(&admin, "private.pdf", b"pdf").await;

    let upload = vault
        .service
        .upload(&nobody, "a.txt", helpers::body(b"x"), 1)
        .await;
    let list = vault.service.list(&nobody).await;
    let download = vault.service.download(&nobody, &record.storage_key).await;
    let preview = vault.service.preview(&nobody, &record.storage_key).await;
    let delete = vault.service.delete(&nobody, &record.storage_key).await;

    assert!(upload.unwrap_err().is_kind(ErrorKind::Authorization));
    assert!(list.unwrap_err().is_kind(ErrorKind::Authorization));
    assert!(download.unwrap_err().is_kind(ErrorKind::Authorization));
    assert!(preview.unwrap_err().is_kind(ErrorKind::Authorization));
    assert!(delete.unwrap_err().is_kind(ErrorKind::Authorization));
}

#[tokio::test]
async fn denied_operations_happen_before_any_lookup() {
    let vault = TestVault::new().await;
    let nobody = helpers::nobody();

    // Authorization is checked before the key is even looked up, so an
    // unauthorized caller cannot probe which keys exist.
    let err = vault
        .service
        .download(&nobody, "no_such_key")
        .await
        .unwrap_err();
    assert!(err.is_kind(ErrorKind::Authorization));
}
