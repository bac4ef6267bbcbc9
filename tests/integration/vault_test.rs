//! End-to-end tests for the vault storage core.

use crate::helpers::{self, TestVault};

use vault_core::error::ErrorKind;
use vault_core::traits::blob::BlobStore;

#[tokio::test]
async fn upload_download_roundtrip_preserves_bytes_and_name() {
    let vault = TestVault::new().await;
    let p = helpers::admin();

    let record = vault.upload(&p, "report.pdf", b"quarterly figures").await;
    assert_eq!(record.original_filename, "report.pdf");
    assert_eq!(record.size_bytes, 17);

    let download = vault
        .service
        .download(&p, &record.storage_key)
        .await
        .unwrap();
    assert_eq!(download.original_filename, "report.pdf");
    assert_eq!(helpers::collect(download.stream).await, b"quarterly figures");
}

#[tokio::test]
async fn delete_removes_record_and_blob() {
    let vault = TestVault::new().await;
    let p = helpers::admin();

    let record = vault.upload(&p, "doomed.txt", b"short lived").await;
    vault.service.delete(&p, &record.storage_key).await.unwrap();

    let listing = vault.service.list(&p).await.unwrap();
    assert!(listing.records.is_empty());

    let err = vault
        .service
        .download(&p, &record.storage_key)
        .await
        .unwrap_err();
    assert!(err.is_kind(ErrorKind::NotFound));

    // Both halves are gone on disk too.
    assert_eq!(std::fs::read_dir(&vault.uploads_dir).unwrap().count(), 0);
    assert_eq!(std::fs::read_dir(&vault.metadata_dir).unwrap().count(), 0);
}

#[tokio::test]
async fn listing_skips_corrupt_metadata_and_keeps_the_rest() {
    let vault = TestVault::new().await;
    let p = helpers::admin();

    vault.upload(&p, "one.txt", b"1").await;
    vault.upload(&p, "two.txt", b"22").await;
    vault.upload(&p, "three.txt", b"333").await;

    std::fs::write(vault.metadata_dir.join("damaged.json"), b"{truncated").unwrap();

    let listing = vault.service.list(&p).await.unwrap();
    assert_eq!(listing.records.len(), 3);
    assert_eq!(listing.corrupt_records, 1);
    assert_eq!(listing.missing_blobs, 0);
}

#[tokio::test]
async fn listing_excludes_records_with_missing_blobs() {
    let vault = TestVault::new().await;
    let p = helpers::admin();

    let kept = vault.upload(&p, "kept.txt", b"kept").await;
    let orphaned = vault.upload(&p, "orphaned.txt", b"orphaned").await;

    vault.blob.delete(&orphaned.storage_key).await.unwrap();

    let listing = vault.service.list(&p).await.unwrap();
    let keys: Vec<_> = listing
        .records
        .iter()
        .map(|r| r.storage_key.as_str())
        .collect();
    assert_eq!(keys, vec![kept.storage_key.as_str()]);
    assert_eq!(listing.missing_blobs, 1);
}

#[tokio::test]
async fn listing_is_newest_first() {
    let vault = TestVault::new().await;
    let p = helpers::admin();

    let first = vault.upload(&p, "first.txt", b"a").await;
    let second = vault.upload(&p, "second.txt", b"b").await;
    let third = vault.upload(&p, "third.txt", b"c").await;

    let listing = vault.service.list(&p).await.unwrap();
    let keys: Vec<_> = listing
        .records
        .iter()
        .map(|r| r.storage_key.as_str())
        .collect();
    assert_eq!(
        keys,
        vec![
            third.storage_key.as_str(),
            second.storage_key.as_str(),
            first.storage_key.as_str()
        ]
    );
}

#[tokio::test]
async fn concurrent_same_name_uploads_get_distinct_keys() {
    let vault = TestVault::new().await;
    let p = helpers::admin();

    let (a, b) = tokio::join!(
        vault
            .service
            .upload(&p, "same.txt", helpers::body(b"first copy"), 10),
        vault
            .service
            .upload(&p, "same.txt", helpers::body(b"second copy"), 11),
    );
    let a = a.unwrap();
    let b = b.unwrap();

    assert_ne!(a.storage_key, b.storage_key);

    let da = vault.service.download(&p, &a.storage_key).await.unwrap();
    let db = vault.service.download(&p, &b.storage_key).await.unwrap();
    assert_eq!(helpers::collect(da.stream).await, b"first copy");
    assert_eq!(helpers::collect(db.stream).await, b"second copy");
}

#[tokio::test]
async fn preview_rejects_docx_and_serves_images_and_pdf() {
    let vault = TestVault::new().await;
    let p = helpers::admin();

    let doc = vault.upload(&p, "minutes.docx", b"word document").await;
    let err = vault.service.preview(&p, &doc.storage_key).await.unwrap_err();
    assert!(err.is_kind(ErrorKind::UnsupportedPreview));

    let png = vault.upload(&p, "diagram.png", b"png bytes").await;
    let preview = vault.service.preview(&p, &png.storage_key).await.unwrap();
    assert_eq!(preview.content_type, "image/png");

    let pdf = vault.upload(&p, "manual.pdf", b"pdf bytes").await;
    let preview = vault.service.preview(&p, &pdf.storage_key).await.unwrap();
    assert_eq!(preview.content_type, "application/pdf");
    assert_eq!(helpers::collect(preview.stream).await, b"pdf bytes");
}

#[tokio::test]
async fn filenames_with_interior_dot_runs_upload_cleanly() {
    let vault = TestVault::new().await;
    let p = helpers::admin();

    let record = vault.upload(&p, "my..file.txt", b"dotted").await;
    assert_eq!(record.original_filename, "my.file.txt");
    assert!(!record.storage_key.contains(".."));

    let download = vault
        .service
        .download(&p, &record.storage_key)
        .await
        .unwrap();
    assert_eq!(helpers::collect(download.stream).await, b"dotted");
}

#[tokio::test]
async fn traversal_filenames_are_confined_to_the_storage_root() {
    let vault = TestVault::new().await;
    let p = helpers::admin();

    let record = vault.upload(&p, "../etc/passwd.txt", b"not a shadow file").await;

    assert!(!record.storage_key.contains(".."));
    assert!(!record.storage_key.contains('/'));
    assert!(record.storage_key.ends_with("_passwd.txt"));

    // Exactly one blob, inside the configured root.
    let entries: Vec<_> = std::fs::read_dir(&vault.uploads_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec![record.storage_key.clone()]);
}

#[tokio::test]
async fn oversized_stream_is_rejected_even_with_a_small_declared_size() {
    let vault = TestVault::new().await;
    let p = helpers::admin();

    // Configured cap is 16 MiB; stream 17 MiB while declaring 1 KiB.
    let chunk: &'static [u8] = Box::leak(vec![0u8; 1024 * 1024].into_boxed_slice());
    let stream: vault_core::traits::blob::ByteStream = Box::pin(futures::stream::iter(
        std::iter::repeat_n(chunk, 17).map(|c| Ok(bytes::Bytes::from_static(c))),
    ));

    let err = vault
        .service
        .upload(&p, "liar.txt", stream, 1024)
        .await
        .unwrap_err();
    assert!(err.is_kind(ErrorKind::Validation));

    // Nothing published, no temp artifact left behind.
    assert_eq!(std::fs::read_dir(&vault.uploads_dir).unwrap().count(), 0);
    assert_eq!(std::fs::read_dir(&vault.metadata_dir).unwrap().count(), 0);
}

#[tokio::test]
async fn download_racing_delete_resolves_cleanly() {
    let vault = TestVault::new().await;
    let p = helpers::admin();

    let record = vault.upload(&p, "contested.txt", b"race me").await;

    let (deleted, downloaded) = tokio::join!(
        vault.service.delete(&p, &record.storage_key),
        vault.service.download(&p, &record.storage_key),
    );

    deleted.unwrap();
    // The reader either won the race and sees the full content, or lost and
    // gets a clean not-found; anything else is a bug.
    match downloaded {
        Ok(download) => {
            assert_eq!(helpers::collect(download.stream).await, b"race me");
        }
        Err(err) => assert!(err.is_kind(ErrorKind::NotFound)),
    }
}
