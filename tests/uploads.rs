use std::fs;
use std::path::Path;

use anyhow::Result;
use casefile::{CaseloadService, MemorySink, UploadStore};

#[path = "util.rs"]
mod util;

#[tokio::test]
async fn upload_copies_bytes_and_persists_record() -> Result<()> {
    let pool = util::memory_pool().await?;
    let scratch = tempfile::tempdir()?;
    let sink = MemorySink::new();
    let uploads = UploadStore::new(scratch.path().join("uploads"));
    let service = CaseloadService::new(pool, uploads, sink.clone());

    service.save_or_update_client(&util::sample_client()).await;

    let source = scratch.path().join("referral.pdf");
    fs::write(&source, b"%PDF-1.4 minimal")?;

    let record = service
        .upload_file(&source, "123456")
        .await
        .expect("upload persists");
    assert!(record.id > 0, "store-assigned id is read back");
    assert_eq!(record.case_number, "123456");
    assert_eq!(record.file_name, "referral.pdf");
    assert_eq!(record.content_type.as_deref(), Some("application/pdf"));

    let copy = Path::new(&record.file_path);
    assert!(copy.is_absolute(), "record stores the resolved copy path");
    assert_eq!(fs::read(copy)?, b"%PDF-1.4 minimal");
    assert_ne!(copy, source.as_path(), "record points at the managed copy");

    let listed = service.load_files_for_client("123456").await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], record);
    assert!(sink.is_empty());
    Ok(())
}

#[tokio::test]
async fn upload_directory_is_created_on_demand() -> Result<()> {
    let scratch = tempfile::tempdir()?;
    let base = scratch.path().join("nested").join("uploads");
    let store = UploadStore::new(&base);
    assert!(!base.exists());

    let source = scratch.path().join("notes.txt");
    fs::write(&source, b"text")?;

    let stored = store.ingest(&source).expect("ingest succeeds");
    assert!(base.exists());
    assert_eq!(stored.file_name, "notes.txt");
    assert_eq!(stored.content_type.as_deref(), Some("text/plain"));
    Ok(())
}

#[tokio::test]
async fn reingesting_same_name_replaces_the_copy() -> Result<()> {
    let scratch = tempfile::tempdir()?;
    let store = UploadStore::new(scratch.path().join("uploads"));

    let source = scratch.path().join("report.txt");
    fs::write(&source, b"first")?;
    let first = store.ingest(&source)?;
    fs::write(&source, b"second version")?;
    let second = store.ingest(&source)?;

    assert_eq!(first.absolute_path, second.absolute_path);
    assert_eq!(fs::read(&second.absolute_path)?, b"second version");
    Ok(())
}

#[tokio::test]
async fn missing_source_is_recorded_not_thrown() -> Result<()> {
    let pool = util::memory_pool().await?;
    let scratch = tempfile::tempdir()?;
    let sink = MemorySink::new();
    let uploads = UploadStore::new(scratch.path().join("uploads"));
    let service = CaseloadService::new(pool, uploads, sink.clone());

    let result = service
        .upload_file(&scratch.path().join("missing.bin"), "123456")
        .await;
    assert!(result.is_none());
    assert_eq!(sink.contexts(), vec!["storing upload"]);

    assert!(service.load_files_for_client("123456").await.is_empty());
    Ok(())
}

#[tokio::test]
async fn file_delete_reports_outcome() -> Result<()> {
    let pool = util::memory_pool().await?;
    let scratch = tempfile::tempdir()?;
    let sink = MemorySink::new();
    let uploads = UploadStore::new(scratch.path().join("uploads"));
    let service = CaseloadService::new(pool, uploads, sink.clone());

    let source = scratch.path().join("photo.png");
    fs::write(&source, b"png-bytes")?;
    let record = service
        .upload_file(&source, "123456")
        .await
        .expect("upload persists");

    assert!(service.delete_file(record.id).await);
    assert!(!service.delete_file(record.id).await, "second delete misses");
    assert!(sink.is_empty());
    Ok(())
}
