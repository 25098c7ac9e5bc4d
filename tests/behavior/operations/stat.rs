use crate::*;
use assert_cmd::prelude::*;
use filerfs::error::Result;
use filerfs::storage::StorageClient;
use filerfs::storage::metadata::{EntryKind, Visibility, WriteOptions};
use predicates::prelude::*;

pub fn tests(client: &StorageClient, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        client,
        test_root_has_timestamp,
        test_stat_file_aliases,
        test_stat_directory,
        test_stat_not_found,
        test_mimetype_prefers_custom_header,
        test_stat_cli_formats
    ));
}

async fn test_root_has_timestamp(client: StorageClient) -> Result<()> {
    let root = client.get_timestamp("").await?;
    assert_eq!(root.kind, EntryKind::Directory);
    assert!(root.timestamp > 0);
    Ok(())
}

async fn test_stat_file_aliases(client: StorageClient) -> Result<()> {
    let path = TEST_FIXTURE.new_file_path();
    client
        .write(&path, b"contents".to_vec(), &WriteOptions::default())
        .await?;

    let meta = client.get_metadata(&path).await?;
    assert_eq!(meta.path, path);
    assert_eq!(meta.kind, EntryKind::File);
    assert_eq!(meta.size, Some(8));
    assert_eq!(meta.visibility, Some(Visibility::Public));
    assert_eq!(meta.mime_type, None);

    assert_eq!(client.get_size(&path).await?.size, Some(8));
    assert_eq!(
        client.get_visibility(&path).await?.visibility,
        Some(Visibility::Public)
    );
    assert!(client.get_timestamp(&path).await?.timestamp > 0);
    Ok(())
}

async fn test_stat_directory(client: StorageClient) -> Result<()> {
    let dir = TEST_FIXTURE.new_dir_path();
    client.create_dir(&dir, &WriteOptions::default()).await?;

    let meta = client.get_metadata(dir.trim_end_matches('/')).await?;
    assert_eq!(meta.kind, EntryKind::Directory);
    assert_eq!(meta.size, None);
    assert_eq!(meta.visibility, None);
    assert_eq!(meta.mime_type, None);
    Ok(())
}

async fn test_stat_not_found(client: StorageClient) -> Result<()> {
    let path = TEST_FIXTURE.new_file_path();
    let err = client.get_metadata(&path).await.unwrap_err();
    assert!(err.is_not_found(), "unexpected error: {err}");

    filerfs_cmd().arg("stat").arg(&path).assert().failure();
    Ok(())
}

async fn test_mimetype_prefers_custom_header(client: StorageClient) -> Result<()> {
    let dir = TEST_FIXTURE.new_dir_path();
    let plain = format!("{dir}file.txt");
    let tagged = format!("{dir}tagged.txt");

    client
        .write(&plain, b"contents".to_vec(), &WriteOptions::default())
        .await?;
    client
        .write(
            &tagged,
            b"contents".to_vec(),
            &WriteOptions::new().with_mime_type("mime/type"),
        )
        .await?;

    let meta = client.get_mimetype(&plain).await?;
    assert!(
        meta.mime_type.is_some_and(|m| !m.is_empty()),
        "the filer content type is used when no custom mime type was stored"
    );

    let meta = client.get_mimetype(&tagged).await?;
    assert_eq!(meta.mime_type.as_deref(), Some("mime/type"));

    filerfs_cmd()
        .arg("mime")
        .arg(&tagged)
        .assert()
        .success()
        .stdout(predicate::str::contains("mime/type"));
    Ok(())
}

async fn test_stat_cli_formats(client: StorageClient) -> Result<()> {
    let path = TEST_FIXTURE.new_file_path();
    client
        .write(&path, b"contents".to_vec(), &WriteOptions::default())
        .await?;

    filerfs_cmd()
        .arg("stat")
        .arg(&path)
        .arg("--raw")
        .assert()
        .success()
        .stdout(predicate::str::contains("type=file"))
        .stdout(predicate::str::contains("size=8"));

    filerfs_cmd()
        .arg("stat")
        .arg(&path)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stdout(predicate::str::contains("\"type\":\"file\""));

    filerfs_cmd()
        .arg("stat")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("visibility: public"));
    Ok(())
}
