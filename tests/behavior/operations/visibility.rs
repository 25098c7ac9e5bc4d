use crate::*;
use assert_cmd::prelude::*;
use filerfs::error::Result;
use filerfs::storage::StorageClient;
use filerfs::storage::metadata::{Visibility, WriteOptions};
use predicates::prelude::*;

pub fn tests(client: &StorageClient, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        client,
        test_set_visibility,
        test_set_visibility_missing_file_fails,
        test_chmod_cli
    ));
}

async fn test_set_visibility(client: StorageClient) -> Result<()> {
    let path = TEST_FIXTURE.new_file_path();
    client
        .write(&path, b"contents".to_vec(), &WriteOptions::default())
        .await?;
    assert_eq!(
        client.get_visibility(&path).await?.visibility,
        Some(Visibility::Public)
    );

    let record = client.set_visibility(&path, Visibility::Private).await?;
    assert_eq!(record.visibility, Some(Visibility::Private));
    assert_eq!(
        client.get_visibility(&path).await?.visibility,
        Some(Visibility::Private)
    );
    Ok(())
}

async fn test_set_visibility_missing_file_fails(client: StorageClient) -> Result<()> {
    let path = TEST_FIXTURE.new_file_path();
    assert!(
        client
            .set_visibility(&path, Visibility::Public)
            .await
            .is_err()
    );
    Ok(())
}

async fn test_chmod_cli(client: StorageClient) -> Result<()> {
    let path = TEST_FIXTURE.new_file_path();
    client
        .write(&path, b"contents".to_vec(), &WriteOptions::default())
        .await?;

    filerfs_cmd()
        .arg("chmod")
        .arg("private")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("visibility=private"));
    Ok(())
}
