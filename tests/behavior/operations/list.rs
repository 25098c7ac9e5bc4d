use crate::*;
use assert_cmd::prelude::*;
use filerfs::error::Result;
use filerfs::storage::StorageClient;
use filerfs::storage::metadata::{EntryKind, WriteOptions};
use filerfs::storage::operations::list::ListOptions;
use predicates::prelude::*;
use std::collections::HashSet;

pub fn tests(client: &StorageClient, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        client,
        test_list_single_level,
        test_list_recursive_two_levels,
        test_list_recursive_files_only,
        test_list_missing_directory_is_empty,
        test_ls_cli_recursive
    ));
}

/// root/file.txt, root/dir/file.txt, root/dir/sub/file.txt, root/dir/sub/deep/file.txt
async fn build_tree(client: &StorageClient) -> Result<(String, Vec<String>)> {
    let root = TEST_FIXTURE.new_dir_path();
    let root = root.trim_end_matches('/').to_string();
    let files = vec![
        format!("{root}/file.txt"),
        format!("{root}/dir/file.txt"),
        format!("{root}/dir/sub/file.txt"),
        format!("{root}/dir/sub/deep/file.txt"),
    ];
    for file in &files {
        client
            .write(file, b"contents".to_vec(), &WriteOptions::default())
            .await?;
    }
    Ok((root, files))
}

async fn test_list_single_level(client: StorageClient) -> Result<()> {
    let (root, _) = build_tree(&client).await?;

    let entries = client
        .try_list_contents(&root, &ListOptions::default())
        .await?;

    let paths: HashSet<_> = entries.iter().map(|e| e.path.clone()).collect();
    assert_eq!(
        paths,
        HashSet::from([format!("{root}/file.txt"), format!("{root}/dir")])
    );
    for entry in &entries {
        assert!(!entry.path.starts_with('/'));
        if entry.path.ends_with("file.txt") {
            assert_eq!(entry.kind, EntryKind::File);
            assert_eq!(entry.size, 8);
        } else {
            assert_eq!(entry.kind, EntryKind::Directory);
        }
    }
    Ok(())
}

async fn test_list_recursive_two_levels(client: StorageClient) -> Result<()> {
    let (root, files) = build_tree(&client).await?;

    let entries = client
        .list_contents(&root, &ListOptions::default().recursive(true))
        .await;

    let paths: Vec<_> = entries.iter().map(|e| e.path.clone()).collect();
    let unique: HashSet<_> = paths.iter().cloned().collect();
    assert_eq!(paths.len(), unique.len(), "duplicate entries: {paths:?}");

    let expected_dirs = [
        format!("{root}/dir"),
        format!("{root}/dir/sub"),
        format!("{root}/dir/sub/deep"),
    ];
    let expected: HashSet<_> = files.iter().cloned().chain(expected_dirs).collect();
    assert_eq!(unique, expected);
    Ok(())
}

async fn test_list_recursive_files_only(client: StorageClient) -> Result<()> {
    let (root, files) = build_tree(&client).await?;

    let entries = client
        .list_contents(&root, &ListOptions::default().recursive(true).files_only())
        .await;

    let mut paths: Vec<_> = entries.iter().map(|e| e.path.clone()).collect();
    paths.sort();
    let mut expected = files.clone();
    expected.sort();
    assert_eq!(paths, expected);
    Ok(())
}

async fn test_list_missing_directory_is_empty(client: StorageClient) -> Result<()> {
    let root = TEST_FIXTURE.new_dir_path();
    let missing = format!("{root}no_dir");

    let entries = client
        .list_contents(&missing, &ListOptions::default().recursive(true))
        .await;
    assert!(entries.is_empty());

    assert!(
        client
            .try_list_contents(&missing, &ListOptions::default())
            .await
            .is_err()
    );
    Ok(())
}

async fn test_ls_cli_recursive(client: StorageClient) -> Result<()> {
    let (root, files) = build_tree(&client).await?;

    let mut predicate = predicate::str::contains(files[0].as_str()).boxed();
    for file in &files[1..] {
        predicate = predicate.and(predicate::str::contains(file.as_str())).boxed();
    }

    filerfs_cmd()
        .arg("ls")
        .arg("-R")
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate);

    filerfs_cmd()
        .arg("ls")
        .arg("-l")
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("DIR").and(predicate::str::contains("FILE")));
    Ok(())
}
