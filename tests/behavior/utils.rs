use assert_cmd::prelude::*;
use filerfs::error::Result;
use filerfs::storage::{FilerConfig, StorageClient};
use libtest_mimic::{Failed, Trial};
use rand::Rng;
use rand::prelude::*;
use std::env;
use std::process::Command;
use std::sync::LazyLock;
use uuid::Uuid;

const TEST_DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8888";

pub static TEST_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
});

// Behavior trials need a running filer; without one they are registered as ignored.
static FILER_AVAILABLE: LazyLock<bool> = LazyLock::new(|| env::var("FILER_ENDPOINT").is_ok());

fn test_endpoint() -> String {
    env::var("FILER_ENDPOINT").unwrap_or_else(|_| TEST_DEFAULT_ENDPOINT.to_string())
}

pub async fn init_test_service() -> Result<StorageClient> {
    let config = FilerConfig::new(test_endpoint())?;
    StorageClient::new(config).await
}

/// Create a base filerfs Command with clean environment and logging configured
fn base_cmd() -> Command {
    let mut cmd = Command::cargo_bin("filerfs").unwrap();
    cmd.env_clear().env("RUST_LOG", "info");
    cmd
}

pub fn filerfs_cmd() -> Command {
    let mut cmd = base_cmd();
    cmd.env("FILER_ENDPOINT", test_endpoint());
    cmd
}

pub struct Fixture {
    pub paths: std::sync::Mutex<Vec<String>>,
}

impl Fixture {
    pub const fn new() -> Self {
        Self {
            paths: std::sync::Mutex::new(vec![]),
        }
    }

    /// A fresh top-level directory, removed recursively at cleanup.
    pub fn new_dir_path(&self) -> String {
        let path = format!("filerfs-test-{}/", Uuid::new_v4());
        self.paths.lock().unwrap().push(path.clone());
        path
    }

    /// A fresh top-level file path, removed at cleanup.
    pub fn new_file_path(&self) -> String {
        let path = format!("filerfs-test-{}.bin", Uuid::new_v4());
        self.paths.lock().unwrap().push(path.clone());
        path
    }

    /// Random non-empty content.
    pub fn new_content(&self, range: std::ops::Range<usize>) -> Vec<u8> {
        let mut rng = rand::rng();
        let size = rng.random_range(range);
        let mut content = vec![0; size];
        rng.fill_bytes(&mut content);
        content
    }

    pub async fn cleanup(&self, client: &StorageClient) {
        if !*FILER_AVAILABLE {
            return;
        }
        let paths: Vec<_> = std::mem::take(self.paths.lock().unwrap().as_mut());
        for path in paths {
            let _ = if path.ends_with('/') {
                client.delete_dir(&path).await
            } else {
                client.delete(&path).await
            };
        }
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_async_trial<F, Fut>(name: &str, client: &StorageClient, f: F) -> Trial
where
    F: FnOnce(StorageClient) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = Result<()>> + Send,
{
    let handle = TEST_RUNTIME.handle().clone();
    let client = client.clone();

    Trial::test(format!("behavior::{name}"), move || {
        handle
            .block_on(f(client))
            .map_err(|err| Failed::from(err.to_string()))
    })
    .with_ignored_flag(!*FILER_AVAILABLE)
}

#[macro_export]
macro_rules! async_trials {
    ($client:ident, $($test:ident),*) => {
        vec![$(build_async_trial(stringify!($test), $client, $test),)*]
    };
}

pub static TEST_FIXTURE: Fixture = Fixture::new();
