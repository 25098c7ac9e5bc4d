use crate::error::{InvalidEndpointSnafu, Result};
use std::time::Duration;

pub mod constants;
pub mod http;
pub mod metadata;
pub mod operations;
pub mod utils;

use self::http::FilerHttp;
use self::metadata::{DirectoryEntry, FileRecord, Visibility, WriteOptions};
use self::operations::copy::FilerCopier;
use self::operations::delete::FilerDeleter;
use self::operations::list::{FilerLister, ListOptions};
use self::operations::mimetype::FilerMimeResolver;
use self::operations::mkdir::FilerMkdirer;
use self::operations::mv::FilerMover;
use self::operations::read::{FilerFileReader, ReadResult, ReadStream};
use self::operations::stat::FilerStater;
use self::operations::visibility::FilerVisibilitySetter;
use self::operations::write::FilerWriter;
use self::operations::{
    Copier, Deleter, FileReader, Lister, MimeResolver, Mkdirer, Mover, Stater, VisibilitySetter,
    Writer,
};
use crate::wrap_err;

/// Connection settings for a filer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilerConfig {
    /// Base URL without a trailing slash, e.g. `http://127.0.0.1:8888`.
    pub endpoint: String,
    /// Per-request timeout; `None` leaves it to the HTTP client.
    pub timeout: Option<Duration>,
}

impl FilerConfig {
    pub fn new(endpoint: String) -> Result<Self> {
        let trimmed = endpoint.trim().trim_end_matches('/');
        let host = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"));
        snafu::ensure!(
            host.is_some_and(|h| !h.is_empty()),
            InvalidEndpointSnafu {
                endpoint: endpoint.clone()
            }
        );
        Ok(Self {
            endpoint: trimmed.to_string(),
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Filesystem-style client for a SeaweedFS filer.
///
/// Every call is a fresh request/response against the filer; nothing is
/// cached, so every returned record reflects the filer at call time.
#[derive(Clone)]
pub struct StorageClient {
    http: FilerHttp,
}

impl StorageClient {
    pub async fn new(config: FilerConfig) -> Result<Self> {
        let http = FilerHttp::new(&config)?;
        Ok(Self { http })
    }

    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }

    pub async fn write(
        &self,
        path: &str,
        contents: Vec<u8>,
        options: &WriteOptions,
    ) -> Result<FileRecord> {
        log::debug!(
            "write endpoint={} path={} size={} options={:?}",
            self.endpoint(),
            path,
            contents.len(),
            options
        );
        let writer = FilerWriter::new(self.http.clone());
        wrap_err!(
            writer.write(path, contents, options).await,
            WriteFailed {
                path: path.to_string()
            }
        )
    }

    pub async fn update(
        &self,
        path: &str,
        contents: Vec<u8>,
        options: &WriteOptions,
    ) -> Result<FileRecord> {
        log::debug!(
            "update endpoint={} path={} size={}",
            self.endpoint(),
            path,
            contents.len()
        );
        let writer = FilerWriter::new(self.http.clone());
        wrap_err!(
            writer.update(path, contents, options).await,
            WriteFailed {
                path: path.to_string()
            }
        )
    }

    pub async fn read(&self, path: &str) -> Result<ReadResult> {
        log::debug!("read endpoint={} path={}", self.endpoint(), path);
        FilerFileReader::new(self.http.clone()).read(path).await
    }

    /// Open `path` for streaming. The caller owns the returned handle and
    /// releases the connection by draining or dropping it.
    pub async fn read_stream(&self, path: &str) -> Result<ReadStream> {
        log::debug!("read_stream endpoint={} path={}", self.endpoint(), path);
        FilerFileReader::new(self.http.clone())
            .read_stream(path)
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        log::debug!("delete endpoint={} path={}", self.endpoint(), path);
        FilerDeleter::new(self.http.clone()).delete(path).await
    }

    pub async fn delete_dir(&self, dirname: &str) -> Result<()> {
        log::debug!("delete_dir endpoint={} path={}", self.endpoint(), dirname);
        FilerDeleter::new(self.http.clone())
            .delete_dir(dirname)
            .await
    }

    pub async fn create_dir(&self, dirname: &str, options: &WriteOptions) -> Result<FileRecord> {
        log::debug!("create_dir endpoint={} path={}", self.endpoint(), dirname);
        let mkdirer = FilerMkdirer::new(self.http.clone());
        wrap_err!(
            mkdirer.create_dir(dirname, options).await,
            DirectoryCreationFailed {
                path: dirname.to_string()
            }
        )
    }

    pub async fn copy(&self, src_path: &str, dest_path: &str) -> Result<FileRecord> {
        log::debug!(
            "copy endpoint={} src_path={} dest_path={}",
            self.endpoint(),
            src_path,
            dest_path
        );
        let copier = FilerCopier::new(self.http.clone());
        wrap_err!(
            copier.copy(src_path, dest_path).await,
            CopyFailed {
                src_path: src_path.to_string(),
                dest_path: dest_path.to_string()
            }
        )
    }

    /// Copy then delete. Not atomic; see [`Mover::rename`].
    pub async fn rename(&self, src_path: &str, dest_path: &str) -> Result<()> {
        log::debug!(
            "rename endpoint={} src_path={} dest_path={}",
            self.endpoint(),
            src_path,
            dest_path
        );
        let mover = FilerMover::new(self.http.clone());
        wrap_err!(
            mover.rename(src_path, dest_path).await,
            RenameFailed {
                src_path: src_path.to_string(),
                dest_path: dest_path.to_string()
            }
        )
    }

    pub async fn has(&self, path: &str) -> Result<bool> {
        log::debug!("has endpoint={} path={}", self.endpoint(), path);
        FilerStater::new(self.http.clone()).exists(path).await
    }

    pub async fn get_metadata(&self, path: &str) -> Result<FileRecord> {
        log::debug!("get_metadata endpoint={} path={}", self.endpoint(), path);
        FilerStater::new(self.http.clone()).stat(path).await
    }

    pub async fn get_size(&self, path: &str) -> Result<FileRecord> {
        self.get_metadata(path).await
    }

    pub async fn get_timestamp(&self, path: &str) -> Result<FileRecord> {
        self.get_metadata(path).await
    }

    pub async fn get_visibility(&self, path: &str) -> Result<FileRecord> {
        self.get_metadata(path).await
    }

    pub async fn get_mimetype(&self, path: &str) -> Result<FileRecord> {
        log::debug!("get_mimetype endpoint={} path={}", self.endpoint(), path);
        FilerMimeResolver::new(self.http.clone())
            .mime_type(path)
            .await
    }

    pub async fn set_visibility(&self, path: &str, visibility: Visibility) -> Result<FileRecord> {
        log::debug!(
            "set_visibility endpoint={} path={} visibility={}",
            self.endpoint(),
            path,
            visibility
        );
        let setter = FilerVisibilitySetter::new(self.http.clone());
        wrap_err!(
            setter.set_visibility(path, visibility).await,
            VisibilityFailed {
                path: path.to_string()
            }
        )
    }

    /// List `directory`, degrading any failure to an empty result.
    ///
    /// An empty vec therefore means either an empty directory or a failed
    /// listing; use [`StorageClient::try_list_contents`] to tell them apart.
    pub async fn list_contents(&self, directory: &str, options: &ListOptions) -> Vec<DirectoryEntry> {
        match self.try_list_contents(directory, options).await {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("listing '{directory}' failed, returning no entries: {e}");
                Vec::new()
            }
        }
    }

    pub async fn try_list_contents(
        &self,
        directory: &str,
        options: &ListOptions,
    ) -> Result<Vec<DirectoryEntry>> {
        log::debug!(
            "list_contents endpoint={} path={} recursive={} include_directories={}",
            self.endpoint(),
            directory,
            options.recursive,
            options.include_directories
        );
        let lister = FilerLister::new(self.http.clone());
        wrap_err!(
            lister.list(directory, options).await,
            ListDirectoryFailed {
                path: directory.to_string()
            }
        )
    }
}
