use crate::error::Result;
use crate::storage::constants::EMPTY_CONTENT_PLACEHOLDER;
use crate::storage::http::FilerHttp;
use crate::storage::metadata::{FileRecord, WriteOptions, now_timestamp};
use crate::storage::operations::stat::{FilerStater, Stater};

/// Trait for storing file contents.
pub trait Writer {
    /// Upload `contents` to `path`, replacing whatever was there.
    ///
    /// # Arguments
    /// * `path` - Destination path; missing parent directories are created by the filer
    /// * `contents` - File body; an empty body is stored as a single space
    /// * `options` - Timestamp, visibility and mime type to record
    ///
    /// # Returns
    /// * `Result<FileRecord>` - Metadata of the stored file, re-read from the filer
    async fn write(&self, path: &str, contents: Vec<u8>, options: &WriteOptions)
    -> Result<FileRecord>;

    /// The filer has no partial update, so this is a full overwrite.
    async fn update(
        &self,
        path: &str,
        contents: Vec<u8>,
        options: &WriteOptions,
    ) -> Result<FileRecord> {
        self.write(path, contents, options).await
    }
}

pub struct FilerWriter {
    http: FilerHttp,
    stater: FilerStater,
}

impl FilerWriter {
    pub fn new(http: FilerHttp) -> Self {
        Self {
            stater: FilerStater::new(http.clone()),
            http,
        }
    }
}

impl Writer for FilerWriter {
    async fn write(
        &self,
        path: &str,
        contents: Vec<u8>,
        options: &WriteOptions,
    ) -> Result<FileRecord> {
        let contents = if contents.is_empty() {
            log::debug!("write {path}: empty body replaced with placeholder");
            EMPTY_CONTENT_PLACEHOLDER.to_vec()
        } else {
            contents
        };

        let headers = options.headers(now_timestamp());
        self.http.upload(path, contents, headers).await?;
        self.stater.stat(path).await
    }
}
