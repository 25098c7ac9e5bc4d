// Directory creation operation trait and implementation
use crate::error::{NotADirectorySnafu, Result};
use crate::storage::http::FilerHttp;
use crate::storage::metadata::{FileRecord, WriteOptions};
use crate::storage::operations::stat::{FilerStater, Stater};
use crate::storage::utils::path::normalize_path;

/// Trait for creating directories in the filer.
pub trait Mkdirer {
    /// Create a directory, or return the existing one.
    ///
    /// # Arguments
    /// * `dirname` - Directory path, with or without a trailing slash
    /// * `options` - Accepted for interface symmetry; directories carry no metadata
    ///
    /// # Returns
    /// * `Result<FileRecord>` - The directory record, or `NotADirectory` if a file is in the way
    async fn create_dir(&self, dirname: &str, options: &WriteOptions) -> Result<FileRecord>;
}

pub struct FilerMkdirer {
    http: FilerHttp,
    stater: FilerStater,
}

impl FilerMkdirer {
    pub fn new(http: FilerHttp) -> Self {
        Self {
            stater: FilerStater::new(http.clone()),
            http,
        }
    }

    /// Look up what is already stored at `dirname`, if anything.
    async fn existing(&self, dirname: &str) -> Result<Option<FileRecord>> {
        match self.stater.stat(dirname).await {
            Ok(record) => Ok(Some(record)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl Mkdirer for FilerMkdirer {
    async fn create_dir(&self, dirname: &str, _options: &WriteOptions) -> Result<FileRecord> {
        let path = normalize_path(dirname.trim_end_matches('/'));

        if let Some(record) = self.existing(&path).await? {
            if record.is_dir() {
                log::debug!("create_dir {path}: already a directory");
                return Ok(record);
            }
            return NotADirectorySnafu { path }.fail();
        }

        self.http.create_directory(&path).await?;
        self.stater.stat(&path).await
    }
}
