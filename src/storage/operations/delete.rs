// Delete operation trait and implementation
use crate::error::Result;
use crate::storage::http::FilerHttp;

/// Trait for deleting files and directories from the filer.
pub trait Deleter {
    /// Delete a single file.
    ///
    /// # Returns
    /// * `Result<()>` - `NotFound` if nothing was stored at `path`
    async fn delete(&self, path: &str) -> Result<()>;

    /// Delete a directory and everything beneath it in one request.
    /// The filer performs the cascade; nothing is walked locally.
    async fn delete_dir(&self, dirname: &str) -> Result<()>;
}

pub struct FilerDeleter {
    http: FilerHttp,
}

impl FilerDeleter {
    pub fn new(http: FilerHttp) -> Self {
        Self { http }
    }
}

impl Deleter for FilerDeleter {
    async fn delete(&self, path: &str) -> Result<()> {
        self.http.delete(path).await
    }

    async fn delete_dir(&self, dirname: &str) -> Result<()> {
        self.http.delete_recursive(dirname).await
    }
}
