use crate::error::Result;
use crate::storage::http::FilerHttp;
use crate::storage::metadata::{FileRecord, MimeSource};
use crate::storage::operations::stat::FilerStater;

/// Trait for resolving the mime type of a stored file.
pub trait MimeResolver {
    /// Probe `path`, taking the mime type from the custom header if it was set
    /// at write time and from the filer's `Content-Type` otherwise.
    async fn mime_type(&self, path: &str) -> Result<FileRecord>;
}

pub struct FilerMimeResolver {
    stater: FilerStater,
}

impl FilerMimeResolver {
    pub fn new(http: FilerHttp) -> Self {
        Self {
            stater: FilerStater::new(http),
        }
    }
}

impl MimeResolver for FilerMimeResolver {
    async fn mime_type(&self, path: &str) -> Result<FileRecord> {
        self.stater
            .probe(path, MimeSource::CustomOrContentType)
            .await
    }
}
