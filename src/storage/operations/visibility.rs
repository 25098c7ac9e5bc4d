use crate::error::Result;
use crate::storage::http::FilerHttp;
use crate::storage::metadata::{FileRecord, Visibility};
use crate::storage::operations::stat::{FilerStater, Stater};

/// Trait for retagging the visibility of a stored file.
pub trait VisibilitySetter {
    /// Tag `path` with `visibility` and return its refreshed metadata.
    async fn set_visibility(&self, path: &str, visibility: Visibility) -> Result<FileRecord>;
}

pub struct FilerVisibilitySetter {
    http: FilerHttp,
    stater: FilerStater,
}

impl FilerVisibilitySetter {
    pub fn new(http: FilerHttp) -> Self {
        Self {
            stater: FilerStater::new(http.clone()),
            http,
        }
    }
}

impl VisibilitySetter for FilerVisibilitySetter {
    async fn set_visibility(&self, path: &str, visibility: Visibility) -> Result<FileRecord> {
        self.http.put_visibility(path, visibility).await?;
        self.stater.stat(path).await
    }
}
