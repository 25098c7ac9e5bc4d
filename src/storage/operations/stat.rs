use crate::error::Result;
use crate::storage::http::FilerHttp;
use crate::storage::metadata::{FileRecord, MimeSource, ProbeShape, now_timestamp};

/// Trait for fetching normalized metadata from the filer.
pub trait Stater {
    /// Fetch metadata for a single file or directory.
    ///
    /// # Arguments
    /// * `path` - Path to probe; a leading slash is ignored
    ///
    /// # Returns
    /// * `Result<FileRecord>` - File or directory record, `NotFound` if absent
    async fn stat(&self, path: &str) -> Result<FileRecord>;

    /// Whether anything exists at `path`.
    ///
    /// # Returns
    /// * `Result<bool>` - `false` only when the filer answers 404
    async fn exists(&self, path: &str) -> Result<bool>;
}

/// Implementation of `Stater` backed by `HEAD` requests.
#[derive(Clone)]
pub struct FilerStater {
    http: FilerHttp,
}

impl FilerStater {
    /// Create a new `FilerStater` with the given filer handle.
    pub fn new(http: FilerHttp) -> Self {
        Self { http }
    }

    /// Probe a path and decode its headers into a record.
    pub(crate) async fn probe(&self, path: &str, mime: MimeSource) -> Result<FileRecord> {
        let response = self.http.head(path).await?;
        let shape = ProbeShape::decode(response.status(), response.headers(), mime, now_timestamp());
        Ok(shape.into_record(path))
    }
}

impl Stater for FilerStater {
    async fn stat(&self, path: &str) -> Result<FileRecord> {
        self.probe(path, MimeSource::CustomOnly).await
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        presence(self.http.head(path).await)
    }
}

/// A successful probe means present, a not-found means absent, and anything
/// else is still an error.
fn presence<T>(probe: Result<T>) -> Result<bool> {
    match probe {
        Ok(_) => Ok(true),
        Err(e) if e.is_not_found() => Ok(false),
        Err(e) => Err(e),
    }
}
