use crate::error::Result;
use crate::storage::http::FilerHttp;
use crate::storage::operations::copy::{Copier, FilerCopier};
use crate::storage::operations::delete::{Deleter, FilerDeleter};
use crate::storage::operations::stat::{FilerStater, Stater};
use crate::storage::utils::path::normalize_path;

/// Trait for moving files within the filer.
pub trait Mover {
    /// Move a single file from one path to another.
    ///
    /// The filer has no rename primitive, so this is a copy followed by a
    /// delete of the source. It is not atomic: if the delete fails after the
    /// copy succeeded, both paths hold the file. The source is never deleted
    /// unless the copy succeeded. Renaming a path onto itself only checks that
    /// the source exists.
    async fn rename(&self, src_path: &str, dest_path: &str) -> Result<()>;
}

pub struct FilerMover {
    copier: FilerCopier,
    deleter: FilerDeleter,
    stater: FilerStater,
}

impl FilerMover {
    pub fn new(http: FilerHttp) -> Self {
        Self {
            copier: FilerCopier::new(http.clone()),
            deleter: FilerDeleter::new(http.clone()),
            stater: FilerStater::new(http),
        }
    }
}

impl Mover for FilerMover {
    async fn rename(&self, src_path: &str, dest_path: &str) -> Result<()> {
        if same_path(src_path, dest_path) {
            log::debug!("rename {src_path}: source and destination are the same path");
            self.stater.stat(src_path).await?;
            return Ok(());
        }
        self.copier.copy(src_path, dest_path).await?;
        self.deleter.delete(src_path).await
    }
}

fn same_path(a: &str, b: &str) -> bool {
    normalize_path(a) == normalize_path(b)
}
