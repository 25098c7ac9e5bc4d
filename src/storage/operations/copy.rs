use crate::error::Result;
use crate::storage::http::FilerHttp;
use crate::storage::metadata::{FileRecord, WriteOptions};
use crate::storage::operations::read::{FileReader, FilerFileReader};
use crate::storage::operations::write::{FilerWriter, Writer};

/// Trait for copying files within the filer.
pub trait Copier {
    /// Copy a single file to a new path.
    ///
    /// The source is read in full and written back with default options, so
    /// the copy gets a fresh timestamp and public visibility.
    ///
    /// # Returns
    /// * `Result<FileRecord>` - Metadata of the destination file
    async fn copy(&self, src_path: &str, dest_path: &str) -> Result<FileRecord>;
}

pub struct FilerCopier {
    reader: FilerFileReader,
    writer: FilerWriter,
}

impl FilerCopier {
    pub fn new(http: FilerHttp) -> Self {
        Self {
            reader: FilerFileReader::new(http.clone()),
            writer: FilerWriter::new(http),
        }
    }
}

impl Copier for FilerCopier {
    async fn copy(&self, src_path: &str, dest_path: &str) -> Result<FileRecord> {
        let source = self.reader.read(src_path).await?;
        self.writer
            .write(dest_path, source.contents, &WriteOptions::default())
            .await
    }
}
