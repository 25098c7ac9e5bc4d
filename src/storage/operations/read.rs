use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use reqwest::Response;
use reqwest::header::{CONTENT_LENGTH, HeaderMap};

use crate::error::{Error, NotFoundSnafu, Result};
use crate::storage::http::FilerHttp;
use crate::storage::utils::path::normalize_path;

/// Whole-file read result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadResult {
    pub path: String,
    pub contents: Vec<u8>,
}

/// An open response body. Dropping it releases the connection.
#[derive(Debug)]
pub struct ReadStream {
    pub path: String,
    response: Response,
}

impl ReadStream {
    /// Length announced by the filer.
    pub fn content_length(&self) -> Option<u64> {
        self.response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    }

    /// Consume the handle as a stream of body chunks.
    pub fn into_stream(self) -> BoxStream<'static, Result<Vec<u8>>> {
        self.response
            .bytes_stream()
            .map_ok(|chunk| chunk.to_vec())
            .map_err(Error::from)
            .boxed()
    }
}

pub trait FileReader {
    /// Read a file in full. A body without `Content-Length` (a directory, or
    /// nothing stored) is reported as `NotFound`.
    async fn read(&self, path: &str) -> Result<ReadResult>;

    /// Like `read` but hands back the open body instead of buffering it.
    async fn read_stream(&self, path: &str) -> Result<ReadStream>;
}

pub struct FilerFileReader {
    http: FilerHttp,
}

impl FilerFileReader {
    pub fn new(http: FilerHttp) -> Self {
        Self { http }
    }

    async fn fetch(&self, path: &str) -> Result<Response> {
        let response = self.http.get(path).await?;
        require_content_length(path, response.headers())?;
        Ok(response)
    }
}

/// Only a body with a `Content-Length` counts as file content.
fn require_content_length(path: &str, headers: &HeaderMap) -> Result<()> {
    if !headers.contains_key(CONTENT_LENGTH) {
        log::debug!("read {path}: response has no content length, treating as missing");
        return NotFoundSnafu {
            path: normalize_path(path),
        }
        .fail();
    }
    Ok(())
}

impl FileReader for FilerFileReader {
    async fn read(&self, path: &str) -> Result<ReadResult> {
        let response = self.fetch(path).await?;
        let contents = response.bytes().await?.to_vec();
        Ok(ReadResult {
            path: normalize_path(path),
            contents,
        })
    }

    async fn read_stream(&self, path: &str) -> Result<ReadStream> {
        let response = self.fetch(path).await?;
        Ok(ReadStream {
            path: normalize_path(path),
            response,
        })
    }
}
