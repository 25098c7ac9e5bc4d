// Thin HTTP layer over the filer: URL building, request shapes, status mapping
use std::sync::Arc;

use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::error::{NotFoundSnafu, Result, UnexpectedStatusSnafu};
use crate::storage::FilerConfig;
use crate::storage::constants::{
    HEADER_VISIBILITY, LISTING_QUERY, RECURSIVE_DELETE_QUERY, TAGGING_QUERY, UPLOAD_FIELD,
};
use crate::storage::metadata::Visibility;
use crate::storage::utils::path::{basename, directory_path, normalize_path};

/// Stateless handle to a filer endpoint. Cheap to clone.
#[derive(Clone, Debug)]
pub struct FilerHttp {
    client: Client,
    endpoint: Arc<str>,
}

impl FilerHttp {
    pub fn new(config: &FilerConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: Arc::from(config.endpoint.as_str()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Absolute URL for a filer path, with an optional raw query string.
    pub fn url(&self, path: &str, query: Option<&str>) -> String {
        let path = normalize_path(path);
        match query {
            Some(query) => format!("{}/{}?{}", self.endpoint, path, query),
            None => format!("{}/{}", self.endpoint, path),
        }
    }

    /// `HEAD <path>`: metadata only.
    pub async fn head(&self, path: &str) -> Result<Response> {
        let request = self.client.head(self.url(path, None));
        self.send("HEAD", path, request).await
    }

    /// `GET <path>`: content plus the same headers as `head`.
    pub async fn get(&self, path: &str) -> Result<Response> {
        let request = self.client.get(self.url(path, None));
        self.send("GET", path, request).await
    }

    /// `GET <dir>/?pretty=y` asking for a JSON listing.
    pub async fn get_listing(&self, dir: &str) -> Result<Response> {
        let dir = directory_path(dir);
        let request = self
            .client
            .get(self.url(&dir, Some(LISTING_QUERY)))
            .header(ACCEPT, "application/json");
        self.send("GET", &dir, request).await
    }

    /// Multipart `POST <path>` with the given custom headers.
    pub async fn upload(
        &self,
        path: &str,
        content: Vec<u8>,
        headers: Vec<(&'static str, String)>,
    ) -> Result<()> {
        let part = Part::bytes(content).file_name(basename(path));
        let form = Form::new().part(UPLOAD_FIELD, part);

        let mut request = self.client.post(self.url(path, None)).multipart(form);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        self.send("POST", path, request).await?;
        Ok(())
    }

    /// Empty `POST <dir>/`, which makes the filer register a directory.
    pub async fn create_directory(&self, dir: &str) -> Result<()> {
        let dir = directory_path(dir);
        let request = self.client.post(self.url(&dir, None));
        self.send("POST", &dir, request).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let request = self.client.delete(self.url(path, None));
        self.send("DELETE", path, request).await?;
        Ok(())
    }

    /// `DELETE <dir>/?recursive=true`; the filer removes every descendant.
    pub async fn delete_recursive(&self, dir: &str) -> Result<()> {
        let dir = directory_path(dir);
        let request = self
            .client
            .delete(self.url(&dir, Some(RECURSIVE_DELETE_QUERY)));
        self.send("DELETE", &dir, request).await?;
        Ok(())
    }

    /// `PUT <path>?tagging=true` carrying the visibility header.
    pub async fn put_visibility(&self, path: &str, visibility: Visibility) -> Result<()> {
        let request = self
            .client
            .put(self.url(path, Some(TAGGING_QUERY)))
            .header(HEADER_VISIBILITY, visibility.as_str());
        self.send("PUT", path, request).await?;
        Ok(())
    }

    async fn send(&self, method: &str, path: &str, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        log::trace!("{method} {path} -> {}", response.status());
        check_status(method, path, response.status())?;
        Ok(response)
    }
}

/// Anything outside 2xx is a failure; 404 is reported as `NotFound`.
fn check_status(method: &str, path: &str, status: StatusCode) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::NOT_FOUND {
        return NotFoundSnafu {
            path: normalize_path(path),
        }
        .fail();
    }
    UnexpectedStatusSnafu {
        method: method.to_string(),
        path: normalize_path(path),
        status: status.as_u16(),
    }
    .fail()
}
