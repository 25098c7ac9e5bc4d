// Normalized metadata records and the decoding of filer responses into them
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, DATE, HeaderMap, LAST_MODIFIED};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::storage::constants::{HEADER_MIMETYPE, HEADER_TIMESTAMP, HEADER_VISIBILITY};

/// Current wall-clock time as Unix seconds.
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    #[serde(rename = "file")]
    File,
    #[serde(rename = "dir")]
    Directory,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "dir",
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }
}

/// Coarse access tag stored alongside a file. The filer does not enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

impl FromStr for Visibility {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            _ => Err(Error::InvalidVisibility {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-write settings. Anything left unset falls back to the filer defaults:
/// current time, public visibility, no mime type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub timestamp: Option<i64>,
    pub visibility: Option<Visibility>,
    pub mime_type: Option<String>,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Custom headers sent with an upload.
    pub fn headers(&self, now: i64) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            (HEADER_TIMESTAMP, self.timestamp.unwrap_or(now).to_string()),
            (
                HEADER_VISIBILITY,
                self.visibility.unwrap_or_default().as_str().to_string(),
            ),
        ];
        if let Some(mime_type) = self.mime_type.as_deref().filter(|m| !m.is_empty()) {
            headers.push((HEADER_MIMETYPE, mime_type.to_string()));
        }
        headers
    }
}

/// Normalized metadata for a single path.
///
/// `size` and `visibility` are only set for files; `timestamp` is always set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(rename = "mimetype", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    pub timestamp: i64,
}

impl FileRecord {
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    pub fn is_file(&self) -> bool {
        !self.kind.is_dir()
    }
}

impl fmt::Display for FileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path={} type={}", self.path, self.kind.as_str())?;
        if let Some(size) = self.size {
            write!(f, " size={size}")?;
        }
        if let Some(visibility) = self.visibility {
            write!(f, " visibility={visibility}")?;
        }
        if let Some(mime_type) = &self.mime_type {
            write!(f, " mimetype={mime_type}")?;
        }
        write!(f, " timestamp={}", self.timestamp)
    }
}

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub path: String,
    pub size: u64,
    #[serde(rename = "mimetype")]
    pub mime_type: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// Where the mime type of a probed file may come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeSource {
    /// Only the custom mime header set at write time.
    CustomOnly,
    /// The custom header, else the generic `Content-Type`.
    CustomOrContentType,
}

/// The three shapes a HEAD/GET response can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeShape {
    File {
        size: u64,
        mime_type: Option<String>,
        visibility: Visibility,
        timestamp: i64,
    },
    /// 204 No Content.
    EmptyFile {
        mime_type: Option<String>,
        visibility: Visibility,
        timestamp: i64,
    },
    Directory {
        timestamp: i64,
    },
}

impl ProbeShape {
    /// Classify a response by its status and headers.
    ///
    /// A `Content-Length` header means a file with content, 204 means an empty
    /// file, and anything else is a directory. `now` is the fallback timestamp.
    pub fn decode(status: StatusCode, headers: &HeaderMap, mime: MimeSource, now: i64) -> Self {
        if let Some(length) = header_str(headers, CONTENT_LENGTH.as_str()) {
            ProbeShape::File {
                size: length.trim().parse().unwrap_or_else(|_| {
                    log::debug!("unparseable content length '{length}', reporting size 0");
                    0
                }),
                mime_type: resolve_mime_type(headers, mime),
                visibility: resolve_visibility(headers),
                timestamp: resolve_timestamp(headers, LAST_MODIFIED.as_str(), now),
            }
        } else if status == StatusCode::NO_CONTENT {
            ProbeShape::EmptyFile {
                mime_type: resolve_mime_type(headers, mime),
                visibility: resolve_visibility(headers),
                timestamp: resolve_timestamp(headers, DATE.as_str(), now),
            }
        } else {
            ProbeShape::Directory { timestamp: now }
        }
    }

    pub fn into_record(self, path: &str) -> FileRecord {
        let path = path.trim_start_matches('/').to_string();
        match self {
            ProbeShape::File {
                size,
                mime_type,
                visibility,
                timestamp,
            } => FileRecord {
                path,
                kind: EntryKind::File,
                size: Some(size),
                mime_type,
                visibility: Some(visibility),
                timestamp,
            },
            ProbeShape::EmptyFile {
                mime_type,
                visibility,
                timestamp,
            } => FileRecord {
                path,
                kind: EntryKind::File,
                size: Some(0),
                mime_type,
                visibility: Some(visibility),
                timestamp,
            },
            ProbeShape::Directory { timestamp } => FileRecord {
                path,
                kind: EntryKind::Directory,
                size: None,
                mime_type: None,
                visibility: None,
                timestamp,
            },
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn resolve_mime_type(headers: &HeaderMap, source: MimeSource) -> Option<String> {
    let custom = header_str(headers, HEADER_MIMETYPE).filter(|m| !m.is_empty());
    let found = match source {
        MimeSource::CustomOnly => custom,
        MimeSource::CustomOrContentType => {
            custom.or_else(|| header_str(headers, CONTENT_TYPE.as_str()))
        }
    };
    found.map(str::to_string)
}

fn resolve_visibility(headers: &HeaderMap) -> Visibility {
    match header_str(headers, HEADER_VISIBILITY) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::debug!("unrecognized visibility header '{raw}', assuming public");
            Visibility::default()
        }),
        None => Visibility::default(),
    }
}

// Custom timestamp header, then the given date header, then `now`.
fn resolve_timestamp(headers: &HeaderMap, date_header: &str, now: i64) -> i64 {
    header_str(headers, HEADER_TIMESTAMP)
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .or_else(|| header_str(headers, date_header).and_then(parse_http_date))
        .unwrap_or(now)
}

/// Parse an HTTP date such as `Tue, 15 Nov 1994 08:12:31 GMT` into Unix seconds.
pub fn parse_http_date(raw: &str) -> Option<i64> {
    DateTime::parse_from_rfc2822(raw.trim())
        .map(|date| date.timestamp())
        .ok()
}
