use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::future::Future;

use serde::Deserialize;
use snafu::ResultExt;

use crate::error::{InvalidListingSnafu, Result};
use crate::storage::http::FilerHttp;
use crate::storage::metadata::{DirectoryEntry, EntryKind};
use crate::storage::utils::path::normalize_path;
use crate::storage::utils::size::format_size;

/// What a listing should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Descend into every directory found, however deep.
    pub recursive: bool,
    /// Keep directory entries in the result, not just files.
    pub include_directories: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            include_directories: true,
        }
    }
}

impl ListOptions {
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn files_only(mut self) -> Self {
        self.include_directories = false;
        self
    }
}

/// Trait for listing directory contents.
pub trait Lister {
    /// List the entries under `path` (empty for the root).
    ///
    /// # Arguments
    /// * `path` - Directory to list
    /// * `options` - Recursion and directory inclusion
    ///
    /// # Returns
    /// * `Result<Vec<DirectoryEntry>>` - Each entry once, in discovery order
    async fn list(&self, path: &str, options: &ListOptions) -> Result<Vec<DirectoryEntry>>;
}

pub struct FilerLister {
    http: FilerHttp,
}

impl FilerLister {
    pub fn new(http: FilerHttp) -> Self {
        Self { http }
    }

    /// One listing request for a single directory level.
    async fn list_level(&self, dir: String) -> Result<Vec<DirectoryEntry>> {
        let response = self.http.get_listing(&dir).await?;
        let body = response.bytes().await?;
        parse_listing(&dir, &body)
    }
}

impl Lister for FilerLister {
    async fn list(&self, path: &str, options: &ListOptions) -> Result<Vec<DirectoryEntry>> {
        collect_entries(path, options, |dir| self.list_level(dir)).await
    }
}

#[derive(Deserialize)]
struct ListingBody {
    #[serde(rename = "Entries", default)]
    entries: Option<Vec<RawEntry>>,
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(rename = "FullPath")]
    full_path: String,
    #[serde(rename = "Mime", default)]
    mime: Option<String>,
    #[serde(default)]
    chunks: Option<Vec<RawChunk>>,
}

#[derive(Deserialize)]
struct RawChunk {
    #[serde(default)]
    size: u64,
}

impl From<RawEntry> for DirectoryEntry {
    fn from(raw: RawEntry) -> Self {
        let size = raw
            .chunks
            .unwrap_or_default()
            .iter()
            .map(|chunk| chunk.size)
            .sum();
        let mime_type = raw.mime.unwrap_or_default();
        let kind = if mime_type.is_empty() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        DirectoryEntry {
            path: normalize_path(&raw.full_path),
            size,
            mime_type,
            kind,
        }
    }
}

fn parse_listing(dir: &str, body: &[u8]) -> Result<Vec<DirectoryEntry>> {
    let listing: ListingBody = serde_json::from_slice(body).context(InvalidListingSnafu {
        path: dir.to_string(),
    })?;
    Ok(listing
        .entries
        .unwrap_or_default()
        .into_iter()
        .map(DirectoryEntry::from)
        .collect())
}

/// Drain a worklist of directories, one `fetch` per directory.
///
/// The root is always fetched. With `recursive`, every directory entry seen
/// is queued once. Entries are returned once each, in discovery order.
pub(crate) async fn collect_entries<F, Fut>(
    root: &str,
    options: &ListOptions,
    mut fetch: F,
) -> Result<Vec<DirectoryEntry>>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Vec<DirectoryEntry>>>,
{
    let root = normalize_path(root.trim_end_matches('/'));
    let mut queue = VecDeque::from([root.clone()]);
    let mut visited = HashSet::from([root]);
    let mut seen = HashSet::new();
    let mut results = Vec::new();

    while let Some(dir) = queue.pop_front() {
        for entry in fetch(dir).await? {
            if !seen.insert(entry.path.clone()) {
                continue;
            }
            if entry.kind.is_dir() {
                if options.recursive && visited.insert(entry.path.clone()) {
                    queue.push_back(entry.path.clone());
                }
                if !options.include_directories {
                    continue;
                }
            }
            results.push(entry);
        }
    }

    Ok(results)
}

/// Detailed listing line used by `ls -l`.
pub struct EntryLine<'a>(pub &'a DirectoryEntry);

impl fmt::Display for EntryLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entry = self.0;
        let file_type = if entry.kind.is_dir() { "DIR" } else { "FILE" };
        let size_str = if entry.kind.is_dir() {
            "-".to_string()
        } else {
            format_size(entry.size)
        };
        let mime = if entry.mime_type.is_empty() {
            "-"
        } else {
            entry.mime_type.as_str()
        };
        write!(f, "{file_type:<6} {size_str:>10} {mime:<24} {}", entry.path)
    }
}
