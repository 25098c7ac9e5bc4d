// Filer defaults
pub const DEFAULT_FILER_ENDPOINT: &str = "http://127.0.0.1:8888";

// Custom metadata headers understood by the filer
pub const HEADER_TIMESTAMP: &str = "Seaweed-timestamp";
pub const HEADER_VISIBILITY: &str = "Seaweed-visibility";
pub const HEADER_MIMETYPE: &str = "Seaweed-mimetype";

// Multipart form field carrying uploaded content
pub const UPLOAD_FIELD: &str = "file";

// Empty uploads are replaced by this so the filer records content headers.
pub const EMPTY_CONTENT_PLACEHOLDER: &[u8] = b" ";

pub const LISTING_QUERY: &str = "pretty=y";
pub const RECURSIVE_DELETE_QUERY: &str = "recursive=true";
pub const TAGGING_QUERY: &str = "tagging=true";
