use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Invalid filer endpoint '{endpoint}': expected an http:// or https:// URL"))]
    InvalidEndpoint { endpoint: String },

    #[snafu(display("Invalid timeout '{value}': expected a positive number of seconds"))]
    InvalidTimeout { value: String },

    #[snafu(display("Invalid visibility '{value}': expected 'public' or 'private'"))]
    InvalidVisibility { value: String },

    #[snafu(display("Path does not exist: {path}"))]
    NotFound { path: String },

    #[snafu(display("Path exists and is not a directory: {path}"))]
    NotADirectory { path: String },

    #[snafu(display("Cannot delete directory without -R flag: {path}"))]
    DirectoryDeletionNotRecursive { path: String },

    #[snafu(display("Filer returned {status} for {method} {path}"))]
    UnexpectedStatus {
        method: String,
        path: String,
        status: u16,
    },

    #[snafu(display("Malformed listing for '{path}': {source}"))]
    InvalidListing {
        path: String,
        source: serde_json::Error,
    },

    #[snafu(display("Failed to write '{path}': {source}"))]
    WriteFailed { path: String, source: Box<Error> },

    #[snafu(display("Failed to copy '{src_path}' to '{dest_path}': {source}"))]
    CopyFailed {
        src_path: String,
        dest_path: String,
        source: Box<Error>,
    },

    #[snafu(display("Failed to rename '{src_path}' to '{dest_path}': {source}"))]
    RenameFailed {
        src_path: String,
        dest_path: String,
        source: Box<Error>,
    },

    #[snafu(display("Failed to set visibility of '{path}': {source}"))]
    VisibilityFailed { path: String, source: Box<Error> },

    #[snafu(display("Failed to create directory '{path}': {source}"))]
    DirectoryCreationFailed { path: String, source: Box<Error> },

    #[snafu(display("Failed to list directory '{path}': {source}"))]
    ListDirectoryFailed { path: String, source: Box<Error> },

    #[snafu(display("HTTP error: {source}"))]
    Http { source: reqwest::Error },

    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },
}

impl Error {
    /// Whether this error (or the error it wraps) means the path is absent.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound { .. } => true,
            Error::UnexpectedStatus { status, .. } => *status == 404,
            Error::WriteFailed { source, .. }
            | Error::CopyFailed { source, .. }
            | Error::RenameFailed { source, .. }
            | Error::VisibilityFailed { source, .. }
            | Error::DirectoryCreationFailed { source, .. }
            | Error::ListDirectoryFailed { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::Http { source: error }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io { source: error }
    }
}
