// Utilities for storage module
pub mod error;
pub mod path;
pub mod size;

/// Output format for CLI commands that can render machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human friendly multi-line output
    Human,
    /// Single-line `key=value` output
    Raw,
    /// Single-line JSON output
    Json,
}
