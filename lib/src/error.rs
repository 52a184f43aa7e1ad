//! Error types for mdlens operations.
//!
//! Classification itself never fails - every degenerate input is a policy
//! short-circuit to "not Markdown". Errors only exist at the I/O boundaries
//! where a `PageSnapshot` gets constructed.

use thiserror::Error;

/// Errors that can occur when loading page content.
#[derive(Error, Debug)]
pub enum MdlensError {
    /// Failed to read a local file.
    #[error("Failed to load file: {0}")]
    FileLoad(#[from] std::io::Error),

    /// Failed to fetch a URL.
    #[error("Failed to fetch URL: {0}")]
    UrlFetch(#[from] reqwest::Error),

    /// A local path could not be expressed as a `file://` URL.
    #[error("Path is not representable as a file URL: {0}")]
    InvalidFilePath(String),
}

/// Result type for mdlens operations.
pub type MdlensResult<T> = Result<T, MdlensError>;
