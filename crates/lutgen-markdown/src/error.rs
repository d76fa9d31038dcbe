//! Markdown error types

use thiserror::Error;

/// Result type for Markdown operations
pub type MarkdownResult<T> = std::result::Result<T, MarkdownError>;

/// Errors that can occur while writing Markdown
#[derive(Debug, Error)]
pub enum MarkdownError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendered document was not valid UTF-8
    #[error("Encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
