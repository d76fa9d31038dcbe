//! Error types for lutgen

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a generation run
#[derive(Debug, Error)]
pub enum Error {
    /// Function, Dart or notes file does not exist
    #[error("{what} not found: {path}")]
    NotFound { what: &'static str, path: String },

    /// Dart source has no usable function body
    #[error("{message} in {path}")]
    Parse { path: String, message: String },

    /// Function source is not one of the accepted forms
    #[error("Error creating function: {0}")]
    Definition(String),

    /// Range or layout error
    #[error(transparent)]
    Core(#[from] lutgen_core::Error),

    /// Markdown output error
    #[error(transparent)]
    Markdown(#[from] lutgen_markdown::MarkdownError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Map an IO error on `path`, reporting a missing file as [`Error::NotFound`]
    pub(crate) fn from_io(err: std::io::Error, what: &'static str, path: &str) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound {
                what,
                path: path.to_string(),
            }
        } else {
            Error::Io(err)
        }
    }
}

impl From<lutgen_formula::FormulaError> for Error {
    fn from(err: lutgen_formula::FormulaError) -> Self {
        match err {
            lutgen_formula::FormulaError::Definition(message) => Error::Definition(message),
            other => Error::Definition(other.to_string()),
        }
    }
}
