//! Error types for lutgen-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lutgen-core
#[derive(Debug, Error)]
pub enum Error {
    /// Range descriptor does not have the `name:start:stop:step` shape
    #[error("Range spec must have format 'name:start:stop:step', got: {0}")]
    InvalidFormat(String),

    /// One of the numeric fields of a range descriptor is not an integer
    #[error("Invalid numeric values in range spec '{spec}': {message}")]
    InvalidValue { spec: String, message: String },

    /// Step of zero never reaches the stop value
    #[error("Step must be non-zero in range spec '{0}'")]
    ZeroStep(String),

    /// Range would produce no values
    #[error("Range '{name}' is empty: {start} never reaches {stop} with step {step}")]
    EmptyRange {
        name: String,
        start: i64,
        stop: i64,
        step: i64,
    },

    /// Range has more values than can be addressed
    #[error("Range '{name}' has too many values: {count}")]
    TooLarge { name: String, count: u128 },

    /// Only 2 or 3 dimensions can be laid out as tables
    #[error("Unsupported number of dimensions: {0}")]
    Dimension(usize),
}
