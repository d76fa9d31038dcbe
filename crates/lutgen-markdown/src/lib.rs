//! # lutgen-markdown
//!
//! Markdown writer for lutgen tables.

mod error;
mod options;
mod writer;

pub use error::{MarkdownError, MarkdownResult};
pub use options::{LineTerminator, MarkdownWriteOptions};
pub use writer::MarkdownWriter;
