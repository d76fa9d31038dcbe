//! Markdown options

/// Options for writing Markdown tables
#[derive(Debug, Clone)]
pub struct MarkdownWriteOptions {
    /// Text written in place of a cell that failed to evaluate (default: `ERROR`)
    pub error_marker: String,
    /// Number of dashes under the header label (default: 20)
    pub label_width: usize,
    /// Line terminator
    pub line_terminator: LineTerminator,
}

impl Default for MarkdownWriteOptions {
    fn default() -> Self {
        Self {
            error_marker: "ERROR".to_string(),
            label_width: 20,
            line_terminator: LineTerminator::LF,
        }
    }
}

/// Line terminator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// Unix-style (LF)
    LF,
    /// Windows-style (CRLF)
    CRLF,
}

impl LineTerminator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineTerminator::LF => "\n",
            LineTerminator::CRLF => "\r\n",
        }
    }
}
