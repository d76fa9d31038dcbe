//! Markdown writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::MarkdownResult;
use crate::options::MarkdownWriteOptions;
use lutgen_core::{Table, TableCell};

/// Markdown table writer
///
/// Documents have the layout:
///
/// ```text
/// # Title
///
/// Notes
///
/// | ↓x, y→ | 1 | 2 |
/// |--------------------| --- | --- |
/// | 1 | 1 | 2 |
/// ```
pub struct MarkdownWriter;

impl MarkdownWriter {
    /// Write a table to a Markdown file
    pub fn write_file<P: AsRef<Path>>(
        table: &Table,
        path: P,
        options: &MarkdownWriteOptions,
    ) -> MarkdownResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write(table, &mut writer, options)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a table to a writer
    pub fn write<W: Write>(
        table: &Table,
        mut writer: W,
        options: &MarkdownWriteOptions,
    ) -> MarkdownResult<()> {
        let eol = options.line_terminator.as_str();

        write!(writer, "# {}{}{}", table.title, eol, eol)?;

        if !table.notes.is_empty() {
            write!(writer, "{}{}{}", table.notes, eol, eol)?;
        }

        // Header
        write!(
            writer,
            "| ↓{}, {}→ |",
            table.row_initial, table.column_initial
        )?;
        for column in &table.columns {
            write!(writer, " {} |", column)?;
        }
        writer.write_all(eol.as_bytes())?;

        // Separator
        write!(writer, "|{}|", "-".repeat(options.label_width))?;
        for _ in &table.columns {
            writer.write_all(b" --- |")?;
        }
        writer.write_all(eol.as_bytes())?;

        for row in &table.rows {
            write!(writer, "| {} |", row.value)?;
            for cell in &row.cells {
                match cell {
                    TableCell::Value(text) => write!(writer, " {} |", text)?,
                    TableCell::Error => write!(writer, " {} |", options.error_marker)?,
                }
            }
            writer.write_all(eol.as_bytes())?;
        }

        Ok(())
    }

    /// Render a table to a string
    pub fn to_string(table: &Table, options: &MarkdownWriteOptions) -> MarkdownResult<String> {
        let mut buffer = Vec::new();
        Self::write(table, &mut buffer, options)?;
        Ok(String::from_utf8(buffer)?)
    }
}
