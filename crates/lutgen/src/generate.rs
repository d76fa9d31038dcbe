//! Table generation
//!
//! Evaluates a [`GridFunction`] over every cell of a [`GridLayout`] and
//! writes one Markdown document per sheet.
//!
//! # Example
//!
//! ```rust,no_run
//! use lutgen::prelude::*;
//!
//! let function = load_function("lambda args: args[0] * args[1]")?;
//! let ranges = vec![NamedRange::parse("x:1:10:1")?, NamedRange::parse("y:1:5:1")?];
//!
//! let report = generate_tables(
//!     "multiply_tables",
//!     "Multiplication Table",
//!     ranges,
//!     &function,
//!     "",
//!     &GenerateOptions::default(),
//! )?;
//! println!("Wrote {} files", report.files.len());
//! # Ok::<(), lutgen::Error>(())
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::function::GridFunction;
use lutgen_core::{GridLayout, NamedRange, SheetSpec, Table, TableCell};
use lutgen_formula::FormulaError;
use lutgen_markdown::{MarkdownWriteOptions, MarkdownWriter};

/// Options for table generation
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Round numeric cells to this many decimal places
    pub decimals: Option<usize>,
    /// Markdown output options
    pub markdown: MarkdownWriteOptions,
}

/// A grid cell whose function evaluation failed
#[derive(Debug, Clone, PartialEq)]
pub struct CellFailure {
    /// Document the cell belongs to
    pub file_name: String,
    /// Dimension name and value for each argument, outer-to-inner
    pub arguments: Vec<(String, i64)>,
    pub error: FormulaError,
}

impl fmt::Display for CellFailure {
    /// Formats the argument combination, e.g. `x=1, y=2`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}

/// Outcome of a generation run
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Written documents, in generation order
    pub files: Vec<PathBuf>,
    /// Number of grid cells evaluated
    pub cells: usize,
    /// Cells rendered with the error marker
    pub failures: Vec<CellFailure>,
}

impl GenerationReport {
    /// Check if every cell evaluated successfully
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Evaluate one sheet of a layout into an in-memory table
///
/// Cells that fail to evaluate become [`TableCell::Error`] and are returned
/// alongside the table; they never abort the sheet.
pub fn build_table(
    layout: &GridLayout,
    sheet: &SheetSpec,
    function: &dyn GridFunction,
    notes: &str,
    options: &GenerateOptions,
) -> (Table, Vec<CellFailure>) {
    let rows = layout.rows();
    let columns = layout.columns();
    let names = layout.names();

    let mut table = Table::new(
        sheet.title.clone(),
        notes,
        rows.initial(),
        columns.initial(),
        columns.values(),
    );
    let mut failures = Vec::new();

    for row in rows {
        let mut cells = Vec::with_capacity(columns.len());

        for column in columns {
            let arguments = sheet.arguments(row, column);
            let values: Vec<f64> = arguments.iter().map(|v| *v as f64).collect();

            match function.evaluate(&values, &names) {
                Ok(value) => cells.push(TableCell::Value(value.format(options.decimals))),
                Err(error) => {
                    let failure = CellFailure {
                        file_name: sheet.file_name.clone(),
                        arguments: names.iter().cloned().zip(arguments).collect(),
                        error,
                    };
                    log::warn!(
                        "Error calculating function({}): {}",
                        failure,
                        failure.error
                    );
                    failures.push(failure);
                    cells.push(TableCell::Error);
                }
            }
        }

        table.push_row(row, cells);
    }

    (table, failures)
}

/// Generate the Markdown documents for 2 or 3 ranges
///
/// Two ranges produce `<row>2<column>.md`; three ranges produce
/// `<outer>_<value>.md` for every value of the first range. The output
/// directory is created if missing.
pub fn generate_tables<P: AsRef<Path>>(
    output_dir: P,
    title: &str,
    ranges: Vec<NamedRange>,
    function: &dyn GridFunction,
    notes: &str,
    options: &GenerateOptions,
) -> Result<GenerationReport> {
    let layout = GridLayout::from_ranges(ranges)?;
    let names = layout.names();

    function
        .validate(&names)
        .map_err(|e| Error::Definition(definition_message(e)))?;

    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    log::debug!(
        "Generating {}D tables over {} into {}",
        layout.dimensions(),
        names.join(", "),
        output_dir.display()
    );

    let mut report = GenerationReport::default();

    for sheet in layout.sheets(title) {
        let (table, failures) = build_table(&layout, &sheet, function, notes, options);

        let path = output_dir.join(&sheet.file_name);
        MarkdownWriter::write_file(&table, &path, &options.markdown)?;
        log::debug!(
            "Wrote {} ({} rows, {} errors)",
            path.display(),
            table.row_count(),
            table.error_count()
        );

        report.cells += table.row_count() * table.column_count();
        report.failures.extend(failures);
        report.files.push(path);
    }

    Ok(report)
}

fn definition_message(err: FormulaError) -> String {
    match err {
        FormulaError::Definition(message) => message,
        other => other.to_string(),
    }
}
