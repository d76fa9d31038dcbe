//! # lutgen
//!
//! Generate Markdown lookup tables from functions of 2 or 3 integer inputs.
//!
//! A function is evaluated over the Cartesian grid of its named ranges.
//! Two ranges produce a single table (rows × columns); three ranges produce
//! one table per value of the first range.
//!
//! ## Features
//!
//! - Functions written as `lambda`, `def` or bare expressions
//! - Functions extracted from a Dart file's `return` statement
//! - Inclusive integer ranges written as `name:start:stop:step`
//! - Cells that fail to evaluate render as `ERROR` without stopping the run
//!
//! Function source is compiled into an expression tree; no code is executed.
//!
//! ## Example
//!
//! ```rust
//! use lutgen::prelude::*;
//!
//! let function = load_function("lambda args: args[0] * args[1]").unwrap();
//! let layout = GridLayout::from_ranges(vec![
//!     NamedRange::parse("x:1:4:1").unwrap(),
//!     NamedRange::parse("y:1:3:1").unwrap(),
//! ])
//! .unwrap();
//!
//! let sheets = layout.sheets("Multiplication");
//! let (table, failures) =
//!     build_table(&layout, &sheets[0], &function, "", &GenerateOptions::default());
//! assert!(failures.is_empty());
//!
//! let markdown = MarkdownWriter::to_string(&table, &MarkdownWriteOptions::default()).unwrap();
//! assert!(markdown.contains("| 2 | 2 | 4 | 6 |"));
//! ```

pub mod dart;
pub mod error;
pub mod function;
pub mod generate;
pub mod notes;
pub mod prelude;

pub use dart::{parse_dart_function, parse_dart_source};
pub use error::{Error, Result};
pub use function::{load_function, FunctionSource, GridFunction, TableFunction};
pub use generate::{build_table, generate_tables, CellFailure, GenerateOptions, GenerationReport};
pub use notes::load_notes;

// Re-export core types
pub use lutgen_core::{GridLayout, NamedRange, SheetSpec, Table, TableCell, TableRow};

// Re-export formula types
pub use lutgen_formula::{FormulaError, FormulaResult, FormulaValue, Lambda};

// Re-export Markdown types
pub use lutgen_markdown::{LineTerminator, MarkdownError, MarkdownWriteOptions, MarkdownWriter};
