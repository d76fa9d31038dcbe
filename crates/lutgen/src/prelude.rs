//! Prelude module - common imports for lutgen users
//!
//! ```rust
//! use lutgen::prelude::*;
//! ```

pub use crate::{
    // Pipeline
    build_table,
    generate_tables,
    load_function,
    load_notes,
    CellFailure,
    // Error types
    Error,
    FormulaError,
    FormulaValue,
    GenerateOptions,
    GenerationReport,
    GridFunction,
    // Layout types
    GridLayout,
    MarkdownWriteOptions,
    // I/O types
    MarkdownWriter,
    NamedRange,
    Result,
    SheetSpec,
    Table,
    TableCell,
    TableFunction,
};
