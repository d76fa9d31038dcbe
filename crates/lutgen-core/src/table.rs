//! In-memory table model
//!
//! A [`Table`] is the fully evaluated content of one generated document,
//! independent of how it is serialized.

/// Content of a single grid cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCell {
    /// Formatted function result
    Value(String),
    /// Evaluation failed for this cell
    Error,
}

impl TableCell {
    /// Check if this cell failed to evaluate
    pub fn is_error(&self) -> bool {
        matches!(self, TableCell::Error)
    }
}

/// One row of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Row dimension value
    pub value: i64,
    /// One cell per column value
    pub cells: Vec<TableCell>,
}

/// A titled table over a row dimension and a column dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub title: String,
    /// Explanatory text inserted below the title (may be empty)
    pub notes: String,
    /// Initial of the row dimension name, shown in the header label
    pub row_initial: char,
    /// Initial of the column dimension name, shown in the header label
    pub column_initial: char,
    /// Column dimension values, in order
    pub columns: Vec<i64>,
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create an empty table with the given header
    pub fn new(
        title: impl Into<String>,
        notes: impl Into<String>,
        row_initial: char,
        column_initial: char,
        columns: Vec<i64>,
    ) -> Self {
        Self {
            title: title.into(),
            notes: notes.into(),
            row_initial,
            column_initial,
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row
    pub fn push_row(&mut self, value: i64, cells: Vec<TableCell>) {
        debug_assert_eq!(cells.len(), self.columns.len());
        self.rows.push(TableRow { value, cells });
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Look up a cell by row and column value
    pub fn cell(&self, row: i64, column: i64) -> Option<&TableCell> {
        let col_idx = self.columns.iter().position(|c| *c == column)?;
        self.rows
            .iter()
            .find(|r| r.value == row)
            .and_then(|r| r.cells.get(col_idx))
    }

    /// Number of cells that failed to evaluate
    pub fn error_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| c.is_error())
            .count()
    }
}
