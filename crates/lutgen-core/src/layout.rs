//! Grid layout
//!
//! Decides how a set of named ranges maps onto Markdown documents:
//! two ranges produce a single table (rows × columns), three ranges produce
//! one table per value of the outer range.

use crate::error::{Error, Result};
use crate::range::NamedRange;

/// How the grid dimensions are laid out as tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridLayout {
    /// One table: first range is rows, second is columns
    Flat {
        rows: NamedRange,
        columns: NamedRange,
    },
    /// One table per outer value, each over rows × columns
    Stacked {
        outer: NamedRange,
        rows: NamedRange,
        columns: NamedRange,
    },
}

/// One document to be generated from a layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSpec {
    /// File name (without directory)
    pub file_name: String,
    /// Document title
    pub title: String,
    /// Outer value held fixed for this document (stacked layouts only)
    pub fixed: Option<i64>,
}

impl SheetSpec {
    /// Argument list for one grid cell, outer-to-inner
    pub fn arguments(&self, row: i64, column: i64) -> Vec<i64> {
        match self.fixed {
            Some(outer) => vec![outer, row, column],
            None => vec![row, column],
        }
    }
}

impl GridLayout {
    /// Build a layout from ranges in outer-to-inner order
    pub fn from_ranges(ranges: Vec<NamedRange>) -> Result<Self> {
        let count = ranges.len();
        let mut iter = ranges.into_iter();

        match (iter.next(), iter.next(), iter.next(), iter.next()) {
            (Some(rows), Some(columns), None, None) => Ok(GridLayout::Flat { rows, columns }),
            (Some(outer), Some(rows), Some(columns), None) => Ok(GridLayout::Stacked {
                outer,
                rows,
                columns,
            }),
            _ => Err(Error::Dimension(count)),
        }
    }

    /// Number of dimensions (2 or 3)
    pub fn dimensions(&self) -> usize {
        match self {
            GridLayout::Flat { .. } => 2,
            GridLayout::Stacked { .. } => 3,
        }
    }

    /// Row dimension
    pub fn rows(&self) -> &NamedRange {
        match self {
            GridLayout::Flat { rows, .. } | GridLayout::Stacked { rows, .. } => rows,
        }
    }

    /// Column dimension
    pub fn columns(&self) -> &NamedRange {
        match self {
            GridLayout::Flat { columns, .. } | GridLayout::Stacked { columns, .. } => columns,
        }
    }

    /// Outer dimension, if any
    pub fn outer(&self) -> Option<&NamedRange> {
        match self {
            GridLayout::Flat { .. } => None,
            GridLayout::Stacked { outer, .. } => Some(outer),
        }
    }

    /// Dimension names in argument order
    pub fn names(&self) -> Vec<String> {
        self.outer()
            .into_iter()
            .chain([self.rows(), self.columns()])
            .map(|r| r.name().to_string())
            .collect()
    }

    /// Total number of grid cells across all documents
    pub fn cell_count(&self) -> usize {
        let per_sheet = self.rows().len() * self.columns().len();
        per_sheet * self.outer().map_or(1, NamedRange::len)
    }

    /// Enumerate the documents this layout produces
    pub fn sheets(&self, title: &str) -> Vec<SheetSpec> {
        match self {
            GridLayout::Flat { rows, columns } => vec![SheetSpec {
                file_name: format!("{}2{}.md", rows.name(), columns.name()),
                title: title.to_string(),
                fixed: None,
            }],
            GridLayout::Stacked { outer, .. } => outer
                .iter()
                .map(|value| SheetSpec {
                    file_name: format!("{}_{:03}.md", outer.name(), value),
                    title: format!("{}: {} = {}", title, outer.name(), value),
                    fixed: Some(value),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn range(spec: &str) -> NamedRange {
        NamedRange::parse(spec).unwrap()
    }

    #[test]
    fn test_flat_layout() {
        let layout = GridLayout::from_ranges(vec![range("x:1:4:1"), range("y:1:3:1")]).unwrap();
        assert_eq!(layout.dimensions(), 2);
        assert_eq!(layout.rows().name(), "x");
        assert_eq!(layout.columns().name(), "y");
        assert!(layout.outer().is_none());
        assert_eq!(layout.names(), vec!["x", "y"]);
        assert_eq!(layout.cell_count(), 12);

        let sheets = layout.sheets("Multiplication");
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].file_name, "x2y.md");
        assert_eq!(sheets[0].title, "Multiplication");
        assert_eq!(sheets[0].arguments(2, 3), vec![2, 3]);
    }

    #[test]
    fn test_stacked_layout() {
        let layout = GridLayout::from_ranges(vec![
            range("weight:50:60:5"),
            range("height:150:160:10"),
            range("age:20:40:10"),
        ])
        .unwrap();
        assert_eq!(layout.dimensions(), 3);
        assert_eq!(layout.outer().unwrap().name(), "weight");
        assert_eq!(layout.names(), vec!["weight", "height", "age"]);
        assert_eq!(layout.cell_count(), 3 * 2 * 3);

        let sheets = layout.sheets("BMI");
        let names: Vec<_> = sheets.iter().map(|s| s.file_name.as_str()).collect();
        assert_eq!(names, vec!["weight_050.md", "weight_055.md", "weight_060.md"]);
        assert_eq!(sheets[1].title, "BMI: weight = 55");
        assert_eq!(sheets[1].arguments(150, 20), vec![55, 150, 20]);
    }

    #[test]
    fn test_stacked_file_names_pad_to_three_digits() {
        let layout = GridLayout::from_ranges(vec![
            range("z:-5:1200:1205"),
            range("x:1:1:1"),
            range("y:1:1:1"),
        ])
        .unwrap();
        let names: Vec<_> = layout
            .sheets("t")
            .into_iter()
            .map(|s| s.file_name)
            .collect();
        assert_eq!(names, vec!["z_-05.md", "z_1200.md"]);
    }

    #[test]
    fn test_wrong_dimension_count() {
        for count in [0usize, 1, 4] {
            let ranges = (0..count).map(|i| range(&format!("d{}:1:2:1", i))).collect();
            let err = GridLayout::from_ranges(ranges).unwrap_err();
            assert!(matches!(err, Error::Dimension(n) if n == count));
        }
        assert_eq!(
            Error::Dimension(4).to_string(),
            "Unsupported number of dimensions: 4"
        );
    }
}
