//! # lutgen-core
//!
//! Core data structures for the lutgen lookup table generator.
//!
//! This crate provides the fundamental types used throughout lutgen:
//! - [`NamedRange`] - One input dimension parsed from `name:start:stop:step`
//! - [`GridLayout`] - How 2 or 3 dimensions map onto documents
//! - [`Table`] - The evaluated content of one document
//!
//! ## Example
//!
//! ```rust
//! use lutgen_core::{GridLayout, NamedRange};
//!
//! let ranges = vec![
//!     NamedRange::parse("x:1:4:1").unwrap(),
//!     NamedRange::parse("y:1:3:1").unwrap(),
//! ];
//! let layout = GridLayout::from_ranges(ranges).unwrap();
//! assert_eq!(layout.sheets("Multiplication")[0].file_name, "x2y.md");
//! ```

pub mod error;
pub mod layout;
pub mod range;
pub mod table;

pub use error::{Error, Result};
pub use layout::{GridLayout, SheetSpec};
pub use range::{NamedRange, RangeIter};
pub use table::{Table, TableCell, TableRow};
