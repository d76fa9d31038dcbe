//! Named integer ranges
//!
//! A named range is one input dimension of the grid: a name plus an ordered,
//! inclusive sequence of integers built from a `name:start:stop:step`
//! descriptor.
//!
//! # Example
//!
//! ```rust
//! use lutgen_core::NamedRange;
//!
//! let range = NamedRange::parse("weight:50:60:5").unwrap();
//! assert_eq!(range.name(), "weight");
//! assert_eq!(range.values(), vec![50, 55, 60]);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A named, inclusive integer range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRange {
    name: String,
    start: i64,
    stop: i64,
    step: i64,
    len: usize,
}

impl NamedRange {
    /// Create a new named range
    ///
    /// `stop` is included when it is reachable from `start` by whole steps.
    /// The sequence never passes `stop`.
    pub fn new(name: impl Into<String>, start: i64, stop: i64, step: i64) -> Result<Self> {
        let name = name.into();

        if name.is_empty() {
            return Err(Error::InvalidFormat(format!(
                "{}:{}:{}:{}",
                name, start, stop, step
            )));
        }

        if step == 0 {
            return Err(Error::ZeroStep(format!(
                "{}:{}:{}:{}",
                name, start, stop, step
            )));
        }

        if (step > 0 && start > stop) || (step < 0 && start < stop) {
            return Err(Error::EmptyRange {
                name,
                start,
                stop,
                step,
            });
        }

        let span = (stop as i128 - start as i128).unsigned_abs() / step.unsigned_abs() as u128;
        let len = usize::try_from(span + 1).map_err(|_| Error::TooLarge {
            name: name.clone(),
            count: span + 1,
        })?;

        Ok(Self {
            name,
            start,
            stop,
            step,
            len,
        })
    }

    /// Parse a `name:start:stop:step` descriptor
    pub fn parse(spec: &str) -> Result<Self> {
        let parts: Vec<&str> = spec.split(':').collect();
        if parts.len() != 4 {
            return Err(Error::InvalidFormat(spec.to_string()));
        }

        let parse_field = |field: &str| -> Result<i64> {
            field.trim().parse::<i64>().map_err(|e| Error::InvalidValue {
                spec: spec.to_string(),
                message: format!("'{}': {}", field, e),
            })
        };

        let start = parse_field(parts[1])?;
        let stop = parse_field(parts[2])?;
        let step = parse_field(parts[3])?;

        Self::new(parts[0].trim(), start, stop, step)
    }

    /// Dimension name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First character of the name, used in table headers
    pub fn initial(&self) -> char {
        // Construction rejects empty names
        self.name.chars().next().unwrap_or('?')
    }

    /// First value
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Requested stop boundary (may not be part of the sequence)
    pub fn stop(&self) -> i64 {
        self.stop
    }

    /// Increment between consecutive values
    pub fn step(&self) -> i64 {
        self.step
    }

    /// Number of values in the range
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; construction rejects empty ranges
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Last value actually produced
    pub fn last(&self) -> i64 {
        // The last value lies between start and stop, so it fits in i64
        (self.start as i128 + (self.len as i128 - 1) * self.step as i128) as i64
    }

    /// Iterate over the values in order
    pub fn iter(&self) -> RangeIter {
        RangeIter {
            next: self.start,
            remaining: self.len(),
            step: self.step,
        }
    }

    /// Collect the values into a vector
    pub fn values(&self) -> Vec<i64> {
        self.iter().collect()
    }
}

impl FromStr for NamedRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for NamedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}:{}", self.name, self.start, self.stop, self.step)
    }
}

impl<'a> IntoIterator for &'a NamedRange {
    type Item = i64;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

/// Iterator over the values of a [`NamedRange`]
#[derive(Debug, Clone)]
pub struct RangeIter {
    next: i64,
    remaining: usize,
    step: i64,
}

impl Iterator for RangeIter {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.next;
        self.remaining -= 1;
        self.next = self.next.wrapping_add(self.step);
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RangeIter {}
