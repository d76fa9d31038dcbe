//! Table functions
//!
//! A table function maps one grid cell's argument list (outer-to-inner) to a
//! value. Functions come either from expression source on the command line or
//! from a Dart file; closures can be used directly from Rust.

use std::fmt;
use std::path::PathBuf;

use crate::dart::parse_dart_function;
use crate::error::Result;
use lutgen_formula::{FormulaResult, FormulaValue, Lambda};

/// A function that can be evaluated over a grid
pub trait GridFunction {
    /// Evaluate for one grid cell
    ///
    /// `args` holds the dimension values outer-to-inner; `names` holds the
    /// matching dimension names.
    fn evaluate(&self, args: &[f64], names: &[String]) -> FormulaResult<FormulaValue>;

    /// Check the function against the dimension names before any cell is evaluated
    fn validate(&self, _names: &[String]) -> FormulaResult<()> {
        Ok(())
    }
}

impl<F> GridFunction for F
where
    F: Fn(&[f64]) -> FormulaResult<FormulaValue>,
{
    fn evaluate(&self, args: &[f64], _names: &[String]) -> FormulaResult<FormulaValue> {
        self(args)
    }
}

/// Where a table function was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionSource {
    /// `lambda`, `def` or bare expression text
    Expression,
    /// Return expression extracted from a Dart file
    Dart(PathBuf),
}

impl fmt::Display for FunctionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionSource::Expression => f.write_str("expression"),
            FunctionSource::Dart(path) => write!(f, "Dart file {}", path.display()),
        }
    }
}

/// A compiled table function
#[derive(Debug, Clone)]
pub struct TableFunction {
    source: FunctionSource,
    lambda: Lambda,
}

impl TableFunction {
    pub fn new(source: FunctionSource, lambda: Lambda) -> Self {
        Self { source, lambda }
    }

    /// Compile expression source (`lambda`, `def` or bare expression)
    pub fn from_expression(source: &str) -> Result<Self> {
        let lambda = Lambda::parse(source)?;
        Ok(Self::new(FunctionSource::Expression, lambda))
    }

    pub fn source(&self) -> &FunctionSource {
        &self.source
    }

    pub fn lambda(&self) -> &Lambda {
        &self.lambda
    }
}

impl GridFunction for TableFunction {
    fn evaluate(&self, args: &[f64], names: &[String]) -> FormulaResult<FormulaValue> {
        self.lambda.call(args, names)
    }

    fn validate(&self, names: &[String]) -> FormulaResult<()> {
        self.lambda.validate(names)
    }
}

/// Load a table function from a command-line specification
///
/// A specification ending in `.dart` is read as a Dart file; anything else is
/// compiled as expression source.
///
/// # Example
///
/// ```rust
/// use lutgen::{load_function, GridFunction, FormulaValue};
///
/// let f = load_function("lambda args: args[0] * args[1]").unwrap();
/// assert_eq!(f.evaluate(&[2.0, 3.0], &[]).unwrap(), FormulaValue::Number(6.0));
/// ```
pub fn load_function(spec: &str) -> Result<TableFunction> {
    let spec = spec.trim();

    if spec.ends_with(".dart") {
        return parse_dart_function(spec);
    }

    let function = TableFunction::from_expression(spec)?;
    log::debug!(
        "Compiled function over '{}' with {} local binding(s)",
        function.lambda.parameter(),
        function.lambda.bindings().len()
    );
    Ok(function)
}
