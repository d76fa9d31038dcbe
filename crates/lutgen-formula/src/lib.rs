//! # lutgen-formula
//!
//! Expression language for lutgen table functions.
//!
//! This crate provides:
//! - Formula parsing (text → AST)
//! - Formula evaluation (AST → value)
//! - Built-in math functions
//! - Compilation of `lambda`, `def` and bare-expression sources
//!
//! ## Example
//!
//! ```rust
//! use lutgen_formula::{FormulaValue, Lambda};
//!
//! let f = Lambda::parse("lambda args: args[0] * args[1]").unwrap();
//! assert_eq!(f.call(&[2.0, 3.0], &[]).unwrap(), FormulaValue::Number(6.0));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod lambda;
pub mod parser;

pub use ast::{BinaryOperator, FormulaExpr, UnaryOperator};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, function_registry, EvaluationContext, FormulaValue};
pub use functions::FunctionRegistry;
pub use lambda::{Binding, Lambda, DEFAULT_PARAMETER};
pub use parser::parse_formula;
