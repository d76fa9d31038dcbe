//! Formula evaluator
//!
//! Evaluates formula ASTs against one grid cell's argument values.

use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use crate::functions::FunctionRegistry;

/// Global function registry (lazily initialized)
static FUNCTION_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

/// Shared registry of built-in functions
pub fn function_registry() -> &'static FunctionRegistry {
    FUNCTION_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Named constants available to every formula
pub const CONSTANTS: &[(&str, f64)] = &[("pi", std::f64::consts::PI), ("e", std::f64::consts::E)];

/// Strip an optional `math.` qualifier (`math.sqrt` → `sqrt`)
pub fn unqualified(name: &str) -> &str {
    name.strip_prefix("math.").unwrap_or(name)
}

/// Look up a named constant
pub fn constant(name: &str) -> Option<f64> {
    let name = unqualified(name);
    CONSTANTS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, value)| *value)
}

/// Value types during formula evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaValue {
    Number(f64),
    String(String),
    Boolean(bool),
}

impl FormulaValue {
    /// Convert to number, if possible
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FormulaValue::Number(n) => Some(*n),
            FormulaValue::Boolean(true) => Some(1.0),
            FormulaValue::Boolean(false) => Some(0.0),
            FormulaValue::String(_) => None,
        }
    }

    /// Force conversion to number for arithmetic
    pub fn to_number(&self) -> FormulaResult<f64> {
        self.as_number().ok_or_else(|| {
            FormulaError::Evaluation(format!("Cannot convert {} to number", self.type_name()))
        })
    }

    /// Truthiness used by conditionals and logical operators
    pub fn is_truthy(&self) -> bool {
        match self {
            FormulaValue::Number(n) => *n != 0.0,
            FormulaValue::Boolean(b) => *b,
            FormulaValue::String(s) => !s.is_empty(),
        }
    }

    /// Name of the value's type, for messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FormulaValue::Number(_) => "number",
            FormulaValue::String(_) => "string",
            FormulaValue::Boolean(_) => "boolean",
        }
    }

    /// Convert to string
    pub fn as_string(&self) -> String {
        match self {
            FormulaValue::Number(n) => format_number(*n),
            FormulaValue::String(s) => s.clone(),
            FormulaValue::Boolean(true) => "True".to_string(),
            FormulaValue::Boolean(false) => "False".to_string(),
        }
    }

    /// Convert to string, rounding numbers to a fixed number of decimals
    pub fn format(&self, decimals: Option<usize>) -> String {
        match (self, decimals) {
            (FormulaValue::Number(n), Some(places)) => {
                let text = format!("{:.*}", places, n);
                match text.strip_prefix('-') {
                    Some(digits) if digits.bytes().all(|b| b == b'0' || b == b'.') => {
                        digits.to_string()
                    }
                    _ => text,
                }
            }
            _ => self.as_string(),
        }
    }
}

impl fmt::Display for FormulaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<f64> for FormulaValue {
    fn from(n: f64) -> Self {
        FormulaValue::Number(n)
    }
}

impl From<bool> for FormulaValue {
    fn from(b: bool) -> Self {
        FormulaValue::Boolean(b)
    }
}

impl From<&str> for FormulaValue {
    fn from(s: &str) -> Self {
        FormulaValue::String(s.to_string())
    }
}

/// Format a number without a trailing `.0` for whole values
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

const NO_NAMES: &[String] = &[];

/// Context for formula evaluation
pub struct EvaluationContext<'a> {
    /// Name of the argument list parameter (`args`, `input`, ...)
    pub parameter: Option<&'a str>,
    /// Argument values for the current grid cell, outer-to-inner
    pub args: &'a [f64],
    /// Dimension names, parallel to `args`
    pub names: &'a [String],
    /// Local bindings from a function body, in definition order
    locals: Vec<(String, FormulaValue)>,
}

impl<'a> EvaluationContext<'a> {
    /// Create a new evaluation context
    pub fn new(parameter: &'a str, args: &'a [f64], names: &'a [String]) -> Self {
        Self {
            parameter: Some(parameter),
            args,
            names,
            locals: Vec::new(),
        }
    }

    /// Create a simple context without arguments (for testing)
    pub fn simple() -> Self {
        Self {
            parameter: None,
            args: &[],
            names: NO_NAMES,
            locals: Vec::new(),
        }
    }

    /// Bind a local name, shadowing any earlier binding
    pub fn bind(&mut self, name: impl Into<String>, value: FormulaValue) {
        self.locals.push((name.into(), value));
    }

    /// Resolve `name[index]` against the argument list
    pub fn argument(&self, name: &str, index: i64) -> FormulaResult<FormulaValue> {
        if self.parameter != Some(name) {
            return Err(FormulaError::UnknownName(name.to_string()));
        }

        let len = self.args.len();
        let position = if index < 0 {
            len as i64 + index
        } else {
            index
        };

        usize::try_from(position)
            .ok()
            .and_then(|p| self.args.get(p))
            .map(|v| FormulaValue::Number(*v))
            .ok_or(FormulaError::IndexOutOfRange { index, len })
    }

    /// Resolve a bare identifier
    ///
    /// Lookup order: local bindings, dimension names, constants.
    pub fn lookup(&self, name: &str) -> FormulaResult<FormulaValue> {
        if let Some((_, value)) = self.locals.iter().rev().find(|(n, _)| n == name) {
            return Ok(value.clone());
        }

        if let Some(pos) = self.names.iter().position(|n| n == name) {
            if let Some(value) = self.args.get(pos) {
                return Ok(FormulaValue::Number(*value));
            }
        }

        if self.parameter == Some(name) {
            return Err(FormulaError::Evaluation(format!(
                "Argument list '{}' must be indexed, e.g. {}[0]",
                name, name
            )));
        }

        constant(name)
            .map(FormulaValue::Number)
            .ok_or_else(|| FormulaError::UnknownName(name.to_string()))
    }
}

/// Evaluate a formula expression
pub fn evaluate(expr: &FormulaExpr, ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    match expr {
        // === Literals ===
        FormulaExpr::Number(n) => Ok(FormulaValue::Number(*n)),
        FormulaExpr::String(s) => Ok(FormulaValue::String(s.clone())),
        FormulaExpr::Boolean(b) => Ok(FormulaValue::Boolean(*b)),

        // === References ===
        FormulaExpr::Index { name, index } => ctx.argument(name, *index),
        FormulaExpr::Name(name) => ctx.lookup(name),

        // === Operators ===
        FormulaExpr::BinaryOp { op, left, right } => evaluate_binary_op(*op, left, right, ctx),

        FormulaExpr::UnaryOp { op, operand } => evaluate_unary_op(*op, operand, ctx),

        FormulaExpr::Conditional {
            condition,
            then,
            otherwise,
        } => {
            if evaluate(condition, ctx)?.is_truthy() {
                evaluate(then, ctx)
            } else {
                evaluate(otherwise, ctx)
            }
        }

        // === Functions ===
        FormulaExpr::Function { name, args } => evaluate_function(name, args, ctx),
    }
}

/// Reject NaN and infinities produced by arithmetic
fn finite(n: f64) -> FormulaResult<FormulaValue> {
    if n.is_finite() {
        Ok(FormulaValue::Number(n))
    } else {
        Err(FormulaError::Evaluation(format!(
            "Result is not a finite number ({})",
            n
        )))
    }
}

/// Evaluate a binary operation
fn evaluate_binary_op(
    op: BinaryOperator,
    left: &FormulaExpr,
    right: &FormulaExpr,
    ctx: &EvaluationContext,
) -> FormulaResult<FormulaValue> {
    let left_val = evaluate(left, ctx)?;

    // Logical operators short-circuit and return the deciding operand
    match op {
        BinaryOperator::And if !left_val.is_truthy() => return Ok(left_val),
        BinaryOperator::Or if left_val.is_truthy() => return Ok(left_val),
        _ => {}
    }

    let right_val = evaluate(right, ctx)?;

    match op {
        // String concatenation shares the + operator
        BinaryOperator::Add => {
            if let (FormulaValue::String(l), FormulaValue::String(r)) = (&left_val, &right_val) {
                return Ok(FormulaValue::String(format!("{}{}", l, r)));
            }
            finite(left_val.to_number()? + right_val.to_number()?)
        }
        BinaryOperator::Subtract => finite(left_val.to_number()? - right_val.to_number()?),
        BinaryOperator::Multiply => finite(left_val.to_number()? * right_val.to_number()?),
        BinaryOperator::Divide
        | BinaryOperator::FloorDivide
        | BinaryOperator::TruncateDivide
        | BinaryOperator::Modulo => {
            let l = left_val.to_number()?;
            let r = right_val.to_number()?;
            if r == 0.0 {
                return Err(FormulaError::Evaluation(if op == BinaryOperator::Modulo {
                    "Modulo by zero".into()
                } else {
                    "Division by zero".into()
                }));
            }
            let result = match op {
                BinaryOperator::Divide => l / r,
                BinaryOperator::FloorDivide => (l / r).floor(),
                BinaryOperator::TruncateDivide => (l / r).trunc(),
                _ => l - r * (l / r).floor(),
            };
            finite(result)
        }
        BinaryOperator::Power => {
            let l = left_val.to_number()?;
            let r = right_val.to_number()?;
            if l == 0.0 && r < 0.0 {
                return Err(FormulaError::Evaluation(
                    "Zero cannot be raised to a negative power".into(),
                ));
            }
            finite(l.powf(r))
        }

        // Comparison operators
        BinaryOperator::Equal => Ok(FormulaValue::Boolean(
            compare_values(&left_val, &right_val) == Some(Ordering::Equal),
        )),
        BinaryOperator::NotEqual => Ok(FormulaValue::Boolean(
            compare_values(&left_val, &right_val) != Some(Ordering::Equal),
        )),
        BinaryOperator::LessThan
        | BinaryOperator::LessEqual
        | BinaryOperator::GreaterThan
        | BinaryOperator::GreaterEqual => {
            let ordering = compare_values(&left_val, &right_val).ok_or_else(|| {
                FormulaError::Evaluation(format!(
                    "Cannot compare {} with {}",
                    left_val.type_name(),
                    right_val.type_name()
                ))
            })?;
            let result = match op {
                BinaryOperator::LessThan => ordering == Ordering::Less,
                BinaryOperator::LessEqual => ordering != Ordering::Greater,
                BinaryOperator::GreaterThan => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            };
            Ok(FormulaValue::Boolean(result))
        }

        BinaryOperator::And | BinaryOperator::Or => Ok(right_val),
    }
}

/// Compare two values for ordering
///
/// Numbers and booleans compare numerically, strings lexically. Mixed
/// string/number pairs are unordered.
fn compare_values(left: &FormulaValue, right: &FormulaValue) -> Option<Ordering> {
    match (left, right) {
        (FormulaValue::String(l), FormulaValue::String(r)) => Some(l.cmp(r)),
        (FormulaValue::String(_), _) | (_, FormulaValue::String(_)) => None,
        _ => left.as_number()?.partial_cmp(&right.as_number()?),
    }
}

/// Evaluate a unary operation
fn evaluate_unary_op(
    op: UnaryOperator,
    operand: &FormulaExpr,
    ctx: &EvaluationContext,
) -> FormulaResult<FormulaValue> {
    let val = evaluate(operand, ctx)?;

    match op {
        UnaryOperator::Negate => Ok(FormulaValue::Number(-val.to_number()?)),
        UnaryOperator::Not => Ok(FormulaValue::Boolean(!val.is_truthy())),
    }
}

/// Evaluate a function call
fn evaluate_function(
    name: &str,
    args: &[FormulaExpr],
    ctx: &EvaluationContext,
) -> FormulaResult<FormulaValue> {
    let registry = function_registry();

    let func = registry
        .get(name)
        .ok_or_else(|| FormulaError::UnknownFunction(name.to_string()))?;

    func.check_arity(args.len())?;

    // Evaluate arguments
    let mut evaluated_args = Vec::with_capacity(args.len());
    for arg in args {
        evaluated_args.push(evaluate(arg, ctx)?);
    }

    // Call the function
    match (func.implementation)(&evaluated_args)? {
        FormulaValue::Number(n) => finite(n),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_formula;
    use pretty_assertions::assert_eq;

    fn eval(formula: &str) -> FormulaResult<FormulaValue> {
        let ast = parse_formula(formula)?;
        let ctx = EvaluationContext::simple();
        evaluate(&ast, &ctx)
    }

    fn eval_with(formula: &str, args: &[f64], names: &[&str]) -> FormulaResult<FormulaValue> {
        let ast = parse_formula(formula)?;
        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        let ctx = EvaluationContext::new("args", args, &names);
        evaluate(&ast, &ctx)
    }

    #[test]
    fn test_evaluate_literals() {
        assert_eq!(eval("42").unwrap(), FormulaValue::Number(42.0));
        assert_eq!(eval("'hi'").unwrap(), FormulaValue::String("hi".into()));
        assert_eq!(eval("True").unwrap(), FormulaValue::Boolean(true));
    }

    #[test]
    fn test_evaluate_arithmetic() {
        assert_eq!(eval("1+2").unwrap(), FormulaValue::Number(3.0));
        assert_eq!(eval("10-3").unwrap(), FormulaValue::Number(7.0));
        assert_eq!(eval("4*5").unwrap(), FormulaValue::Number(20.0));
        assert_eq!(eval("20/8").unwrap(), FormulaValue::Number(2.5));
        assert_eq!(eval("2**10").unwrap(), FormulaValue::Number(1024.0));
        assert_eq!(eval("-2**2").unwrap(), FormulaValue::Number(-4.0));
        assert_eq!(eval("2**-1").unwrap(), FormulaValue::Number(0.5));
    }

    #[test]
    fn test_evaluate_integer_division_and_modulo() {
        assert_eq!(eval("7 // 2").unwrap(), FormulaValue::Number(3.0));
        assert_eq!(eval("-7 // 2").unwrap(), FormulaValue::Number(-4.0));
        assert_eq!(eval("-7 ~/ 2").unwrap(), FormulaValue::Number(-3.0));
        assert_eq!(eval("7 % 3").unwrap(), FormulaValue::Number(1.0));
        assert_eq!(eval("-7 % 3").unwrap(), FormulaValue::Number(2.0));
    }

    #[test]
    fn test_evaluate_precedence() {
        assert_eq!(eval("1+2*3").unwrap(), FormulaValue::Number(7.0));
        assert_eq!(eval("(1+2)*3").unwrap(), FormulaValue::Number(9.0));
        assert_eq!(eval("2+3*4-5").unwrap(), FormulaValue::Number(9.0));
    }

    #[test]
    fn test_evaluate_arguments() {
        assert_eq!(
            eval_with("args[0] * args[1]", &[2.0, 3.0], &[]).unwrap(),
            FormulaValue::Number(6.0)
        );
        assert_eq!(
            eval_with("args[-1]", &[2.0, 3.0], &[]).unwrap(),
            FormulaValue::Number(3.0)
        );
        assert_eq!(
            eval_with("args[2]", &[2.0, 3.0], &[]).unwrap_err(),
            FormulaError::IndexOutOfRange { index: 2, len: 2 }
        );
        assert_eq!(
            eval_with("args[-3]", &[2.0, 3.0], &[]).unwrap_err(),
            FormulaError::IndexOutOfRange { index: -3, len: 2 }
        );
        assert_eq!(
            eval_with("input[0]", &[2.0, 3.0], &[]).unwrap_err(),
            FormulaError::UnknownName("input".into())
        );
    }

    #[test]
    fn test_evaluate_dimension_names() {
        assert_eq!(
            eval_with("x * 10 + y", &[2.0, 3.0], &["x", "y"]).unwrap(),
            FormulaValue::Number(23.0)
        );
        assert!(matches!(
            eval_with("z", &[2.0, 3.0], &["x", "y"]),
            Err(FormulaError::UnknownName(_))
        ));
        assert!(matches!(
            eval_with("args + 1", &[2.0], &["x"]),
            Err(FormulaError::Evaluation(_))
        ));
    }

    #[test]
    fn test_evaluate_constants() {
        assert_eq!(eval("pi").unwrap(), FormulaValue::Number(std::f64::consts::PI));
        assert_eq!(eval("math.e").unwrap(), FormulaValue::Number(std::f64::consts::E));
    }

    #[test]
    fn test_evaluate_locals_shadow_dimensions() {
        let ast = parse_formula("x + 1").unwrap();
        let names = vec!["x".to_string()];
        let mut ctx = EvaluationContext::new("args", &[1.0], &names);
        assert_eq!(evaluate(&ast, &ctx).unwrap(), FormulaValue::Number(2.0));

        ctx.bind("x", FormulaValue::Number(10.0));
        assert_eq!(evaluate(&ast, &ctx).unwrap(), FormulaValue::Number(11.0));
    }

    #[test]
    fn test_evaluate_comparison() {
        assert_eq!(eval("1<2").unwrap(), FormulaValue::Boolean(true));
        assert_eq!(eval("1>2").unwrap(), FormulaValue::Boolean(false));
        assert_eq!(eval("5==5").unwrap(), FormulaValue::Boolean(true));
        assert_eq!(eval("5!=5").unwrap(), FormulaValue::Boolean(false));
        assert_eq!(eval("5<=5").unwrap(), FormulaValue::Boolean(true));
        assert_eq!(eval("5>=6").unwrap(), FormulaValue::Boolean(false));
        assert_eq!(eval("'a' < 'b'").unwrap(), FormulaValue::Boolean(true));
        assert_eq!(eval("'1' == 1").unwrap(), FormulaValue::Boolean(false));
        assert!(eval("'1' < 1").is_err());
    }

    #[test]
    fn test_evaluate_chained_comparison() {
        assert_eq!(eval("1 < 2 < 3").unwrap(), FormulaValue::Boolean(true));
        assert_eq!(eval("1 < 5 < 3").unwrap(), FormulaValue::Boolean(false));
        assert_eq!(eval("3 > 2 == 2").unwrap(), FormulaValue::Boolean(true));
        assert_eq!(
            eval_with("18.5 <= args[0] < 25", &[40.0], &["bmi"]).unwrap(),
            FormulaValue::Boolean(false)
        );
        assert_eq!(
            eval_with("18.5 <= bmi < 25", &[20.0], &["bmi"]).unwrap(),
            FormulaValue::Boolean(true)
        );
    }

    #[test]
    fn test_evaluate_logical() {
        assert_eq!(eval("True and False").unwrap(), FormulaValue::Boolean(false));
        assert_eq!(eval("true || false").unwrap(), FormulaValue::Boolean(true));
        assert_eq!(eval("0 or 5").unwrap(), FormulaValue::Number(5.0));
        assert_eq!(eval("not 0").unwrap(), FormulaValue::Boolean(true));
        assert_eq!(eval("!(1 < 2)").unwrap(), FormulaValue::Boolean(false));
        // Right side is never evaluated
        assert_eq!(eval("False and 1/0").unwrap(), FormulaValue::Boolean(false));
    }

    #[test]
    fn test_evaluate_conditional() {
        assert_eq!(
            eval("'yes' if 3 > 2 else 'no'").unwrap(),
            FormulaValue::String("yes".into())
        );
        assert_eq!(eval("3 < 2 ? 1 : 2").unwrap(), FormulaValue::Number(2.0));
        assert_eq!(eval("1 if True else 1/0").unwrap(), FormulaValue::Number(1.0));
    }

    #[test]
    fn test_evaluate_concatenation() {
        assert_eq!(
            eval("'Hello ' + 'World'").unwrap(),
            FormulaValue::String("Hello World".into())
        );
        assert!(eval("'Value: ' + 42").is_err());
    }

    #[test]
    fn test_evaluate_failures() {
        assert!(matches!(eval("1/0"), Err(FormulaError::Evaluation(_))));
        assert!(matches!(eval("1//0"), Err(FormulaError::Evaluation(_))));
        assert!(matches!(eval("1%0"), Err(FormulaError::Evaluation(_))));
        assert!(matches!(eval("0**-1"), Err(FormulaError::Evaluation(_))));
        assert!(matches!(eval("10**400"), Err(FormulaError::Evaluation(_))));
        assert!(matches!(eval("sqrt(-1)"), Err(FormulaError::Evaluation(_))));
        assert!(matches!(eval("-'a'"), Err(FormulaError::Evaluation(_))));
        assert!(matches!(eval("nope(1)"), Err(FormulaError::UnknownFunction(_))));
    }

    #[test]
    fn test_evaluate_functions() {
        assert_eq!(eval("max(5,2,8,1)").unwrap(), FormulaValue::Number(8.0));
        assert_eq!(eval("math.sqrt(16)").unwrap(), FormulaValue::Number(4.0));
        assert_eq!(eval("abs(-3) + min(4, 2)").unwrap(), FormulaValue::Number(5.0));
        assert!(matches!(
            eval("sqrt(1, 2)"),
            Err(FormulaError::ArgumentCount { .. })
        ));
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(FormulaValue::Number(6.0).to_string(), "6");
        assert_eq!(FormulaValue::Number(-0.0).to_string(), "0");
        assert_eq!(FormulaValue::Number(2.5).to_string(), "2.5");
        assert_eq!(FormulaValue::Number(1.0 / 3.0).to_string(), "0.3333333333333333");
        assert_eq!(FormulaValue::Number(1e20).to_string(), "100000000000000000000");
        assert_eq!(FormulaValue::Boolean(true).to_string(), "True");
        assert_eq!(FormulaValue::String("x".into()).to_string(), "x");
        assert_eq!(FormulaValue::Number(22.857142).format(Some(1)), "22.9");
        assert_eq!(FormulaValue::Number(6.0).format(Some(2)), "6.00");
        assert_eq!(FormulaValue::Boolean(false).format(Some(2)), "False");
    }

    #[test]
    fn test_format_rounded_negative_zero() {
        assert_eq!(FormulaValue::Number(-0.001).format(Some(2)), "0.00");
        assert_eq!(FormulaValue::Number(-0.4).format(Some(0)), "0");
        assert_eq!(FormulaValue::Number(-0.0).format(Some(1)), "0.0");
        assert_eq!(FormulaValue::Number(-0.005).format(Some(3)), "-0.005");
        assert_eq!(FormulaValue::Number(-1.26).format(Some(1)), "-1.3");
    }
}
