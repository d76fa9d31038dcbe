//! Compiled table functions
//!
//! A [`Lambda`] is a function of one argument list, built from one of the
//! accepted source forms:
//!
//! - `lambda p: <expr>`
//! - `def name(p): <statements>` with `x = <expr>` bindings and a final
//!   `return <expr>`
//! - a bare expression over `args`
//!
//! Nothing is executed while compiling; the source is parsed into a
//! [`FormulaExpr`] tree and evaluated once per call.

use lazy_regex::{regex_captures, regex_is_match};

use crate::ast::FormulaExpr;
use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::{constant, evaluate, function_registry, EvaluationContext, FormulaValue};
use crate::parser::parse_formula;

/// Argument list name used by bare expressions
pub const DEFAULT_PARAMETER: &str = "args";

/// A local binding inside a `def` body
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub expr: FormulaExpr,
}

/// A compiled function of one argument list
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    parameter: String,
    bindings: Vec<Binding>,
    body: FormulaExpr,
}

impl Lambda {
    /// Compile a function from `lambda`, `def` or bare-expression source
    pub fn parse(source: &str) -> FormulaResult<Self> {
        let source = source.trim();
        if source.is_empty() {
            return Err(FormulaError::Definition("Function definition is empty".into()));
        }

        if let Some((_, parameter, body)) =
            regex_captures!(r"(?s)^lambda\s+([A-Za-z_]\w*)\s*:(.*)$", source)
        {
            return Self::with_parameter(parameter, body);
        }

        if let Some((_, _name, parameter, body)) = regex_captures!(
            r"(?s)^def\s+([A-Za-z_]\w*)\s*\(\s*([A-Za-z_]\w*)\s*(?::[^)]*)?\)\s*(?:->[^:]*)?:(.*)$",
            source
        ) {
            return Self::parse_def_body(parameter, body);
        }

        if regex_is_match!(r"^(?:lambda\b|def\s)", source) {
            return Err(FormulaError::Definition(format!(
                "Function must take exactly one argument list: {}",
                first_line(source)
            )));
        }

        Self::with_parameter(DEFAULT_PARAMETER, source)
    }

    /// Compile a single expression over the named argument list
    pub fn with_parameter(parameter: &str, expr: &str) -> FormulaResult<Self> {
        Ok(Self::new(parameter, Vec::new(), parse_formula(expr)?))
    }

    /// Assemble a function from already-parsed parts
    pub fn new(parameter: impl Into<String>, bindings: Vec<Binding>, body: FormulaExpr) -> Self {
        Self {
            parameter: parameter.into(),
            bindings,
            body,
        }
    }

    fn parse_def_body(parameter: &str, body: &str) -> FormulaResult<Self> {
        let mut bindings = Vec::new();

        for statement in body.lines().flat_map(|line| split_statements(strip_comment(line))) {
            let statement = statement.trim();
            if statement.is_empty() || statement == "pass" {
                continue;
            }

            if let Some((_, expr)) = regex_captures!(r"^return\b(.*)$", statement) {
                let body = parse_formula(expr)?;
                return Ok(Self::new(parameter, bindings, body));
            }

            if let Some((_, name, expr)) = regex_captures!(r"^([A-Za-z_]\w*)\s*=([^=].*)$", statement)
            {
                if name == parameter {
                    return Err(FormulaError::Definition(format!(
                        "Cannot reassign argument list '{}'",
                        parameter
                    )));
                }
                bindings.push(Binding {
                    name: name.to_string(),
                    expr: parse_formula(expr)?,
                });
                continue;
            }

            return Err(FormulaError::Definition(format!(
                "Unsupported statement in function body: {}",
                statement
            )));
        }

        Err(FormulaError::Definition(
            "Function body has no return statement".into(),
        ))
    }

    /// Name of the argument list
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    /// Local bindings, in evaluation order
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Returned expression
    pub fn body(&self) -> &FormulaExpr {
        &self.body
    }

    /// Check every reference against the dimension names
    ///
    /// Catches unknown identifiers, unknown functions, wrong arity and
    /// indexing of anything other than the argument list.
    pub fn validate(&self, dimension_names: &[String]) -> FormulaResult<()> {
        let mut known: Vec<&str> = dimension_names.iter().map(String::as_str).collect();

        for binding in &self.bindings {
            self.validate_expr(&binding.expr, &known)?;
            known.push(&binding.name);
        }

        self.validate_expr(&self.body, &known)
    }

    fn validate_expr(&self, expr: &FormulaExpr, known: &[&str]) -> FormulaResult<()> {
        let mut problem = None;

        expr.walk(&mut |node| {
            if problem.is_some() {
                return;
            }
            problem = match node {
                FormulaExpr::Index { name, .. } if *name != self.parameter => Some(format!(
                    "'{}' cannot be indexed; only the argument list '{}' can",
                    name, self.parameter
                )),
                FormulaExpr::Name(name) if known.contains(&name.as_str()) => None,
                FormulaExpr::Name(name) if *name == self.parameter => Some(format!(
                    "Argument list '{}' must be indexed, e.g. {}[0]",
                    name, name
                )),
                FormulaExpr::Name(name) if constant(name).is_none() => {
                    Some(format!("Unknown name '{}'", name))
                }
                FormulaExpr::Function { name, args } => match function_registry().get(name) {
                    None => Some(format!("Unknown function '{}'", name)),
                    Some(def) => def.check_arity(args.len()).err().map(|e| e.to_string()),
                },
                _ => None,
            };
        });

        match problem {
            Some(message) => Err(FormulaError::Definition(message)),
            None => Ok(()),
        }
    }

    /// Evaluate for one tuple of arguments
    pub fn call(&self, args: &[f64], names: &[String]) -> FormulaResult<FormulaValue> {
        let mut ctx = EvaluationContext::new(&self.parameter, args, names);

        for binding in &self.bindings {
            let value = evaluate(&binding.expr, &ctx)?;
            ctx.bind(binding.name.clone(), value);
        }

        evaluate(&self.body, &ctx)
    }
}

/// Drop a trailing `#` comment, ignoring `#` inside string literals
fn strip_comment(line: &str) -> &str {
    let mut quote = None;
    for (i, c) in line.char_indices() {
        match (quote, c) {
            (None, '#') => return &line[..i],
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), _) if q == c => quote = None,
            _ => {}
        }
    }
    line
}

/// Split a line on `;` outside string literals
fn split_statements(line: &str) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut quote = None;
    let mut start = 0;
    for (i, c) in line.char_indices() {
        match (quote, c) {
            (None, ';') => {
                statements.push(&line[start..i]);
                start = i + 1;
            }
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), _) if q == c => quote = None,
            _ => {}
        }
    }
    statements.push(&line[start..]);
    statements
}

fn first_line(source: &str) -> &str {
    source.lines().next().unwrap_or(source)
}
