//! Dart function loader
//!
//! Reads a Dart source file holding a single function such as
//!
//! ```dart
//! double predict(List<double> input) {
//!   return input[0] * 0.5 + input[1];
//! }
//! ```
//!
//! and compiles the expression of its first `return` line. The argument list
//! keeps the name of the function's parameter, so `input[n]` refers to grid
//! argument `n`.

use std::fs;
use std::path::Path;

use lazy_regex::regex_captures;

use crate::error::{Error, Result};
use crate::function::{FunctionSource, TableFunction};
use lutgen_formula::Lambda;

/// Argument list name used when the signature does not declare one
pub const DART_DEFAULT_PARAMETER: &str = "input";

/// Load a table function from a `.dart` file
pub fn parse_dart_function<P: AsRef<Path>>(path: P) -> Result<TableFunction> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .map_err(|e| Error::from_io(e, "Dart function file", &path.display().to_string()))?;

    parse_dart_source(&source, path)
}

/// Compile Dart source text; `path` is only used in messages
pub fn parse_dart_source(source: &str, path: &Path) -> Result<TableFunction> {
    let parse_error = |message: &str| Error::Parse {
        path: path.display().to_string(),
        message: message.to_string(),
    };

    let (body_start, body_end) = match (source.find('{'), source.rfind('}')) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => return Err(parse_error("Could not find function body")),
    };

    let parameter = signature_parameter(&source[..body_start]);
    let body = &source[body_start + 1..body_end];

    let expr = body
        .lines()
        .find_map(|line| regex_captures!(r"\breturn\b(.*)$", line).map(|(_, rest)| rest))
        .ok_or_else(|| parse_error("Could not find return statement"))?;
    let expr = expr.trim().trim_end_matches(';').trim_end();

    let lambda = Lambda::with_parameter(parameter, expr).map_err(|e| Error::Parse {
        path: path.display().to_string(),
        message: format!("Could not parse return expression '{}': {}", expr, e),
    })?;

    log::debug!(
        "Loaded Dart function from {} as {}[..] -> {}",
        path.display(),
        parameter,
        expr
    );

    Ok(TableFunction::new(
        FunctionSource::Dart(path.to_path_buf()),
        lambda,
    ))
}

/// Name of the single parameter in a signature like `double f(List<double> input)`
fn signature_parameter(signature: &str) -> &str {
    regex_captures!(r"([A-Za-z_]\w*)\s*\)\s*(?:async\s*)?$", signature.trim_end())
        .map(|(_, name)| name)
        .unwrap_or(DART_DEFAULT_PARAMETER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::GridFunction;
    use lutgen_formula::FormulaValue;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Result<TableFunction> {
        parse_dart_source(source, Path::new("model.dart"))
    }

    #[test]
    fn test_minimal_body() {
        let f = parse("{ return input[0] + input[1] * 2; }").unwrap();
        assert_eq!(f.lambda().parameter(), "input");
        assert_eq!(
            f.evaluate(&[3.0, 4.0], &[]).unwrap(),
            FormulaValue::Number(11.0)
        );
        assert_eq!(f.source(), &FunctionSource::Dart("model.dart".into()));
    }

    #[test]
    fn test_full_function() {
        let source = "\
/// Body mass index
double bmi(List<double> values) {
  // weight / height^2
  return values[0] / ((values[1] / 100) * (values[1] / 100));
}
";
        let f = parse(source).unwrap();
        assert_eq!(f.lambda().parameter(), "values");
        assert_eq!(
            f.evaluate(&[100.0, 200.0], &[]).unwrap(),
            FormulaValue::Number(25.0)
        );
    }

    #[test]
    fn test_dart_operators() {
        let f = parse("int f(List<int> input) {\n  return input[0] > 10 ? input[0] ~/ 3 : input[1];\n}").unwrap();
        assert_eq!(f.evaluate(&[20.0, 1.0], &[]).unwrap(), FormulaValue::Number(6.0));
        assert_eq!(f.evaluate(&[5.0, 1.0], &[]).unwrap(), FormulaValue::Number(1.0));
    }

    #[test]
    fn test_missing_body() {
        let err = parse("double f(List<double> input) => input[0];").unwrap_err();
        assert_eq!(err.to_string(), "Could not find function body in model.dart");
    }

    #[test]
    fn test_missing_return() {
        let err = parse("void f(List<double> input) {\n  print(input);\n}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not find return statement in model.dart"
        );
    }

    #[test]
    fn test_unparsable_return() {
        let err = parse("{ return input.map((x) => x * 2).sum(); }").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_signature_parameter() {
        assert_eq!(signature_parameter("double f(List<double> input) "), "input");
        assert_eq!(signature_parameter("Future<double> g(final xs) async"), "xs");
        assert_eq!(signature_parameter("double f()"), DART_DEFAULT_PARAMETER);
        assert_eq!(signature_parameter(""), DART_DEFAULT_PARAMETER);
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.dart");
        fs::write(&path, "double f(List<double> input) {\n  return input[0] * input[1];\n}\n")
            .unwrap();

        let f = parse_dart_function(&path).unwrap();
        assert_eq!(f.evaluate(&[6.0, 7.0], &[]).unwrap(), FormulaValue::Number(42.0));
    }
}
