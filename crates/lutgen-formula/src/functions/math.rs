//! Math functions

use super::number_arg;
use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::FormulaValue;

fn unary(args: &[FormulaValue], name: &str, f: fn(f64) -> f64) -> FormulaResult<FormulaValue> {
    Ok(FormulaValue::Number(f(number_arg(args, 0, name)?)))
}

/// ABS function
pub fn fn_abs(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    unary(args, "abs", f64::abs)
}

/// SQRT function
pub fn fn_sqrt(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    unary(args, "sqrt", f64::sqrt)
}

/// EXP function
pub fn fn_exp(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    unary(args, "exp", f64::exp)
}

/// LN function
pub fn fn_ln(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    unary(args, "ln", f64::ln)
}

/// LOG function: natural log, or log in the given base
pub fn fn_log(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    let x = number_arg(args, 0, "log")?;
    if args.len() > 1 {
        let base = number_arg(args, 1, "log")?;
        if base <= 0.0 || base == 1.0 {
            return Err(FormulaError::Argument(format!("log base {} is invalid", base)));
        }
        Ok(FormulaValue::Number(x.ln() / base.ln()))
    } else {
        Ok(FormulaValue::Number(x.ln()))
    }
}

/// LOG10 function
pub fn fn_log10(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    unary(args, "log10", f64::log10)
}

/// LOG2 function
pub fn fn_log2(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    unary(args, "log2", f64::log2)
}

/// SIN function
pub fn fn_sin(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    unary(args, "sin", f64::sin)
}

/// COS function
pub fn fn_cos(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    unary(args, "cos", f64::cos)
}

/// TAN function
pub fn fn_tan(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    unary(args, "tan", f64::tan)
}

/// ASIN function
pub fn fn_asin(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    unary(args, "asin", f64::asin)
}

/// ACOS function
pub fn fn_acos(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    unary(args, "acos", f64::acos)
}

/// ATAN function
pub fn fn_atan(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    unary(args, "atan", f64::atan)
}

/// FLOOR function
pub fn fn_floor(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    unary(args, "floor", f64::floor)
}

/// CEIL function
pub fn fn_ceil(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    unary(args, "ceil", f64::ceil)
}

/// TRUNC / INT function
pub fn fn_trunc(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    unary(args, "trunc", f64::trunc)
}

/// FLOAT function (numeric coercion, booleans become 0/1)
pub fn fn_float(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    Ok(FormulaValue::Number(number_arg(args, 0, "float")?))
}

/// POW function
pub fn fn_pow(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    let base = number_arg(args, 0, "pow")?;
    let exponent = number_arg(args, 1, "pow")?;
    Ok(FormulaValue::Number(base.powf(exponent)))
}

/// ATAN2 function (y, x)
pub fn fn_atan2(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    let y = number_arg(args, 0, "atan2")?;
    let x = number_arg(args, 1, "atan2")?;
    Ok(FormulaValue::Number(y.atan2(x)))
}

/// HYPOT function
pub fn fn_hypot(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    let x = number_arg(args, 0, "hypot")?;
    let y = number_arg(args, 1, "hypot")?;
    Ok(FormulaValue::Number(x.hypot(y)))
}

/// CLAMP function (value, low, high)
pub fn fn_clamp(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    let value = number_arg(args, 0, "clamp")?;
    let low = number_arg(args, 1, "clamp")?;
    let high = number_arg(args, 2, "clamp")?;
    if low > high {
        return Err(FormulaError::Argument(format!(
            "clamp bounds are reversed: {} > {}",
            low, high
        )));
    }
    Ok(FormulaValue::Number(value.max(low).min(high)))
}

/// ROUND function
///
/// Ties round to the nearest even digit, so `round(2.5)` is 2 and
/// `round(3.5)` is 4.
pub fn fn_round(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    let x = number_arg(args, 0, "round")?;
    let digits = if args.len() > 1 {
        number_arg(args, 1, "round")?.trunc() as i32
    } else {
        0
    };

    let factor = 10f64.powi(digits);
    Ok(FormulaValue::Number(round_half_even(x * factor) / factor))
}

fn round_half_even(x: f64) -> f64 {
    let rounded = x.round();
    if (x - x.trunc()).abs() == 0.5 {
        2.0 * (x / 2.0).round()
    } else {
        rounded
    }
}

/// MIN function
pub fn fn_min(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    fold(args, "min", f64::min)
}

/// MAX function
pub fn fn_max(args: &[FormulaValue]) -> FormulaResult<FormulaValue> {
    fold(args, "max", f64::max)
}

fn fold(args: &[FormulaValue], name: &str, f: fn(f64, f64) -> f64) -> FormulaResult<FormulaValue> {
    let mut acc = number_arg(args, 0, name)?;
    for i in 1..args.len() {
        acc = f(acc, number_arg(args, i, name)?);
    }
    Ok(FormulaValue::Number(acc))
}
