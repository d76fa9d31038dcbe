//! Built-in math functions

pub mod math;

use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::{unqualified, FormulaValue};
use std::collections::HashMap;

/// Function implementation signature
pub type FunctionImpl = fn(&[FormulaValue]) -> FormulaResult<FormulaValue>;

/// Function definition
pub struct FunctionDef {
    /// Function name (lowercase)
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Implementation
    pub implementation: FunctionImpl,
}

impl FunctionDef {
    /// Check a call's argument count against this definition
    pub fn check_arity(&self, count: usize) -> FormulaResult<()> {
        if count < self.min_args {
            return Err(FormulaError::ArgumentCount {
                function: self.name.to_string(),
                expected: format!("at least {}", self.min_args),
                actual: count,
            });
        }

        if let Some(max) = self.max_args {
            if count > max {
                return Err(FormulaError::ArgumentCount {
                    function: self.name.to_string(),
                    expected: format!("at most {}", max),
                    actual: count,
                });
            }
        }

        Ok(())
    }
}

/// Function registry
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionDef>,
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRegistry {
    /// Create a new registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
        };

        registry.register_math_functions();

        registry
    }

    /// Look up a function by name (case-insensitive, `math.` prefix allowed)
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(&unqualified(name).to_lowercase())
    }

    /// Register a function
    pub fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name.to_lowercase(), def);
    }

    /// Names of all registered functions, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.values().map(|f| f.name).collect();
        names.sort_unstable();
        names
    }

    fn register_fixed(&mut self, name: &'static str, arity: usize, implementation: FunctionImpl) {
        self.register(FunctionDef {
            name,
            min_args: arity,
            max_args: Some(arity),
            implementation,
        });
    }

    fn register_math_functions(&mut self) {
        // Single-argument functions
        self.register_fixed("abs", 1, math::fn_abs);
        self.register_fixed("sqrt", 1, math::fn_sqrt);
        self.register_fixed("exp", 1, math::fn_exp);
        self.register_fixed("ln", 1, math::fn_ln);
        self.register_fixed("log10", 1, math::fn_log10);
        self.register_fixed("log2", 1, math::fn_log2);
        self.register_fixed("sin", 1, math::fn_sin);
        self.register_fixed("cos", 1, math::fn_cos);
        self.register_fixed("tan", 1, math::fn_tan);
        self.register_fixed("asin", 1, math::fn_asin);
        self.register_fixed("acos", 1, math::fn_acos);
        self.register_fixed("atan", 1, math::fn_atan);
        self.register_fixed("floor", 1, math::fn_floor);
        self.register_fixed("ceil", 1, math::fn_ceil);
        self.register_fixed("trunc", 1, math::fn_trunc);
        self.register_fixed("int", 1, math::fn_trunc);
        self.register_fixed("float", 1, math::fn_float);

        // Two-argument functions
        self.register_fixed("pow", 2, math::fn_pow);
        self.register_fixed("atan2", 2, math::fn_atan2);
        self.register_fixed("hypot", 2, math::fn_hypot);

        self.register_fixed("clamp", 3, math::fn_clamp);

        // LOG(x) is natural, LOG(x, base) uses the given base
        self.register(FunctionDef {
            name: "log",
            min_args: 1,
            max_args: Some(2),
            implementation: math::fn_log,
        });

        // ROUND(x) / ROUND(x, digits)
        self.register(FunctionDef {
            name: "round",
            min_args: 1,
            max_args: Some(2),
            implementation: math::fn_round,
        });

        self.register(FunctionDef {
            name: "min",
            min_args: 1,
            max_args: None,
            implementation: math::fn_min,
        });

        self.register(FunctionDef {
            name: "max",
            min_args: 1,
            max_args: None,
            implementation: math::fn_max,
        });
    }
}

/// Fetch argument `index` as a number
pub(crate) fn number_arg(args: &[FormulaValue], index: usize, function: &str) -> FormulaResult<f64> {
    let value = args.get(index).ok_or_else(|| {
        FormulaError::Argument(format!("{} is missing argument {}", function, index + 1))
    })?;

    value.as_number().ok_or_else(|| {
        FormulaError::Argument(format!(
            "{} expects a number for argument {}, got {}",
            function,
            index + 1,
            value.type_name()
        ))
    })
}
