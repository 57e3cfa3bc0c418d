//! # Operator Registry
//!
//! The fixed table of operators understood by the parser and the evaluator.
//! Every operator is a pure numeric function of a fixed arity; none of them
//! touch any state.
//!
//! ## Operators Provided
//!
//! - **Arithmetic**: `+`, `-`, `*`, `/`
//! - **Unary functions**: `negate`, `exp`, `atan`
//! - **Selection**: `min3`, `max5`
//!
//! The table is built once per process and never mutated. Lookup is an exact
//! string match on the raw token; there is no partial matching and no case
//! folding.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Pure operators: receive exactly `arity` already evaluated operands.
pub type PureOpFn = fn(args: &[f64]) -> f64;

/// Tag naming one registry entry.
///
/// An `Operation` node stores only this tag; arity, symbol and evaluation
/// function are resolved through the registry when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "negate")]
    Negate,
    #[serde(rename = "exp")]
    Exp,
    #[serde(rename = "atan")]
    ArcTan,
    #[serde(rename = "min3")]
    Min3,
    #[serde(rename = "max5")]
    Max5,
}

/// A single registry entry.
#[derive(Clone, Copy)]
pub struct OperatorDef {
    pub operator: Operator,
    pub symbol: &'static str,
    pub arity: usize,
    pub apply: PureOpFn,
}

impl fmt::Debug for OperatorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorDef")
            .field("symbol", &self.symbol)
            .field("arity", &self.arity)
            .finish()
    }
}

// ============================================================================
// OPERATOR IMPLEMENTATIONS
// ============================================================================

/// Adds two numbers.
///
/// Usage: (+ <a> <b>)
///
/// Example:
///   (+ 1 2) ; => 3
pub const OP_ADD: PureOpFn = |args| args[0] + args[1];

/// Subtracts two numbers.
///
/// Usage: (- <a> <b>)
///
/// Example:
///   (- 5 2) ; => 3
pub const OP_SUB: PureOpFn = |args| args[0] - args[1];

/// Multiplies two numbers.
///
/// Usage: (* <a> <b>)
///
/// Example:
///   (* 2 3) ; => 6
pub const OP_MUL: PureOpFn = |args| args[0] * args[1];

/// Divides two numbers.
///
/// Usage: (/ <a> <b>)
///
/// Example:
///   (/ 6 2) ; => 3
/// Note: division by zero yields an infinity or NaN, never an error.
pub const OP_DIV: PureOpFn = |args| args[0] / args[1];

/// Usage: (negate <a>)
pub const OP_NEGATE: PureOpFn = |args| -args[0];

/// Usage: (exp <a>) ; => e^a
pub const OP_EXP: PureOpFn = |args| args[0].exp();

/// Usage: (atan <a>) ; => arctan(a), in radians
pub const OP_ATAN: PureOpFn = |args| args[0].atan();

/// Smallest of three numbers.
///
/// Usage: (min3 <a> <b> <c>)
///
/// Example:
///   (min3 4 1 3) ; => 1
/// Note: any NaN operand makes the result NaN.
pub const OP_MIN3: PureOpFn = |args| select(args, f64::min);

/// Largest of five numbers.
///
/// Usage: (max5 <a> <b> <c> <d> <e>)
///
/// Example:
///   (max5 4 1 3 9 2) ; => 9
/// Note: any NaN operand makes the result NaN.
pub const OP_MAX5: PureOpFn = |args| select(args, f64::max);

/// Folds `args` with `pick`, propagating NaN. `f64::min` and `f64::max` on
/// their own drop a NaN operand.
fn select(args: &[f64], pick: fn(f64, f64) -> f64) -> f64 {
    if args.iter().any(|a| a.is_nan()) {
        return f64::NAN;
    }
    args.iter().copied().reduce(pick).unwrap_or(f64::NAN)
}

/// The standard table. Ordered by `Operator` discriminant so that
/// `Operator::def` is a plain index.
static STANDARD_OPERATORS: [OperatorDef; 9] = [
    OperatorDef { operator: Operator::Add, symbol: "+", arity: 2, apply: OP_ADD },
    OperatorDef { operator: Operator::Subtract, symbol: "-", arity: 2, apply: OP_SUB },
    OperatorDef { operator: Operator::Multiply, symbol: "*", arity: 2, apply: OP_MUL },
    OperatorDef { operator: Operator::Divide, symbol: "/", arity: 2, apply: OP_DIV },
    OperatorDef { operator: Operator::Negate, symbol: "negate", arity: 1, apply: OP_NEGATE },
    OperatorDef { operator: Operator::Exp, symbol: "exp", arity: 1, apply: OP_EXP },
    OperatorDef { operator: Operator::ArcTan, symbol: "atan", arity: 1, apply: OP_ATAN },
    OperatorDef { operator: Operator::Min3, symbol: "min3", arity: 3, apply: OP_MIN3 },
    OperatorDef { operator: Operator::Max5, symbol: "max5", arity: 5, apply: OP_MAX5 },
];

static STANDARD_REGISTRY: Lazy<OperatorRegistry> = Lazy::new(build_default_operator_registry);

// ============================================================================
// REGISTRY
// ============================================================================

/// Symbol-indexed view of the operator table.
#[derive(Debug, Default)]
pub struct OperatorRegistry {
    by_symbol: HashMap<&'static str, &'static OperatorDef>,
}

impl OperatorRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide standard registry.
    ///
    /// # Example
    /// ```rust
    /// use prefix_expr::operators::{Operator, OperatorRegistry};
    /// let def = OperatorRegistry::standard().lookup("max5").unwrap();
    /// assert_eq!(def.operator, Operator::Max5);
    /// assert_eq!(def.arity, 5);
    /// ```
    pub fn standard() -> &'static OperatorRegistry {
        &STANDARD_REGISTRY
    }

    pub fn register(&mut self, def: &'static OperatorDef) {
        self.by_symbol.insert(def.symbol, def);
    }

    /// Exact-match lookup of a raw token.
    pub fn lookup(&self, symbol: &str) -> Option<&'static OperatorDef> {
        self.by_symbol.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.by_symbol.contains_key(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static OperatorDef> + '_ {
        self.by_symbol.values().copied()
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }
}

/// Registers every standard operator.
pub fn register_std_operators(registry: &mut OperatorRegistry) {
    for def in STANDARD_OPERATORS.iter() {
        registry.register(def);
    }
}

/// Builds a registry holding the standard operators.
#[inline]
pub fn build_default_operator_registry() -> OperatorRegistry {
    let mut registry = OperatorRegistry::new();
    register_std_operators(&mut registry);
    registry
}

/// Looks a raw token up in the standard registry.
pub fn lookup(symbol: &str) -> Option<&'static OperatorDef> {
    OperatorRegistry::standard().lookup(symbol)
}

/// Whether `c` is, on its own, a complete operator symbol (`+ - * /`).
pub fn is_operator_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    OperatorRegistry::standard().contains(c.encode_utf8(&mut buf))
}

// ============================================================================
// OPERATOR ACCESSORS
// ============================================================================

impl Operator {
    pub fn def(self) -> &'static OperatorDef {
        &STANDARD_OPERATORS[self as usize]
    }

    pub fn symbol(self) -> &'static str {
        self.def().symbol
    }

    pub fn arity(self) -> usize {
        self.def().arity
    }

    /// Applies the operator to already evaluated operands.
    ///
    /// `args` must hold exactly `self.arity()` values.
    pub fn apply(self, args: &[f64]) -> f64 {
        debug_assert_eq!(args.len(), self.arity(), "operand count for `{}`", self.symbol());
        (self.def().apply)(args)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
