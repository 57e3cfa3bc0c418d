//! AST module for prefix expressions
//!
//! This module provides the expression tree produced by the parser, its
//! evaluator and its two printed forms.

// ============================================================================
// IMPORTS
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::diagnostics::{ErrorKind, ParseError};
use crate::operators::Operator;
use crate::syntax::{parse_prefix, Span};

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// One of the three inputs an expression can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variable {
    X,
    Y,
    Z,
}

/// The expression tree.
///
/// Operands are owned by their operation; trees are never shared or cyclic.
///
/// # Examples
///
/// ```rust
/// use prefix_expr::ast::{Expr, Variable};
/// use prefix_expr::operators::Operator;
/// let expr = Expr::operation(
///     Operator::Add,
///     vec![Expr::variable(Variable::X), Expr::constant(1)],
/// ).unwrap();
/// assert_eq!(expr.prefix(), "(+ x 1)");
/// assert_eq!(expr.to_string(), "x 1 +");
/// assert_eq!(expr.evaluate(2.0, 0.0, 0.0), 3.0);
/// ```
///
/// Deserialization goes through [`Expr::operation`], so a decoded tree has
/// the same arity guarantee as a parsed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawExpr")]
pub enum Expr {
    Operation {
        operator: Operator,
        operands: Vec<Expr>,
    },
    Variable(Variable),
    Constant(i64),
}

/// Unchecked wire shape of [`Expr`].
#[derive(Deserialize)]
enum RawExpr {
    Operation {
        operator: Operator,
        operands: Vec<Expr>,
    },
    Variable(Variable),
    Constant(i64),
}

impl TryFrom<RawExpr> for Expr {
    type Error = ParseError;

    fn try_from(raw: RawExpr) -> Result<Self, Self::Error> {
        match raw {
            RawExpr::Operation { operator, operands } => Expr::operation(operator, operands),
            RawExpr::Variable(variable) => Ok(Expr::Variable(variable)),
            RawExpr::Constant(value) => Ok(Expr::Constant(value)),
        }
    }
}

/// Receives every node's value during evaluation, in post-order.
pub trait EvalObserver {
    fn observe(&mut self, expr: &Expr, value: f64);
}

impl<F> EvalObserver for F
where
    F: FnMut(&Expr, f64),
{
    fn observe(&mut self, expr: &Expr, value: f64) {
        self(expr, value)
    }
}

// ============================================================================
// PUBLIC API IMPLEMENTATION
// ============================================================================

impl Variable {
    pub fn from_name(name: char) -> Option<Self> {
        match name {
            'x' => Some(Variable::X),
            'y' => Some(Variable::Y),
            'z' => Some(Variable::Z),
            _ => None,
        }
    }

    pub fn name(self) -> char {
        match self {
            Variable::X => 'x',
            Variable::Y => 'y',
            Variable::Z => 'z',
        }
    }

    /// Position of this variable among the evaluation inputs.
    pub fn index(self) -> usize {
        match self {
            Variable::X => 0,
            Variable::Y => 1,
            Variable::Z => 2,
        }
    }
}

impl Expr {
    pub fn variable(variable: Variable) -> Self {
        Expr::Variable(variable)
    }

    pub fn constant(value: i64) -> Self {
        Expr::Constant(value)
    }

    /// Builds an operation, checking the operand count against the
    /// operator's arity.
    pub fn operation(operator: Operator, operands: Vec<Expr>) -> Result<Self, ParseError> {
        if operands.len() != operator.arity() {
            return Err(ParseError::new(
                ErrorKind::ArityMismatch {
                    operator: operator.symbol().to_string(),
                    expected: operator.arity(),
                    found: operands.len(),
                },
                Span::default(),
            ));
        }
        Ok(Expr::Operation { operator, operands })
    }

    pub fn operator(&self) -> Option<Operator> {
        match self {
            Expr::Operation { operator, .. } => Some(*operator),
            _ => None,
        }
    }

    /// Operands of an operation; empty for leaves.
    pub fn operands(&self) -> &[Expr] {
        match self {
            Expr::Operation { operands, .. } => operands,
            _ => &[],
        }
    }

    /// Evaluates the expression with `x`, `y` and `z` bound to the given
    /// values.
    ///
    /// Every operand is evaluated, left to right, before its operator is
    /// applied; nothing short-circuits.
    pub fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        self.evaluate_observed([x, y, z], &mut |_: &Expr, _: f64| {})
    }

    /// Like [`evaluate`](Self::evaluate), reporting each node's value to
    /// `observer` as soon as it is known.
    ///
    /// ```rust
    /// use prefix_expr::{parse_prefix, Expr};
    /// let expr = parse_prefix("(max5 x 1 y 2 z)").unwrap();
    /// let mut seen = Vec::new();
    /// let max = expr.evaluate_observed([7.0, 8.0, 9.0], &mut |_: &Expr, v: f64| seen.push(v));
    /// assert_eq!(max, 9.0);
    /// assert_eq!(seen, [7.0, 1.0, 8.0, 2.0, 9.0, 9.0]);
    /// ```
    pub fn evaluate_observed<O>(&self, inputs: [f64; 3], observer: &mut O) -> f64
    where
        O: EvalObserver + ?Sized,
    {
        let value = match self {
            Expr::Constant(value) => *value as f64,
            Expr::Variable(variable) => inputs[variable.index()],
            Expr::Operation { operator, operands } => {
                let args: Vec<f64> = operands
                    .iter()
                    .map(|operand| operand.evaluate_observed(inputs, &mut *observer))
                    .collect();
                operator.apply(&args)
            }
        };
        observer.observe(self, value);
        value
    }

    /// Canonical, fully parenthesized form; parses back to an equal tree.
    pub fn prefix(&self) -> String {
        match self {
            Expr::Operation { operator, operands } => {
                let mut s = format!("({}", operator.symbol());
                for operand in operands {
                    s.push(' ');
                    s.push_str(&operand.prefix());
                }
                s.push(')');
                s
            }
            Expr::Variable(variable) => variable.name().to_string(),
            Expr::Constant(value) => value.to_string(),
        }
    }

    /// Operands first, operator last, space separated. Informational only:
    /// the parser does not read this form.
    pub fn postfix(&self) -> String {
        match self {
            Expr::Operation { operator, operands } => {
                let mut parts: Vec<String> = operands.iter().map(Expr::postfix).collect();
                parts.push(operator.symbol().to_string());
                parts.join(" ")
            }
            leaf => leaf.prefix(),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.postfix())
    }
}

impl FromStr for Expr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_prefix(s)
    }
}
