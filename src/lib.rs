//! Prefix-notation arithmetic expressions.
//!
//! ```rust
//! use prefix_expr::parse_prefix;
//!
//! let expr = parse_prefix("(+ x (* 2 y))").unwrap();
//! assert_eq!(expr.evaluate(1.0, 3.0, 0.0), 7.0);
//! assert_eq!(expr.prefix(), "(+ x (* 2 y))");
//! assert_eq!(expr.to_string(), "x 2 y * +");
//! ```

pub use crate::ast::{EvalObserver, Expr, Variable};
pub use crate::diagnostics::{ErrorKind, ParseError};
pub use crate::operators::Operator;
pub use crate::syntax::{parse_prefix, parse_prefix_with, ParseOptions, Span};

pub mod ast;
pub mod diagnostics;
pub mod operators;
pub mod syntax;
