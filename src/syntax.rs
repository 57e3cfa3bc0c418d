//! Syntax module for prefix expressions
//!
//! Turns source text into an [`Expr`](crate::ast::Expr). The work is split
//! between three submodules:
//!
//! - [`cursor`]: pure position arithmetic over the immutable source text
//! - [`validator`]: the well-formedness rules, each reporting a structured error
//! - [`parser`]: the recursive descent that ties the two together
//!
//! All position state is passed explicitly from call to call, so parsing is
//! reentrant and two parses never share anything but the operator table.

use miette::SourceSpan;
use serde::{Deserialize, Serialize};

pub mod cursor;
pub mod parser;
pub mod validator;

pub use cursor::Cursor;
pub use parser::{parse_prefix, parse_prefix_with};

/// Default recursion limit for [`ParseOptions`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Represents a span in the source code, as byte offsets.
///
/// # Examples
///
/// ```rust
/// use prefix_expr::syntax::Span;
/// let span = Span { start: 0, end: 5 };
/// assert_eq!(span.len(), 5);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-width span at `pos`.
    pub fn at(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.len())
    }
}

/// Tunables for a single parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest bracket nesting accepted before parsing gives up with
    /// `DepthLimitExceeded`.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
