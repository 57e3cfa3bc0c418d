//! # Parse Diagnostics
//!
//! The single error type of the crate. Every failure aborts the parse and
//! comes back as a [`ParseError`]: what went wrong ([`ErrorKind`]), where
//! ([`Span`]), and the source text it refers to, so that `miette` can render
//! an annotated snippet.
//!
//! Errors are never built by hand outside this module; the parser goes
//! through [`ErrorReporting`], which the cursor implements.
//!
//! ```rust
//! use prefix_expr::{parse_prefix, ErrorKind};
//! let err = parse_prefix("(+ x").unwrap_err();
//! assert_eq!(err.kind, ErrorKind::BracketMismatch);
//! assert_eq!(err.position(), Some(0));
//! ```

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::syntax::Span;

pub type SourceArc = Arc<NamedSource<String>>;

/// Name given to the source in rendered reports.
const SOURCE_NAME: &str = "expression";

// ============================================================================
// ERROR KINDS
// ============================================================================

/// All the ways a parse can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("empty input")]
    EmptyInput,

    #[error("empty expression")]
    EmptyExpression,

    #[error("wrong bracket sequence")]
    BracketMismatch,

    #[error("unacceptable symbol `{symbol}`")]
    UnacceptableSymbol { symbol: String },

    #[error("wrong variable `{name}`")]
    WrongVariable { name: char },

    #[error("wrong number `{literal}`")]
    WrongNumber { literal: String },

    #[error("bare brackets around a single value")]
    BareBrackets,

    #[error("operands without operator")]
    TrailingOperands,

    #[error("invalid number literal `{literal}`")]
    InvalidNumber { literal: String },

    #[error("unexpected end of input: `{operator}` expects {expected} operands, found {found}")]
    UnexpectedEndOfInput {
        operator: String,
        expected: usize,
        found: usize,
    },

    #[error("expression nested deeper than {limit} levels")]
    DepthLimitExceeded { limit: usize },

    #[error("`{operator}` expects {expected} operands, got {found}")]
    ArityMismatch {
        operator: String,
        expected: usize,
        found: usize,
    },
}

impl ErrorKind {
    /// Stable machine-readable code, also used as the miette diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::EmptyInput => "prefix::empty_input",
            ErrorKind::EmptyExpression => "prefix::empty_expression",
            ErrorKind::BracketMismatch => "prefix::bracket_mismatch",
            ErrorKind::UnacceptableSymbol { .. } => "prefix::unacceptable_symbol",
            ErrorKind::WrongVariable { .. } => "prefix::wrong_variable",
            ErrorKind::WrongNumber { .. } => "prefix::wrong_number",
            ErrorKind::BareBrackets => "prefix::bare_brackets",
            ErrorKind::TrailingOperands => "prefix::trailing_operands",
            ErrorKind::InvalidNumber { .. } => "prefix::invalid_number",
            ErrorKind::UnexpectedEndOfInput { .. } => "prefix::unexpected_end_of_input",
            ErrorKind::DepthLimitExceeded { .. } => "prefix::depth_limit_exceeded",
            ErrorKind::ArityMismatch { .. } => "prefix::arity_mismatch",
        }
    }

    fn default_help(&self) -> Option<String> {
        match self {
            ErrorKind::BareBrackets => Some("remove the brackets around the value".into()),
            ErrorKind::TrailingOperands => {
                Some("an expression must consist of exactly one value or operator application".into())
            }
            ErrorKind::WrongVariable { .. } | ErrorKind::WrongNumber { .. } => {
                Some("separate values with whitespace or brackets".into())
            }
            ErrorKind::UnacceptableSymbol { .. } => Some(
                "known operators are + - * / negate exp atan min3 max5; variables are x, y and z"
                    .into(),
            ),
            _ => None,
        }
    }
}

// ============================================================================
// THE ERROR TYPE
// ============================================================================

/// A failed parse: the kind, its location, and the source it refers to.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub span: Span,
    source_code: Option<SourceArc>,
    help: Option<String>,
}

impl ParseError {
    /// An error with no source attached.
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        let help = kind.default_help();
        Self {
            kind,
            span,
            source_code: None,
            help,
        }
    }

    pub fn with_source(mut self, source: SourceArc) -> Self {
        self.source_code = Some(source);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Byte offset the error points at, if it refers to the input at all.
    ///
    /// This is a byte offset into the input, not a character index. Both
    /// agree up to the first non-ASCII character, and any such character is
    /// itself rejected, so they only differ inside the offending token.
    pub fn position(&self) -> Option<usize> {
        match self.kind {
            ErrorKind::EmptyInput | ErrorKind::ArityMismatch { .. } => None,
            _ => Some(self.span.start),
        }
    }
}

impl PartialEq for ParseError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.span == other.span
    }
}

impl Diagnostic for ParseError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.source_code
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.source_code.as_ref()?;
        let len = self.span.len().max(1);
        let label = LabeledSpan::new(Some(self.kind.to_string()), self.span.start, len);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Wraps input text for use in error reports.
pub fn to_error_source<S: AsRef<str>>(source: S) -> SourceArc {
    Arc::new(NamedSource::new(SOURCE_NAME, source.as_ref().to_string()))
}

// ============================================================================
// CONTEXT-AWARE CONSTRUCTION
// ============================================================================

/// Context-aware error creation: implementors know the source, callers only
/// provide the kind and the span.
pub trait ErrorReporting {
    fn report(&self, kind: ErrorKind, span: Span) -> ParseError;

    fn bracket_mismatch(&self, pos: usize) -> ParseError {
        self.report(ErrorKind::BracketMismatch, Span::new(pos, pos + 1))
    }

    fn unacceptable_symbol(&self, symbol: &str, pos: usize) -> ParseError {
        self.report(
            ErrorKind::UnacceptableSymbol {
                symbol: symbol.into(),
            },
            Span::new(pos, pos + symbol.len()),
        )
    }

    fn trailing_operands(&self, pos: usize) -> ParseError {
        self.report(ErrorKind::TrailingOperands, Span::new(pos, pos + 1))
    }

    fn invalid_number(&self, literal: &str, pos: usize) -> ParseError {
        self.report(
            ErrorKind::InvalidNumber {
                literal: literal.into(),
            },
            Span::new(pos, pos + literal.len()),
        )
    }

    fn unexpected_end(&self, operator: &str, expected: usize, found: usize, pos: usize) -> ParseError {
        self.report(
            ErrorKind::UnexpectedEndOfInput {
                operator: operator.into(),
                expected,
                found,
            },
            Span::at(pos),
        )
    }
}
