//! Prefix Parser - recursive descent over explicit position ranges
//!
//! Converts source text into a single [`Expr`]. Every step works on a range
//! `[l, r)` of the input and returns the position where it stopped; nothing
//! is stored between calls, so parses are independent of each other.
//!
//! Grammar, informally:
//!
//! ```text
//! expr     := "(" body ")" | body
//! body     := operator operand{arity} | operand
//! operand  := "(" body ")" | variable | number
//! variable := "x" | "y" | "z"
//! number   := "-"? digit+
//! ```

use log::{debug, trace};

use crate::ast::{Expr, Variable};
use crate::diagnostics::{ErrorKind, ErrorReporting, ParseError};
use crate::operators::{self, Operator};
use crate::syntax::cursor::Cursor;
use crate::syntax::validator::{self, Placeholder};
use crate::syntax::{ParseOptions, Span};

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses a prefix expression with the default [`ParseOptions`].
///
/// # Example
/// ```rust
/// use prefix_expr::parse_prefix;
/// let expr = parse_prefix("(* (+ x 1) (- y 2))").unwrap();
/// assert_eq!(expr.evaluate(3.0, 5.0, 0.0), 12.0);
/// ```
pub fn parse_prefix(text: &str) -> Result<Expr, ParseError> {
    parse_prefix_with(text, &ParseOptions::default())
}

/// Parses a prefix expression. Succeeds only if the whole input is exactly
/// one well-formed expression.
pub fn parse_prefix_with(text: &str, options: &ParseOptions) -> Result<Expr, ParseError> {
    debug!("parsing {:?}", text);
    let parser = Parser {
        cursor: Cursor::new(text),
        options,
    };
    parser.parse().map_err(|err| {
        debug!("parse of {:?} failed: {}", text, err);
        err
    })
}

// ============================================================================
// PARSER
// ============================================================================

struct Parser<'a, 'o> {
    cursor: Cursor<'a>,
    options: &'o ParseOptions,
}

impl Parser<'_, '_> {
    fn parse(&self) -> Result<Expr, ParseError> {
        if self.cursor.is_empty() {
            return Err(self.cursor.report(ErrorKind::EmptyInput, Span::default()));
        }
        validator::check_bracket_sequence(&self.cursor)?;
        self.parse_range(0, self.cursor.len(), 0)
    }

    /// Parses `[l, r)` as one expression: an optional bracket pair around
    /// either an operator application or a single operand.
    fn parse_range(&self, l: usize, r: usize, depth: usize) -> Result<Expr, ParseError> {
        if depth > self.options.max_depth {
            return Err(self.cursor.report(
                ErrorKind::DepthLimitExceeded {
                    limit: self.options.max_depth,
                },
                Span::at(l),
            ));
        }

        let (start, end) = if self.cursor.byte_at(l) == Some(b'(') {
            let close = validator::skip_brackets(&self.cursor, l, r, false)?;
            validator::check_single(&self.cursor, close + 1, r)?;
            (l + 1, close)
        } else {
            (l, r)
        };

        let pos = self.cursor.skip_whitespace(start);
        let token = self.cursor.raw_token(pos, end);

        let Some(def) = operators::lookup(token) else {
            validator::check_unacceptable_symbols(&self.cursor, pos, end)?;
            let (operand, next) = self.get_arg(pos, end, depth, None, 0)?;
            validator::check_single(&self.cursor, next, end)?;
            return Ok(operand);
        };

        trace!("operator `{}` at {}", def.symbol, pos);
        let mut next = self.cursor.skip_whitespace(pos + token.len());
        let mut operands = Vec::with_capacity(def.arity);
        for _ in 0..def.arity {
            let (operand, after) = self.get_arg(next, end, depth, Some(def.operator), operands.len())?;
            operands.push(operand);
            next = after;
        }
        validator::check_single(&self.cursor, next, end)?;

        Ok(Expr::Operation {
            operator: def.operator,
            operands,
        })
    }

    /// Reads one operand starting at `l`, returning it with the position
    /// just past it and any trailing whitespace.
    fn get_arg(
        &self,
        l: usize,
        end: usize,
        depth: usize,
        operator: Option<Operator>,
        found: usize,
    ) -> Result<(Expr, usize), ParseError> {
        let pos = self.cursor.skip_whitespace(l);
        let current = self.cursor.byte_at(pos).filter(|_| pos < end);

        match current {
            None | Some(b')') => Err(self.missing_operand(operator, found, pos)),

            Some(b'(') => {
                let close = validator::skip_brackets(&self.cursor, pos, end, false)?;
                let operand = self.parse_range(pos, close + 1, depth + 1)?;
                Ok((operand, self.cursor.skip_whitespace(close + 1)))
            }

            Some(b) if validator::is_variable_char(b) => {
                let name = char::from(b);
                validator::check_placeholder(&self.cursor, Placeholder::Variable(name), pos, pos + 1)?;
                let variable = Variable::from_name(name)
                    .ok_or_else(|| validator::unacceptable_symbol(&self.cursor, pos, end))?;
                trace!("variable `{}` at {}", name, pos);
                Ok((Expr::Variable(variable), self.cursor.skip_whitespace(pos + 1)))
            }

            Some(b) if b.is_ascii_digit() || b == b'-' => {
                let literal = self.cursor.numeric_run(pos, end);
                let stop = pos + literal.len();
                validator::check_placeholder(&self.cursor, Placeholder::Number(literal), pos, stop)?;
                let value = self.parse_literal(literal, pos)?;
                trace!("constant {} at {}", value, pos);
                Ok((Expr::Constant(value), self.cursor.skip_whitespace(stop)))
            }

            Some(_) => Err(validator::unacceptable_symbol(&self.cursor, pos, end)),
        }
    }

    /// Accepts `-?[0-9]+` within the range of `i64`.
    fn parse_literal(&self, literal: &str, pos: usize) -> Result<i64, ParseError> {
        let digits = literal.strip_prefix('-').unwrap_or(literal);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.cursor.invalid_number(literal, pos));
        }
        literal
            .parse::<i64>()
            .map_err(|_| self.cursor.invalid_number(literal, pos))
    }

    fn missing_operand(&self, operator: Option<Operator>, found: usize, pos: usize) -> ParseError {
        match operator {
            Some(op) => self.cursor.unexpected_end(op.symbol(), op.arity(), found, pos),
            None => self.cursor.report(ErrorKind::EmptyExpression, Span::at(pos)),
        }
    }
}
