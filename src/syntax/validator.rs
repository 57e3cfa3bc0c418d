//! # Validator Module
//!
//! The well-formedness rules the parser invokes at fixed points of the
//! descent. Each check is a pure function of the cursor and a few positions,
//! and either passes or returns the one error that ends the parse.
//!
//! ## Rules
//! - **Bracket balance**: checked once over the whole input, before descent.
//! - **Placeholder adjacency**: variables and numbers must be delimited by
//!   whitespace, brackets or the input boundary.
//! - **Bare brackets**: a lone value wrapped in its own bracket pair.
//! - **Unacceptable symbols**: characters and tokens outside the grammar.
//! - **Single expression**: nothing may follow a complete expression.

use crate::diagnostics::{ErrorKind, ErrorReporting, ParseError};
use crate::operators;
use crate::syntax::cursor::{is_bracket, is_space, Cursor};
use crate::syntax::Span;

/// A leaf token under adjacency validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder<'s> {
    Variable(char),
    Number(&'s str),
}

/// Strict bracket scan over the entire input.
pub fn check_bracket_sequence(cursor: &Cursor<'_>) -> Result<(), ParseError> {
    skip_brackets(cursor, 0, cursor.len(), true).map(|_| ())
}

/// Scans `[l, r)` counting bracket depth.
///
/// Non-strict scans stop as soon as the depth is back to zero after the
/// first character and return the index of that last scanned character: for
/// a scan starting on `(` this is its matching `)`. Strict scans cover the
/// whole range and return `r`.
///
/// An unmatched `)` fails at its own position; an unclosed `(` fails at the
/// outermost bracket left open.
pub fn skip_brackets(cursor: &Cursor<'_>, l: usize, r: usize, strict: bool) -> Result<usize, ParseError> {
    let r = r.min(cursor.len());
    let mut open = Vec::new();
    for pos in l..r {
        match cursor.byte_at(pos) {
            Some(b'(') => open.push(pos),
            Some(b')') => {
                if open.pop().is_none() {
                    return Err(cursor.bracket_mismatch(pos));
                }
            }
            _ => {}
        }
        if !strict && open.is_empty() {
            return Ok(pos);
        }
    }
    match open.first() {
        Some(&unclosed) => Err(cursor.bracket_mismatch(unclosed)),
        None => Ok(r),
    }
}

/// Only whitespace may remain in `[pos, end)`.
pub fn check_single(cursor: &Cursor<'_>, pos: usize, end: usize) -> Result<(), ParseError> {
    let rest = cursor.skip_whitespace(pos);
    if rest < end {
        return Err(cursor.trailing_operands(rest));
    }
    Ok(())
}

/// Checks the neighbours of the leaf occupying `[l, end)`, then rejects it if
/// it is the only thing between a pair of brackets.
pub fn check_placeholder(
    cursor: &Cursor<'_>,
    placeholder: Placeholder<'_>,
    l: usize,
    end: usize,
) -> Result<(), ParseError> {
    let before = l.checked_sub(1).and_then(|p| cursor.byte_at(p));
    let after = cursor.byte_at(end);

    let before_ok = match before {
        None => true,
        Some(b'-') => matches!(placeholder, Placeholder::Number(_)),
        Some(b) => is_delimiter(b),
    };
    let after_ok = after.map_or(true, is_delimiter);

    if !(before_ok && after_ok) {
        let kind = match placeholder {
            Placeholder::Variable(name) => ErrorKind::WrongVariable { name },
            Placeholder::Number(literal) => ErrorKind::WrongNumber {
                literal: literal.to_string(),
            },
        };
        return Err(cursor.report(kind, Span::new(l, end)));
    }
    check_bare_brackets(cursor, l, end)
}

/// A value directly enclosed by `(` and `)` with nothing else inside.
pub fn check_bare_brackets(cursor: &Cursor<'_>, l: usize, end: usize) -> Result<(), ParseError> {
    let before = l.checked_sub(1).and_then(|p| cursor.byte_at(p));
    if before == Some(b'(') && cursor.byte_at(end) == Some(b')') {
        return Err(cursor.report(ErrorKind::BareBrackets, Span::new(l - 1, end + 1)));
    }
    Ok(())
}

/// Rejects the character at `pos` unless it can start something the grammar
/// knows: a digit, a bracket, a variable, whitespace or a one-character
/// operator. Past the end of input there is nothing to reject.
pub fn check_unacceptable_symbols(cursor: &Cursor<'_>, pos: usize, end: usize) -> Result<(), ParseError> {
    match cursor.char_at(pos) {
        Some(c) if is_acceptable_start(c) => Ok(()),
        Some(_) => Err(unacceptable_symbol(cursor, pos, end)),
        None => Ok(()),
    }
}

/// Builds the error for whatever sits at `pos`. An alphabetic character is
/// reported together with the rest of its token; anything else on its own.
pub fn unacceptable_symbol(cursor: &Cursor<'_>, pos: usize, end: usize) -> ParseError {
    let Some(c) = cursor.char_at(pos) else {
        return cursor.unacceptable_symbol("", pos);
    };
    if c.is_alphabetic() {
        let token = cursor.raw_token(pos, end);
        if !token.is_empty() {
            return cursor.unacceptable_symbol(token, pos);
        }
    }
    let mut buf = [0u8; 4];
    cursor.unacceptable_symbol(c.encode_utf8(&mut buf), pos)
}

pub fn is_variable_char(b: u8) -> bool {
    matches!(b, b'x' | b'y' | b'z')
}

fn is_delimiter(b: u8) -> bool {
    is_space(b) || is_bracket(b)
}

fn is_acceptable_start(c: char) -> bool {
    c.is_ascii_digit()
        || c == '('
        || c == ')'
        || matches!(c, 'x' | 'y' | 'z')
        || c.is_ascii_whitespace()
        || operators::is_operator_char(c)
}
