//! Position arithmetic over the immutable source text.
//!
//! A [`Cursor`] never moves by itself: every operation takes positions and
//! returns positions, so the parser threads its progress explicitly through
//! each recursive call. Positions are byte offsets; the grammar is ASCII, and
//! anything else is only ever read to be reported.

use crate::diagnostics::{to_error_source, ErrorKind, ErrorReporting, ParseError, SourceArc};
use crate::syntax::Span;

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    source: SourceArc,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            source: to_error_source(text),
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        self.text.as_bytes().get(pos).copied()
    }

    /// The character starting at `pos`, if `pos` is on a char boundary.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..)?.chars().next()
    }

    /// First position at or after `pos` that is not whitespace.
    pub fn skip_whitespace(&self, mut pos: usize) -> usize {
        while self.byte_at(pos).map_or(false, is_space) {
            pos += 1;
        }
        pos.min(self.len())
    }

    /// The maximal run starting at `pos`, and ending no later than `end`, of
    /// characters that are neither whitespace nor brackets.
    pub fn raw_token(&self, pos: usize, end: usize) -> &'a str {
        let Some(rest) = self.text.get(pos..end.min(self.len())) else {
            return "";
        };
        let stop = rest
            .find(|c: char| c.is_ascii() && (is_space(c as u8) || is_bracket(c as u8)))
            .unwrap_or(rest.len());
        &rest[..stop]
    }

    /// The maximal run of digits and `-` starting at `pos`.
    pub fn numeric_run(&self, pos: usize, end: usize) -> &'a str {
        let end = end.min(self.len());
        let mut stop = pos;
        while stop < end && self.byte_at(stop).map_or(false, |b| b.is_ascii_digit() || b == b'-') {
            stop += 1;
        }
        self.text.get(pos..stop).unwrap_or("")
    }
}

impl ErrorReporting for Cursor<'_> {
    fn report(&self, kind: ErrorKind, span: Span) -> ParseError {
        ParseError::new(kind, span).with_source(self.source.clone())
    }
}

pub fn is_space(b: u8) -> bool {
    b.is_ascii_whitespace()
}

pub fn is_bracket(b: u8) -> bool {
    b == b'(' || b == b')'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_whitespace_runs() {
        let cursor = Cursor::new("  (+ \t x)  ");
        assert_eq!(cursor.skip_whitespace(0), 2);
        assert_eq!(cursor.skip_whitespace(2), 2);
        assert_eq!(cursor.skip_whitespace(4), 7);
        assert_eq!(cursor.skip_whitespace(9), 11);
        assert_eq!(cursor.skip_whitespace(40), 11);
    }

    #[test]
    fn raw_token_stops_at_whitespace_and_brackets() {
        let cursor = Cursor::new("(negate(x)) max5 y");
        assert_eq!(cursor.raw_token(1, cursor.len()), "negate");
        assert_eq!(cursor.raw_token(0, cursor.len()), "");
        assert_eq!(cursor.raw_token(12, cursor.len()), "max5");
        assert_eq!(cursor.raw_token(12, 14), "ma");
        assert_eq!(cursor.raw_token(30, cursor.len()), "");
    }

    #[test]
    fn raw_token_and_whitespace_agree_on_separators() {
        let cursor = Cursor::new("max5\u{a0}y\u{2003}(x)");
        assert_eq!(cursor.raw_token(0, cursor.len()), "max5\u{a0}y\u{2003}");
        assert_eq!(cursor.skip_whitespace(4), 4);
    }

    #[test]
    fn numeric_run_takes_digits_and_minus() {
        let cursor = Cursor::new("-12-3x 7");
        assert_eq!(cursor.numeric_run(0, cursor.len()), "-12-3");
        assert_eq!(cursor.numeric_run(5, cursor.len()), "");
        assert_eq!(cursor.numeric_run(7, cursor.len()), "7");
    }

    #[test]
    fn peeks_characters() {
        let cursor = Cursor::new("é)");
        assert_eq!(cursor.char_at(0), Some('é'));
        assert_eq!(cursor.char_at(1), None);
        assert_eq!(cursor.byte_at(2), Some(b')'));
        assert_eq!(cursor.byte_at(3), None);
    }
}
