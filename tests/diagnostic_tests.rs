// Tests for error diagnostics: codes, labels and rendered reports.

mod common;

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme};
use prefix_expr::{parse_prefix, Expr, ParseError, Span};

fn parse_err(src: &str) -> ParseError {
    common::init_logging();
    parse_prefix(src).expect_err("input should be rejected")
}

fn render(err: &ParseError) -> String {
    let mut out = String::new();
    GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
        .with_width(120)
        .render_report(&mut out, err)
        .unwrap();
    out
}

#[test]
fn test_codes() {
    let cases = [
        ("", "prefix::empty_input"),
        ("()", "prefix::empty_expression"),
        ("(+ x", "prefix::bracket_mismatch"),
        ("(foo x)", "prefix::unacceptable_symbol"),
        ("(+ xy 1)", "prefix::wrong_variable"),
        ("(+ 1x 1)", "prefix::wrong_number"),
        ("(x)", "prefix::bare_brackets"),
        ("x y", "prefix::trailing_operands"),
        ("(+ 1-1 1)", "prefix::invalid_number"),
        ("(+ x)", "prefix::unexpected_end_of_input"),
    ];
    for (src, code) in cases {
        let err = parse_err(src);
        assert_eq!(err.code().map(|c| c.to_string()).as_deref(), Some(code), "for `{src}`");
        assert_eq!(err.kind.code(), code);
    }
}

#[test]
fn test_messages() {
    assert_eq!(parse_err("").to_string(), "empty input");
    assert_eq!(parse_err("(+ x").to_string(), "wrong bracket sequence");
    assert_eq!(parse_err("(+ x y) z").to_string(), "operands without operator");
    assert_eq!(
        parse_err("(max5 1 2)").to_string(),
        "unexpected end of input: `max5` expects 5 operands, found 2"
    );
}

#[test]
fn test_label_points_at_offending_text() {
    let err = parse_err("(+ x foo)");
    let labels: Vec<_> = err.labels().expect("parse errors carry a label").collect();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].offset(), 5);
    assert_eq!(labels[0].len(), 3);
    assert_eq!(labels[0].label(), Some("unacceptable symbol `foo`"));
}

#[test]
fn test_positions_are_byte_offsets() {
    let err = parse_err("(+ é x)");
    assert_eq!(err.position(), Some(3));
    assert_eq!(err.span, Span::new(3, 5));
    let label = err.labels().unwrap().next().unwrap();
    assert_eq!((label.offset(), label.len()), (3, "é".len()));
}

#[test]
fn test_zero_width_positions_get_a_visible_label() {
    let err = parse_err("(+ x)");
    let label = err.labels().unwrap().next().unwrap();
    assert_eq!(label.offset(), 4);
    assert_eq!(label.len(), 1);
}

#[test]
fn test_rendered_report() {
    let out = render(&parse_err("(foo x y)"));
    assert!(out.contains("prefix::unacceptable_symbol"), "{out}");
    assert!(out.contains("(foo x y)"), "{out}");
    assert!(out.contains("unacceptable symbol `foo`"), "{out}");
    assert!(out.contains("known operators"), "{out}");
}

#[test]
fn test_rendered_report_without_help() {
    let out = render(&parse_err("(+ x"));
    assert!(out.contains("prefix::bracket_mismatch"), "{out}");
    assert!(out.contains("wrong bracket sequence"), "{out}");
    assert!(!out.contains("help"), "{out}");
}

#[test]
fn test_converts_into_report() {
    fn load(src: &str) -> miette::Result<Expr> {
        Ok(parse_prefix(src)?)
    }
    assert!(load("(+ x 1)").is_ok());

    let report = load("(+ x 1) 2").unwrap_err();
    assert_eq!(report.to_string(), "operands without operator");
    assert_eq!(
        report.code().map(|c| c.to_string()).as_deref(),
        Some("prefix::trailing_operands")
    );
}

#[test]
fn test_custom_help() {
    let err = parse_err("(x)").with_help("write `x` instead");
    assert_eq!(err.help().map(|h| h.to_string()).as_deref(), Some("write `x` instead"));
}
