// Property tests: printed prefix form parses back to the same tree.

mod common;

use proptest::prelude::*;
use serde_json::json;

use prefix_expr::{parse_prefix, Expr, Operator, Variable};

fn arb_operator() -> impl Strategy<Value = Operator> {
    prop::sample::select(vec![
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Negate,
        Operator::Exp,
        Operator::ArcTan,
        Operator::Min3,
        Operator::Max5,
    ])
}

fn arb_leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        prop::sample::select(vec![Variable::X, Variable::Y, Variable::Z]).prop_map(Expr::Variable),
        any::<i64>().prop_map(Expr::Constant),
        (-20i64..20).prop_map(Expr::Constant),
    ]
}

fn arb_expr() -> impl Strategy<Value = Expr> {
    arb_leaf().prop_recursive(5, 48, 5, |inner| {
        (arb_operator(), prop::collection::vec(inner, 5)).prop_map(|(operator, mut operands)| {
            operands.truncate(operator.arity());
            Expr::Operation { operator, operands }
        })
    })
}

proptest! {
    #[test]
    fn prefix_parses_back(expr in arb_expr()) {
        let printed = expr.prefix();
        let parsed = parse_prefix(&printed).unwrap();
        prop_assert_eq!(&parsed, &expr);
        prop_assert!(common::agree_on_samples(&parsed, &expr));
    }

    #[test]
    fn prefix_is_a_fixed_point(expr in arb_expr()) {
        let once = parse_prefix(&expr.prefix()).unwrap().prefix();
        let twice = parse_prefix(&once).unwrap().prefix();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn extra_whitespace_is_ignored(expr in arb_expr(), pad in "[ \t\n]{1,3}") {
        let spaced = format!("{pad}{}{pad}", expr.prefix().replace(' ', &pad));
        prop_assert_eq!(parse_prefix(&spaced).unwrap(), expr);
    }

    #[test]
    fn extra_brackets_around_operations_are_ignored(expr in arb_expr()) {
        prop_assume!(expr.operator().is_some());
        let wrapped = format!("({})", expr.prefix());
        prop_assert_eq!(parse_prefix(&wrapped).unwrap(), expr);
    }

    #[test]
    fn serde_round_trip(expr in arb_expr()) {
        let encoded = serde_json::to_string(&expr).unwrap();
        let decoded: Expr = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded, expr);
    }
}

#[test]
fn test_serialized_shape() {
    let expr = parse_prefix("(max5 x -1 (negate y) z 2)").unwrap();
    assert_eq!(
        serde_json::to_value(&expr).unwrap(),
        json!({
            "Operation": {
                "operator": "max5",
                "operands": [
                    { "Variable": "x" },
                    { "Constant": -1 },
                    { "Operation": { "operator": "negate", "operands": [{ "Variable": "y" }] } },
                    { "Variable": "z" },
                    { "Constant": 2 }
                ]
            }
        })
    );
}

#[test]
fn test_deserialization_checks_arity() {
    let err = serde_json::from_str::<Expr>(r#"{"Operation":{"operator":"+","operands":[]}}"#)
        .unwrap_err();
    assert!(err.to_string().contains("`+` expects 2 operands, got 0"), "{err}");

    let nested = r#"{"Operation":{"operator":"exp","operands":[
        {"Operation":{"operator":"negate","operands":[{"Variable":"x"},{"Variable":"y"}]}}
    ]}}"#;
    assert!(serde_json::from_str::<Expr>(nested).is_err());

    let ok = r#"{"Operation":{"operator":"negate","operands":[{"Variable":"x"}]}}"#;
    let expr: Expr = serde_json::from_str(ok).unwrap();
    assert_eq!(expr.evaluate(2.0, 0.0, 0.0), -2.0);
    assert_eq!(parse_prefix(&expr.prefix()).unwrap(), expr);
}

#[test]
fn test_postfix_is_not_parsed_back() {
    let expr = parse_prefix("(+ x (* 2 y))").unwrap();
    assert_eq!(expr.to_string(), "x 2 y * +");
    assert!(parse_prefix(&expr.to_string()).is_err());
}
