//! Shared helpers for the integration tests.

#![allow(dead_code)]

use prefix_expr::Expr;

/// Input triples every round-trip comparison is checked at.
pub const SAMPLE_INPUTS: [[f64; 3]; 6] = [
    [0.0, 0.0, 0.0],
    [1.0, 2.0, 3.0],
    [-1.5, 0.25, 7.0],
    [10.0, -10.0, 0.5],
    [1e6, -3.0, 2.0],
    [-0.0, 100.0, -100.0],
];

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Equal values, treating two NaNs as equal.
pub fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

pub fn agree_on_samples(a: &Expr, b: &Expr) -> bool {
    SAMPLE_INPUTS.iter().all(|&[x, y, z]| {
        same_value(a.evaluate(x, y, z), b.evaluate(x, y, z))
    })
}
