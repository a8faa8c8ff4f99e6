//! Testing helpers.

use assert_float_eq::*;

/// Elementwise relative comparison; exactly equal elements (including zeros) always pass.
pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (&expected, &actual) in expected.iter().zip(actual) {
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

pub fn assert_probability(prob: f64) {
    assert!(
        prob.is_finite() && (0.0..=1.0).contains(&prob),
        "{prob} is not a probability"
    );
}
