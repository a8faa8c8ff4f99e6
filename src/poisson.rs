//! The Poisson probability mass function.

use crate::factorial::{LnFactorial, Lookup};

/// `P(X = k)` for `X ~ Poisson(lambda)`, evaluated as `exp(k ln λ − λ − ln k!)`.
#[inline]
pub fn univariate(k: usize, lambda: f64, factorial: &impl LnFactorial) -> f64 {
    debug_assert!(lambda >= 0.0 && lambda.is_finite(), "invalid rate {lambda}");
    if lambda == 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    f64::exp(k as f64 * lambda.ln() - lambda - factorial.ln(k))
}

/// The masses `P(X = k)` for every `k` in `0..cutoff`.
pub fn univariate_series(lambda: f64, cutoff: usize, factorial: &impl LnFactorial) -> Vec<f64> {
    (0..cutoff)
        .map(|k| univariate(k, lambda, factorial))
        .collect()
}

/// As [univariate_series], with a log-factorial table sized to the cutoff.
pub fn truncated(lambda: f64, cutoff: usize) -> Vec<f64> {
    univariate_series(lambda, cutoff, &Lookup::with_capacity(cutoff))
}
