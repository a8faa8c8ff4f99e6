//! Log-factorials. Goal counts in a scoregrid run well past 34, beyond which `n!` no longer
//! fits in a `u128`, so the Poisson mass is evaluated in log space.

pub trait LnFactorial {
    /// The natural logarithm of `n!`.
    fn ln(&self, n: usize) -> f64;
}

/// Sums `ln(i)` for `i` in `2..=n` on every call.
#[derive(Default)]
pub struct Calculator;

impl LnFactorial for Calculator {
    #[inline]
    fn ln(&self, n: usize) -> f64 {
        let mut sum = 0.0;
        for i in 2..=n {
            sum += (i as f64).ln();
        }
        sum
    }
}

/// Precomputed `ln(n!)` for `n` in `0..capacity`.
pub struct Lookup {
    entries: Vec<f64>,
}
impl Lookup {
    pub fn with_capacity(capacity: usize) -> Self {
        let mut entries = vec![0.0; capacity];
        for i in 2..capacity {
            entries[i] = entries[i - 1] + (i as f64).ln();
        }
        Self { entries }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }
}

impl LnFactorial for Lookup {
    #[inline]
    fn ln(&self, n: usize) -> f64 {
        assert!(
            n < self.entries.len(),
            "ln({n}!) is outside a lookup of capacity {}",
            self.entries.len()
        );
        self.entries[n]
    }
}
