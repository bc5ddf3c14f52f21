use serde::{Deserialize, Serialize};

use crate::squared_euclidean;

/// The standard Gaussian kernel,
/// K(x, y) = exp(-||x - y||^2 / (2 bandwidth^2)).
///
/// The bandwidth-dependent exponent coefficient and the normalizing constant
/// are precomputed at construction.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct GaussianKernel {
    bandwidth: f64,
    normalizer: f64,
    gamma: f64,
}

impl GaussianKernel {
    pub fn new(bandwidth: f64) -> Self {
        GaussianKernel {
            bandwidth,
            normalizer: bandwidth * (2.0 * std::f64::consts::PI).sqrt(),
            gamma: -0.5 / (bandwidth * bandwidth),
        }
    }

    /// K(a, b) for two points of equal dimensionality.
    pub fn evaluate(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());

        (self.gamma * squared_euclidean(a, b)).exp()
    }

    /// K(t) for a caller that already holds the point-to-point distance `t`.
    pub fn evaluate_scalar(&self, t: f64) -> f64 {
        (self.gamma * t * t).exp()
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn normalizer(&self) -> f64 {
        self.normalizer
    }
}

impl Default for GaussianKernel {
    /// Bandwidth 1.
    fn default() -> Self {
        GaussianKernel::new(1.0)
    }
}
