//! Gaussian noise source.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SignalError};
use crate::time_base::TimeBase;

/// Mean and variance of additive Gaussian noise.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseParams {
    pub mean: f64,
    pub variance: f64,
}

impl NoiseParams {
    pub fn new(mean: f64, variance: f64) -> Self {
        Self { mean, variance }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.mean.is_finite() {
            return Err(SignalError::invalid(
                "noise_mean",
                format!("must be finite, got {}", self.mean),
            ));
        }
        if !self.variance.is_finite() || self.variance < 0.0 {
            return Err(SignalError::invalid(
                "noise_variance",
                format!("must be finite and non-negative, got {}", self.variance),
            ));
        }
        Ok(())
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            mean: 0.0,
            variance: 0.1,
        }
    }
}

/// Seedable generator of Gaussian sequences.
///
/// Two sources built from the same seed produce identical draws.
pub struct NoiseSource {
    rng: StdRng,
}

impl NoiseSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// One sample per time point, `N(mean, sqrt(variance))`.
    pub fn generate(&mut self, time_base: &TimeBase, params: &NoiseParams) -> Result<Vec<f64>> {
        params.validate()?;

        if params.variance == 0.0 {
            return Ok(vec![params.mean; time_base.len()]);
        }

        let normal = Normal::new(params.mean, params.std_dev())
            .map_err(|e| SignalError::invalid("noise_variance", e.to_string()))?;
        let noise: Vec<f64> = (&mut self.rng)
            .sample_iter(normal)
            .take(time_base.len())
            .collect();

        debug!(
            "drew {} noise samples (mean={}, variance={})",
            noise.len(),
            params.mean,
            params.variance
        );
        Ok(noise)
    }

    /// Uniform draw from `[low, high)`, used for randomising parameters.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}
