use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SignalError};
use crate::time_base::TimeBase;

/// Amplitude, frequency (Hz) and phase (radians) of a pure sinusoid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicParams {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
}

impl HarmonicParams {
    pub fn new(amplitude: f64, frequency: f64, phase: f64) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
        }
    }

    /// Zero is accepted and yields a flat (or constant) signal. Negative
    /// amplitude or frequency is rejected.
    pub fn validate(&self) -> Result<()> {
        if !self.amplitude.is_finite() || self.amplitude < 0.0 {
            return Err(SignalError::invalid(
                "amplitude",
                format!("must be finite and non-negative, got {}", self.amplitude),
            ));
        }
        if !self.frequency.is_finite() || self.frequency < 0.0 {
            return Err(SignalError::invalid(
                "frequency",
                format!("must be finite and non-negative, got {}", self.frequency),
            ));
        }
        if !self.phase.is_finite() {
            return Err(SignalError::invalid(
                "phase",
                format!("must be finite, got {}", self.phase),
            ));
        }
        Ok(())
    }

    /// Value of the sinusoid at time `t`.
    #[inline]
    pub fn value_at(&self, t: f64) -> f64 {
        self.amplitude * (TAU * self.frequency * t + self.phase).sin()
    }
}

impl Default for HarmonicParams {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            phase: 0.0,
        }
    }
}

/// `amplitude * sin(2π * frequency * t + phase)` for every sample of `time_base`.
pub fn synthesize_harmonic(time_base: &TimeBase, params: &HarmonicParams) -> Result<Vec<f64>> {
    params.validate()?;
    Ok(time_base
        .times()
        .iter()
        .map(|&t| params.value_at(t))
        .collect())
}
