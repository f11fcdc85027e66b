//! Session configuration: time base, initial parameters, slider ranges and
//! the noise regeneration policy.

use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::{HarmonicParams, NoiseParams};
use crate::error::{Result, SignalError};
use crate::pipeline::FilterParams;
use crate::time_base::{TimeBase, DEFAULT_END, DEFAULT_SAMPLES, DEFAULT_START};

/// Closed interval a parameter is kept in, with the increment a UI uses to
/// nudge it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Pull `value` into the range. NaN maps to the lower bound, and bounds
    /// given in the wrong order are swapped rather than trusted.
    pub fn clamp(&self, value: f64) -> f64 {
        let lo = self.min.min(self.max);
        let hi = self.min.max(self.max);
        value.max(lo).min(hi)
    }

    /// Finite bounds with `min <= max` and a positive finite step.
    pub fn validate(&self, name: &'static str) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(SignalError::invalid(name, "range bounds must be finite"));
        }
        if self.min > self.max {
            return Err(SignalError::invalid(
                name,
                format!("range min {} exceeds max {}", self.min, self.max),
            ));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(SignalError::invalid(
                name,
                format!("range step must be positive, got {}", self.step),
            ));
        }
        Ok(())
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRanges {
    pub amplitude: ParamRange,
    pub frequency: ParamRange,
    pub phase: ParamRange,
    pub noise_mean: ParamRange,
    pub noise_variance: ParamRange,
    pub cutoff: ParamRange,
    pub order: ParamRange,
    pub window_size: ParamRange,
}

impl Default for ParamRanges {
    fn default() -> Self {
        Self {
            amplitude: ParamRange::new(0.1, 10.0, 0.1),
            frequency: ParamRange::new(0.1, 10.0, 0.1),
            phase: ParamRange::new(0.0, TAU, 0.1),
            noise_mean: ParamRange::new(-1.0, 1.0, 0.1),
            noise_variance: ParamRange::new(0.0, 1.0, 0.1),
            cutoff: ParamRange::new(0.1, 10.0, 0.1),
            order: ParamRange::new(1.0, 10.0, 1.0),
            window_size: ParamRange::new(1.0, 35.0, 1.0),
        }
    }
}

impl ParamRanges {
    pub fn validate(&self) -> Result<()> {
        self.amplitude.validate("amplitude")?;
        self.frequency.validate("frequency")?;
        self.phase.validate("phase")?;
        self.noise_mean.validate("noise_mean")?;
        self.noise_variance.validate("noise_variance")?;
        self.cutoff.validate("cutoff")?;
        self.order.validate("order")?;
        self.window_size.validate("window_size")
    }
}

/// When a changed noise mean or variance produces a fresh draw.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoisePolicy {
    /// Redraw on the next evaluation after mean or variance changed. When
    /// off, the old draw stays until an explicit regenerate.
    pub regenerate_on_noise_param_change: bool,
}

impl Default for NoisePolicy {
    fn default() -> Self {
        Self {
            regenerate_on_noise_param_change: true,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub samples: usize,
    pub start: f64,
    pub end: f64,
    pub harmonic: HarmonicParams,
    pub noise: NoiseParams,
    pub filter: FilterParams,
    pub show_noise: bool,
    pub ranges: ParamRanges,
    pub policy: NoisePolicy,
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of samples and the closed interval they cover.
    pub fn time_base(mut self, samples: usize, start: f64, end: f64) -> Self {
        self.samples = samples;
        self.start = start;
        self.end = end;
        self
    }

    pub fn harmonic(mut self, harmonic: HarmonicParams) -> Self {
        self.harmonic = harmonic;
        self
    }

    pub fn noise(mut self, noise: NoiseParams) -> Self {
        self.noise = noise;
        self
    }

    pub fn filter(mut self, filter: FilterParams) -> Self {
        self.filter = filter;
        self
    }

    pub fn show_noise(mut self, show: bool) -> Self {
        self.show_noise = show;
        self
    }

    pub fn ranges(mut self, ranges: ParamRanges) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn policy(mut self, policy: NoisePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn regenerate_on_noise_param_change(mut self, regenerate: bool) -> Self {
        self.policy.regenerate_on_noise_param_change = regenerate;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build_time_base(&self) -> Result<TimeBase> {
        TimeBase::new(self.samples, self.start, self.end)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            start: DEFAULT_START,
            end: DEFAULT_END,
            harmonic: HarmonicParams::default(),
            noise: NoiseParams::default(),
            filter: FilterParams::default(),
            show_noise: true,
            ranges: ParamRanges::default(),
            policy: NoisePolicy::default(),
            seed: None,
        }
    }
}
