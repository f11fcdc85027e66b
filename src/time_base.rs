//! Uniform sample grid shared by every sequence in a pipeline.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SignalError};

pub const DEFAULT_SAMPLES: usize = 1000;
pub const DEFAULT_START: f64 = 0.0;
pub const DEFAULT_END: f64 = 10.0;

/// Evenly spaced sample times over a closed interval, both endpoints included.
///
/// The grid is fixed once built. Every sequence produced against it has
/// exactly `len()` samples.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TimeBase {
    start: f64,
    end: f64,
    times: Vec<f64>,
}

impl TimeBase {
    pub fn new(samples: usize, start: f64, end: f64) -> Result<Self> {
        if samples < 2 {
            return Err(SignalError::invalid(
                "samples",
                format!("need at least 2 samples, got {samples}"),
            ));
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(SignalError::invalid(
                "interval",
                format!("bounds must be finite, got [{start}, {end}]"),
            ));
        }
        if end <= start {
            return Err(SignalError::invalid(
                "interval",
                format!("end ({end}) must be greater than start ({start})"),
            ));
        }

        Ok(Self::linspace(samples, start, end))
    }

    fn linspace(samples: usize, start: f64, end: f64) -> Self {
        let step = (end - start) / (samples - 1) as f64;
        let mut times: Vec<f64> = (0..samples).map(|i| start + i as f64 * step).collect();
        // Pin the last sample so it lands exactly on `end`.
        times[samples - 1] = end;

        Self { start, end, times }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Spacing between consecutive samples in seconds.
    pub fn step(&self) -> f64 {
        (self.end - self.start) / (self.len() - 1) as f64
    }

    /// Samples per second, `1 / step`.
    pub fn sampling_rate(&self) -> f64 {
        1.0 / self.step()
    }

    /// Half the sampling rate.
    pub fn nyquist(&self) -> f64 {
        0.5 * self.sampling_rate()
    }
}

impl Default for TimeBase {
    fn default() -> Self {
        Self::linspace(DEFAULT_SAMPLES, DEFAULT_START, DEFAULT_END)
    }
}
