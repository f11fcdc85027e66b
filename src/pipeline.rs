//! Harmonic → noisy → filtered evaluation with a cached noise draw.

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::{
    low_pass_filter, moving_average_filter, synthesize_harmonic, HarmonicParams, NoiseParams,
    NoiseSource,
};
use crate::error::{Result, SignalError};
use crate::time_base::TimeBase;

/// Which smoother runs on the noisy signal, and its settings.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterParams {
    /// Zero-phase Butterworth low-pass.
    LowPass { cutoff_hz: f64, order: usize },
    /// Centered moving average.
    MovingAverage { window_size: usize },
}

impl FilterParams {
    pub fn low_pass(cutoff_hz: f64, order: usize) -> Self {
        FilterParams::LowPass { cutoff_hz, order }
    }

    pub fn moving_average(window_size: usize) -> Self {
        FilterParams::MovingAverage { window_size }
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            FilterParams::LowPass { .. } => FilterKind::LowPass,
            FilterParams::MovingAverage { .. } => FilterKind::MovingAverage,
        }
    }
}

impl Default for FilterParams {
    fn default() -> Self {
        FilterParams::LowPass {
            cutoff_hz: 3.0,
            order: 5,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    LowPass,
    MovingAverage,
}

/// Last noise draw and the parameters it was drawn with.
#[derive(Debug, Clone, Default)]
pub struct NoiseCache {
    entry: Option<CachedNoise>,
}

#[derive(Debug, Clone)]
struct CachedNoise {
    params: NoiseParams,
    samples: Vec<f64>,
}

impl NoiseCache {
    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    pub fn samples(&self) -> Option<&[f64]> {
        self.entry.as_ref().map(|e| e.samples.as_slice())
    }

    /// Parameters of the cached draw.
    pub fn params(&self) -> Option<NoiseParams> {
        self.entry.as_ref().map(|e| e.params)
    }

    /// True when the cache is populated but was drawn with other parameters.
    pub fn is_stale_for(&self, params: &NoiseParams) -> bool {
        self.entry.as_ref().is_some_and(|e| e.params != *params)
    }

    fn replace(&mut self, params: NoiseParams, samples: Vec<f64>) {
        self.entry = Some(CachedNoise { params, samples });
    }
}

/// The three series produced by one evaluation. All have the same length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignalSet {
    pub harmonic: Vec<f64>,
    pub noisy: Vec<f64>,
    pub filtered: Vec<f64>,
}

impl SignalSet {
    pub fn len(&self) -> usize {
        self.harmonic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.harmonic.is_empty()
    }
}

/// Owns the time base, the active filter, the noise cache and the random
/// source behind it.
pub struct SignalPipeline {
    time_base: TimeBase,
    filter: FilterParams,
    cache: NoiseCache,
    source: NoiseSource,
}

impl SignalPipeline {
    pub fn new(time_base: TimeBase, filter: FilterParams) -> Self {
        Self {
            time_base,
            filter,
            cache: NoiseCache::default(),
            source: NoiseSource::from_entropy(),
        }
    }

    /// Deterministic noise: the same seed reproduces the same draws.
    pub fn with_seed(time_base: TimeBase, filter: FilterParams, seed: u64) -> Self {
        Self {
            time_base,
            filter,
            cache: NoiseCache::default(),
            source: NoiseSource::seeded(seed),
        }
    }

    pub fn time_base(&self) -> &TimeBase {
        &self.time_base
    }

    pub fn filter(&self) -> FilterParams {
        self.filter
    }

    /// Adjust filter settings. The filter kind is fixed per pipeline.
    pub fn set_filter(&mut self, filter: FilterParams) -> Result<()> {
        if filter.kind() != self.filter.kind() {
            return Err(SignalError::invalid(
                "filter",
                format!(
                    "pipeline runs a {:?} filter, cannot switch to {:?}",
                    self.filter.kind(),
                    filter.kind()
                ),
            ));
        }
        self.filter = filter;
        Ok(())
    }

    pub fn noise_cache(&self) -> &NoiseCache {
        &self.cache
    }

    pub(crate) fn source_mut(&mut self) -> &mut NoiseSource {
        &mut self.source
    }

    pub fn synthesize_harmonic(&self, params: &HarmonicParams) -> Result<Vec<f64>> {
        synthesize_harmonic(&self.time_base, params)
    }

    /// Fresh Gaussian draw. Replaces the noise cache.
    pub fn generate_noise(&mut self, params: &NoiseParams) -> Result<Vec<f64>> {
        let noise = self.source.generate(&self.time_base, params)?;
        self.cache.replace(*params, noise.clone());
        debug!("noise cache replaced");
        Ok(noise)
    }

    /// Add noise to `harmonic`.
    ///
    /// With `show_noise` off the harmonic is returned as is. Otherwise
    /// `cached_noise` is added when given, and a fresh draw (which also
    /// refreshes the cache) when not.
    pub fn compose_noisy_signal(
        &mut self,
        harmonic: &[f64],
        show_noise: bool,
        cached_noise: Option<&[f64]>,
        params: &NoiseParams,
    ) -> Result<Vec<f64>> {
        if !show_noise {
            return Ok(harmonic.to_vec());
        }
        match cached_noise {
            Some(noise) => add_elementwise(harmonic, noise),
            None => {
                let noise = self.generate_noise(params)?;
                add_elementwise(harmonic, &noise)
            }
        }
    }

    /// Like [`compose_noisy_signal`](Self::compose_noisy_signal), reusing the
    /// pipeline's own cache when it holds a draw.
    pub fn compose_with_cache(
        &mut self,
        harmonic: &[f64],
        show_noise: bool,
        params: &NoiseParams,
    ) -> Result<Vec<f64>> {
        if !show_noise {
            return Ok(harmonic.to_vec());
        }
        if let Some(noise) = self.cache.samples() {
            debug!("reusing cached noise draw");
            return add_elementwise(harmonic, noise);
        }
        self.compose_noisy_signal(harmonic, true, None, params)
    }

    /// Run the active filter with this pipeline's sampling rate.
    pub fn apply_filter(&self, signal: &[f64]) -> Result<Vec<f64>> {
        match self.filter {
            FilterParams::LowPass { cutoff_hz, order } => {
                low_pass_filter(signal, cutoff_hz, self.time_base.sampling_rate(), order)
            }
            FilterParams::MovingAverage { window_size } => {
                moving_average_filter(signal, window_size)
            }
        }
    }

    /// Full recomputation of the three series.
    pub fn evaluate(
        &mut self,
        harmonic: &HarmonicParams,
        noise: &NoiseParams,
        show_noise: bool,
    ) -> Result<SignalSet> {
        let harmonic = self.synthesize_harmonic(harmonic)?;
        let noisy = self.compose_with_cache(&harmonic, show_noise, noise)?;
        let filtered = self.apply_filter(&noisy)?;
        Ok(SignalSet {
            harmonic,
            noisy,
            filtered,
        })
    }
}

fn add_elementwise(signal: &[f64], noise: &[f64]) -> Result<Vec<f64>> {
    if signal.len() != noise.len() {
        return Err(SignalError::DimensionMismatch {
            expected: signal.len(),
            actual: noise.len(),
        });
    }
    Ok(signal.iter().zip(noise).map(|(s, n)| s + n).collect())
}
