//! Signal-processing primitives used by the pipeline.
//!
//! Every function here is a pure transformation over `f64` slices; the only
//! state lives in [`noise::NoiseSource`], which owns its random generator.

/// Zero-phase Butterworth low-pass.
pub mod filter;
/// Centered, edge-clipped moving average.
pub mod moving_average;
/// Gaussian noise generation.
pub mod noise;
/// Harmonic (sinusoid) synthesis.
pub mod oscillator;

pub use filter::{low_pass_filter, ButterworthLowpass};
pub use moving_average::moving_average_filter;
pub use noise::{NoiseParams, NoiseSource};
pub use oscillator::{synthesize_harmonic, HarmonicParams};
