use std::f64::consts::PI;

use log::{debug, warn};

use crate::error::{Result, SignalError};

/*
Zero-phase Butterworth low-pass
===============================

Design
------

An order-N Butterworth prototype has its poles evenly spaced on the left half
of the unit circle in the s-plane. Pairing conjugate poles gives quadratic
factors

    s² + 2·sin(θk)·s + 1,     θk = π(2k + 1) / 2N,   k = 0 .. N/2

plus a single real pole at s = -1 when N is odd. Each factor becomes one
second-order section (biquad) after scaling to the cutoff and applying the
bilinear transform with pre-warping:

    K = tan(π · Wn / 2)       Wn = cutoff / nyquist, in (0, 1)

    b = K² · [1, 2, 1] / a0
    a = [1, 2(K² - 1), 1 - 2·sin(θ)·K + K²] / a0,   a0 = 1 + 2·sin(θ)·K + K²

and for the odd real pole

    b = K · [1, 1] / (1 + K)
    a = [1, (K - 1) / (K + 1)]

Every section has unit gain at DC, so the cascade does too.

Forward-backward application
----------------------------

A causal IIR filter delays each frequency by a different amount. Filtering
once forward and then once more over the reversed output cancels the phase
response exactly, leaving |H|² and no time shift:

    x ──► H ──► reverse ──► H ──► reverse ──► y

To keep start-up transients out of the output, the input is extended at both
ends by an odd reflection about the end samples, and each section starts from
the steady state it would have reached had the first (padded) sample been
held forever. The padding is stripped afterwards.
*/

/// Coefficients of one section, normalised so that a0 = 1.
///
/// H(z) = (b0 + b1·z⁻¹ + b2·z⁻²) / (1 + a1·z⁻¹ + a2·z⁻²)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Gain at z = 1.
    pub fn dc_gain(&self) -> f64 {
        (self.b0 + self.b1 + self.b2) / (1.0 + self.a1 + self.a2)
    }

    /// Direct Form II Transposed state after holding `input` forever.
    fn steady_state(&self, input: f64) -> [f64; 2] {
        let output = self.dc_gain() * input;
        let z1 = output - self.b0 * input;
        let z2 = self.b2 * input - self.a2 * output;
        [z1, z2]
    }

    fn is_first_order(&self) -> bool {
        self.b2 == 0.0 && self.a2 == 0.0
    }
}

/// Butterworth low-pass as cascaded second-order sections.
#[derive(Debug, Clone)]
pub struct ButterworthLowpass {
    sections: Vec<BiquadCoeffs>,
}

impl ButterworthLowpass {
    /// Design from a cutoff normalised to Nyquist, `0 < wn < 1`.
    pub fn design(order: usize, normalized_cutoff: f64) -> Result<Self> {
        if order < 1 {
            return Err(SignalError::invalid("order", "must be at least 1"));
        }
        if !(normalized_cutoff > 0.0 && normalized_cutoff < 1.0) {
            return Err(SignalError::invalid(
                "cutoff",
                format!("normalized cutoff must lie in (0, 1), got {normalized_cutoff}"),
            ));
        }

        let k = (PI * normalized_cutoff / 2.0).tan();
        let k2 = k * k;
        let mut sections = Vec::with_capacity(order.div_ceil(2));

        for pair in 0..order / 2 {
            let theta = PI * (2 * pair + 1) as f64 / (2 * order) as f64;
            let damping = 2.0 * theta.sin();
            let a0 = 1.0 + damping * k + k2;
            sections.push(BiquadCoeffs {
                b0: k2 / a0,
                b1: 2.0 * k2 / a0,
                b2: k2 / a0,
                a1: 2.0 * (k2 - 1.0) / a0,
                a2: (1.0 - damping * k + k2) / a0,
            });
        }

        if order % 2 == 1 {
            sections.push(BiquadCoeffs {
                b0: k / (1.0 + k),
                b1: k / (1.0 + k),
                b2: 0.0,
                a1: (k - 1.0) / (k + 1.0),
                a2: 0.0,
            });
        }

        debug!(
            "designed butterworth low-pass: order={order}, wn={normalized_cutoff:.4}, sections={}",
            sections.len()
        );

        Ok(Self { sections })
    }

    /// Design from a cutoff in Hz and the sampling rate of the signal.
    pub fn from_cutoff(cutoff_hz: f64, sampling_rate: f64, order: usize) -> Result<Self> {
        if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
            return Err(SignalError::invalid(
                "sampling_rate",
                format!("must be positive, got {sampling_rate}"),
            ));
        }
        let nyquist = 0.5 * sampling_rate;
        Self::design(order, cutoff_hz / nyquist)
    }

    pub fn sections(&self) -> &[BiquadCoeffs] {
        &self.sections
    }

    /// Equivalent FIR/IIR tap count, used to size the edge padding.
    fn ntaps(&self) -> usize {
        let first_order = self.sections.iter().filter(|s| s.is_first_order()).count();
        2 * self.sections.len() + 1 - first_order
    }

    /// Run the cascade once over `signal` in place, starting every section
    /// from its steady state for `signal[0]`.
    fn run(&self, signal: &mut [f64]) {
        let Some(&first) = signal.first() else {
            return;
        };

        let mut states = Vec::with_capacity(self.sections.len());
        let mut held = first;
        for section in &self.sections {
            states.push(section.steady_state(held));
            held *= section.dc_gain();
        }

        for sample in signal.iter_mut() {
            let mut x = *sample;
            for (c, z) in self.sections.iter().zip(states.iter_mut()) {
                let y = c.b0 * x + z[0];
                z[0] = c.b1 * x - c.a1 * y + z[1];
                z[1] = c.b2 * x - c.a2 * y;
                x = y;
            }
            *sample = x;
        }
    }

    /// Causal single pass, for comparison with the zero-phase result.
    pub fn filter(&self, signal: &[f64]) -> Vec<f64> {
        let mut out = signal.to_vec();
        self.run(&mut out);
        out
    }

    /// Forward-backward (zero-phase) application. Output length equals
    /// input length.
    pub fn filtfilt(&self, signal: &[f64]) -> Vec<f64> {
        let n = signal.len();
        if n == 0 {
            return Vec::new();
        }

        let wanted = 3 * self.ntaps();
        let padlen = wanted.min(n - 1);
        if padlen < wanted {
            warn!("signal of {n} samples too short for {wanted} padding, using {padlen}");
        }

        let mut ext = odd_extend(signal, padlen);
        self.run(&mut ext);
        ext.reverse();
        self.run(&mut ext);
        ext.reverse();

        ext.drain(..padlen);
        ext.truncate(n);
        ext
    }
}

/// Reflect `padlen` samples about each end: `2·x[0] - x[i]` on the left and
/// `2·x[n-1] - x[n-1-i]` on the right.
fn odd_extend(signal: &[f64], padlen: usize) -> Vec<f64> {
    let n = signal.len();
    let first = signal[0];
    let last = signal[n - 1];

    let mut ext = Vec::with_capacity(n + 2 * padlen);
    ext.extend((1..=padlen).rev().map(|i| 2.0 * first - signal[i]));
    ext.extend_from_slice(signal);
    ext.extend((1..=padlen).map(|i| 2.0 * last - signal[n - 1 - i]));
    ext
}

/// Zero-phase Butterworth low-pass of `signal`.
///
/// Fails when `cutoff_hz / (sampling_rate / 2)` is outside (0, 1) or
/// `order < 1`.
pub fn low_pass_filter(
    signal: &[f64],
    cutoff_hz: f64,
    sampling_rate: f64,
    order: usize,
) -> Result<Vec<f64>> {
    let filter = ButterworthLowpass::from_cutoff(cutoff_hz, sampling_rate, order)?;
    Ok(filter.filtfilt(signal))
}
