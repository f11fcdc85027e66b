//! Summary statistics over sample sequences.

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().sum::<f64>() / signal.len() as f64
}

/// Population variance; 0 for an empty slice.
pub fn variance(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    let m = mean(signal);
    signal.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / signal.len() as f64
}

pub fn rms(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    (signal.iter().map(|x| x * x).sum::<f64>() / signal.len() as f64).sqrt()
}

/// Largest absolute value.
pub fn peak(signal: &[f64]) -> f64 {
    signal.iter().fold(0.0f64, |acc, &x| acc.max(x.abs()))
}

/// Minimum and maximum, or `None` for an empty slice.
pub fn min_max(signal: &[f64]) -> Option<(f64, f64)> {
    let first = *signal.first()?;
    Some(
        signal
            .iter()
            .fold((first, first), |(lo, hi), &x| (lo.min(x), hi.max(x))),
    )
}

/// Statistics shown alongside a rendered series.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignalStats {
    pub mean: f64,
    pub variance: f64,
    pub rms: f64,
    pub peak: f64,
}

impl SignalStats {
    pub fn from_signal(signal: &[f64]) -> Self {
        Self {
            mean: mean(signal),
            variance: variance(signal),
            rms: rms(signal),
            peak: peak(signal),
        }
    }
}
