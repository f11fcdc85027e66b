use crate::error::{Result, SignalError};

/// Centered moving average.
///
/// Sample `i` becomes the mean of `signal[i - h ..= i + h]` with
/// `h = window_size / 2`, clipped to the ends of the sequence. Near the edges
/// the window shrinks; nothing is wrapped or padded.
pub fn moving_average_filter(signal: &[f64], window_size: usize) -> Result<Vec<f64>> {
    if window_size < 1 {
        return Err(SignalError::invalid(
            "window_size",
            "must be at least 1",
        ));
    }

    let n = signal.len();
    let half = window_size / 2;

    // prefix[i] = sum of signal[..i]
    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0.0);
    let mut acc = 0.0;
    for &x in signal {
        acc += x;
        prefix.push(acc);
    }

    Ok((0..n)
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half).min(n - 1);
            (prefix[hi + 1] - prefix[lo]) / (hi - lo + 1) as f64
        })
        .collect())
}
