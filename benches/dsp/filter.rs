//! Benchmarks for the zero-phase Butterworth low-pass.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use signal_lab::dsp::{low_pass_filter, ButterworthLowpass};

use crate::SIGNAL_LENGTHS;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &len in SIGNAL_LENGTHS {
        let sampling_rate = (len - 1) as f64 / 10.0;
        // Sawtooth-like ramp
        let input: Vec<f64> = (0..len).map(|i| (i % 50) as f64 / 25.0 - 1.0).collect();

        for order in [2usize, 5, 8] {
            group.bench_with_input(
                BenchmarkId::new(format!("filtfilt/order{order}"), len),
                &len,
                |b, _| b.iter(|| low_pass_filter(black_box(&input), 3.0, sampling_rate, order)),
            );
        }

        // Design once, run causally, for comparison with the two-pass cost
        let filter = ButterworthLowpass::from_cutoff(3.0, sampling_rate, 5).unwrap();
        group.bench_with_input(BenchmarkId::new("causal/order5", len), &len, |b, _| {
            b.iter(|| filter.filter(black_box(&input)))
        });
    }

    group.finish();
}
