use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use signal_lab::dsp::{synthesize_harmonic, HarmonicParams};
use signal_lab::TimeBase;

use crate::SIGNAL_LENGTHS;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let params = HarmonicParams::new(1.0, 1.0, 0.0);

    for &len in SIGNAL_LENGTHS {
        let time_base = TimeBase::new(len, 0.0, 10.0).unwrap();
        group.bench_with_input(BenchmarkId::new("harmonic", len), &len, |b, _| {
            b.iter(|| synthesize_harmonic(black_box(&time_base), black_box(&params)))
        });
    }

    group.finish();
}
