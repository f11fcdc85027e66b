use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use signal_lab::dsp::{NoiseParams, NoiseSource};
use signal_lab::TimeBase;

use crate::SIGNAL_LENGTHS;

pub fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/noise");
    let params = NoiseParams::new(0.0, 0.1);

    for &len in SIGNAL_LENGTHS {
        let time_base = TimeBase::new(len, 0.0, 10.0).unwrap();
        let mut source = NoiseSource::seeded(0);
        group.bench_with_input(BenchmarkId::new("gaussian", len), &len, |b, _| {
            b.iter(|| source.generate(black_box(&time_base), black_box(&params)))
        });
    }

    group.finish();
}
