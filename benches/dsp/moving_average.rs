use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use signal_lab::dsp::moving_average_filter;

use crate::SIGNAL_LENGTHS;

pub fn bench_moving_average(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/moving_average");

    for &len in SIGNAL_LENGTHS {
        let input: Vec<f64> = (0..len).map(|i| (i as f64 * 0.05).sin()).collect();

        for window in [3usize, 35] {
            group.bench_with_input(
                BenchmarkId::new(format!("window{window}"), len),
                &len,
                |b, _| b.iter(|| moving_average_filter(black_box(&input), window)),
            );
        }
    }

    group.finish();
}
