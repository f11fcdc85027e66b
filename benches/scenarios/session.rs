use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use signal_lab::{DemoSession, FilterParams, SessionConfig};

use crate::SIGNAL_LENGTHS;

pub fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/session");

    for &len in SIGNAL_LENGTHS {
        // Amplitude drag: cached noise is reused, only synthesis and filter run
        let config = SessionConfig::new().time_base(len, 0.0, 10.0).seed(1);
        let mut session = DemoSession::new(config).unwrap();
        let mut amplitude = 1.0;
        group.bench_with_input(BenchmarkId::new("lowpass/amplitude", len), &len, |b, _| {
            b.iter(|| {
                amplitude = if amplitude > 9.0 { 1.0 } else { amplitude + 0.1 };
                session.set_amplitude(black_box(amplitude));
                session.evaluate().map(|set| set.len())
            })
        });

        // Regenerate button: fresh draw plus full recompute
        group.bench_with_input(BenchmarkId::new("lowpass/regenerate", len), &len, |b, _| {
            b.iter(|| session.regenerate_noise().map(|set| set.len()))
        });

        let config = SessionConfig::new()
            .time_base(len, 0.0, 10.0)
            .filter(FilterParams::moving_average(35))
            .seed(1);
        let mut session = DemoSession::new(config).unwrap();
        group.bench_with_input(
            BenchmarkId::new("moving_average/regenerate", len),
            &len,
            |b, _| b.iter(|| session.regenerate_noise().map(|set| set.len())),
        );
    }

    group.finish();
}
