use std::f64::consts::PI;

use signal_lab::analysis::variance;
use signal_lab::dsp::{low_pass_filter, moving_average_filter};
use signal_lab::{
    DemoSession, FilterParams, HarmonicParams, NoiseParams, SessionConfig, SignalError,
    SignalPipeline, TimeBase,
};

fn demo_pipeline(seed: u64) -> SignalPipeline {
    SignalPipeline::with_seed(TimeBase::default(), FilterParams::low_pass(3.0, 5), seed)
}

#[test]
fn default_demo_scenario() {
    let mut pipeline = demo_pipeline(2024);
    let harmonic = HarmonicParams::new(1.0, 1.0, 0.0);
    let noise = NoiseParams::new(0.0, 0.1);

    let set = pipeline.evaluate(&harmonic, &noise, true).unwrap();
    let times = pipeline.time_base().times();
    assert_eq!(set.harmonic.len(), 1000);
    assert_eq!(set.noisy.len(), 1000);
    assert_eq!(set.filtered.len(), 1000);

    for (i, &t) in times.iter().enumerate() {
        assert!((set.harmonic[i] - (2.0 * PI * t).sin()).abs() < 1e-9);
    }

    let drawn = pipeline.noise_cache().samples().unwrap();
    for i in 0..set.len() {
        assert!((set.noisy[i] - set.harmonic[i] - drawn[i]).abs() < 1e-12);
    }

    assert!(
        variance(&set.filtered) < variance(&set.noisy),
        "filtered variance {} should be below noisy variance {}",
        variance(&set.filtered),
        variance(&set.noisy)
    );
}

#[test]
fn filtered_signal_tracks_the_clean_harmonic() {
    let mut pipeline = demo_pipeline(7);
    let set = pipeline
        .evaluate(&HarmonicParams::default(), &NoiseParams::default(), true)
        .unwrap();

    let residual = |series: &[f64]| {
        let diff: Vec<f64> = series
            .iter()
            .zip(&set.harmonic)
            .map(|(a, b)| a - b)
            .collect();
        variance(&diff)
    };
    assert!(residual(&set.filtered) < residual(&set.noisy) / 4.0);
}

#[test]
fn moving_average_pipeline_also_smooths() {
    let mut pipeline =
        SignalPipeline::with_seed(TimeBase::default(), FilterParams::moving_average(9), 3);
    let set = pipeline
        .evaluate(&HarmonicParams::default(), &NoiseParams::default(), true)
        .unwrap();
    assert_eq!(set.filtered.len(), set.noisy.len());
    assert!(variance(&set.filtered) < variance(&set.noisy));
}

#[test]
fn hidden_noise_leaves_the_harmonic_alone() {
    let mut pipeline = demo_pipeline(1);
    let set = pipeline
        .evaluate(&HarmonicParams::new(2.0, 0.5, 1.0), &NoiseParams::default(), false)
        .unwrap();
    assert_eq!(set.noisy, set.harmonic);
    assert!(pipeline.noise_cache().is_empty());
}

#[test]
fn regenerated_noise_differs_between_draws() {
    let mut pipeline = demo_pipeline(11);
    let params = NoiseParams::new(0.0, 0.1);
    let a = pipeline.generate_noise(&params).unwrap();
    let b = pipeline.generate_noise(&params).unwrap();
    assert_eq!(a.len(), 1000);
    assert_ne!(a, b);
}

#[test]
fn same_seed_reproduces_bit_for_bit() {
    let params = NoiseParams::new(0.3, 0.7);
    let a = demo_pipeline(99).generate_noise(&params).unwrap();
    let b = demo_pipeline(99).generate_noise(&params).unwrap();
    let c = demo_pipeline(100).generate_noise(&params).unwrap();

    let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&a), bits(&b));
    assert_ne!(bits(&a), bits(&c));
}

#[test]
fn errors_surface_synchronously() {
    let mut pipeline = demo_pipeline(5);
    assert!(matches!(
        pipeline.generate_noise(&NoiseParams::new(0.0, -0.5)),
        Err(SignalError::InvalidParameter { .. })
    ));

    let signal = vec![0.0; 100];
    assert!(matches!(
        low_pass_filter(&signal, 3.0, 99.9, 0),
        Err(SignalError::InvalidParameter { .. })
    ));
    assert!(matches!(
        moving_average_filter(&signal, 0),
        Err(SignalError::InvalidParameter { .. })
    ));

    let harmonic = vec![0.0; 1000];
    assert!(matches!(
        pipeline.compose_noisy_signal(&harmonic, true, Some(&[0.0; 999][..]), &NoiseParams::default()),
        Err(SignalError::DimensionMismatch {
            expected: 1000,
            actual: 999
        })
    ));
}

#[test]
fn filters_preserve_length_across_ranges() {
    let time_base = TimeBase::default();
    let rate = time_base.sampling_rate();
    let signal: Vec<f64> = time_base.times().iter().map(|t| (3.0 * t).cos()).collect();

    for cutoff in [0.1, 1.0, 3.0, 7.5, 10.0] {
        for order in 1..=8 {
            let out = low_pass_filter(&signal, cutoff, rate, order).unwrap();
            assert_eq!(out.len(), signal.len());
        }
    }
    for window in 1..=35 {
        assert_eq!(moving_average_filter(&signal, window).unwrap().len(), signal.len());
    }
}

#[test]
fn session_walkthrough() {
    let mut session = DemoSession::new(SessionConfig::default().seed(42)).unwrap();
    let first = session.signals().clone();

    session.set_amplitude(3.0);
    let set = session.evaluate().unwrap().clone();
    let cached = session.pipeline().noise_cache().samples().unwrap().to_vec();
    for i in 0..set.len() {
        assert!((set.noisy[i] - set.harmonic[i] - cached[i]).abs() < 1e-12);
    }
    assert_ne!(set.harmonic, first.harmonic);

    session.regenerate_noise().unwrap();
    assert_ne!(session.pipeline().noise_cache().samples().unwrap(), cached.as_slice());

    session.reset().unwrap();
    assert_eq!(session.harmonic(), HarmonicParams::default());
    let (lo, hi) = session.y_bounds();
    assert!(lo <= -3.0 && hi >= 3.0);
}
