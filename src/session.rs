//! Interactive session over a [`SignalPipeline`].
//!
//! A UI holds one `DemoSession`, forwards every slider drag or button press
//! to it as a direct call, then asks for a fresh [`SignalSet`] to draw.

use log::{debug, info, warn};

use crate::analysis::min_max;
use crate::config::{ParamRange, SessionConfig};
use crate::dsp::{HarmonicParams, NoiseParams};
use crate::error::{Result, SignalError};
use crate::pipeline::{FilterParams, SignalPipeline, SignalSet};

/// Margin added above and below the noisy series when fitting plot bounds.
const Y_MARGIN: f64 = 2.0;

/// Every adjustable parameter, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionParam {
    Amplitude,
    Frequency,
    Phase,
    NoiseMean,
    NoiseVariance,
    Cutoff,
    Order,
    WindowSize,
}

impl SessionParam {
    pub const ALL: [SessionParam; 8] = [
        SessionParam::Amplitude,
        SessionParam::Frequency,
        SessionParam::Phase,
        SessionParam::NoiseMean,
        SessionParam::NoiseVariance,
        SessionParam::Cutoff,
        SessionParam::Order,
        SessionParam::WindowSize,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SessionParam::Amplitude => "Amplitude",
            SessionParam::Frequency => "Frequency (Hz)",
            SessionParam::Phase => "Phase (rad)",
            SessionParam::NoiseMean => "Noise mean",
            SessionParam::NoiseVariance => "Noise variance",
            SessionParam::Cutoff => "Cutoff (Hz)",
            SessionParam::Order => "Filter order",
            SessionParam::WindowSize => "Window size",
        }
    }
}

pub struct DemoSession {
    config: SessionConfig,
    pipeline: SignalPipeline,
    harmonic: HarmonicParams,
    noise: NoiseParams,
    show_noise: bool,
    /// Noise params changed since the last draw and policy asks for a redraw.
    noise_dirty: bool,
    current: SignalSet,
}

impl DemoSession {
    /// Build the pipeline and compute the first signal set.
    ///
    /// Initial parameters outside the configured ranges are clamped into
    /// them, as the setters would.
    pub fn new(mut config: SessionConfig) -> Result<Self> {
        config.ranges.validate()?;
        clamp_initial(&mut config);

        let time_base = config.build_time_base()?;
        let pipeline = match config.seed {
            Some(seed) => SignalPipeline::with_seed(time_base, config.filter, seed),
            None => SignalPipeline::new(time_base, config.filter),
        };

        let mut session = Self {
            harmonic: config.harmonic,
            noise: config.noise,
            show_noise: config.show_noise,
            noise_dirty: false,
            current: SignalSet::default(),
            pipeline,
            config,
        };
        session.evaluate()?;

        info!(
            "session ready: {} samples at {:.3} Hz, filter {:?}",
            session.pipeline.time_base().len(),
            session.pipeline.time_base().sampling_rate(),
            session.pipeline.filter()
        );
        Ok(session)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &SignalPipeline {
        &self.pipeline
    }

    pub fn harmonic(&self) -> HarmonicParams {
        self.harmonic
    }

    pub fn noise(&self) -> NoiseParams {
        self.noise
    }

    pub fn filter(&self) -> FilterParams {
        self.pipeline.filter()
    }

    pub fn show_noise(&self) -> bool {
        self.show_noise
    }

    /// The last successfully computed series.
    pub fn signals(&self) -> &SignalSet {
        &self.current
    }

    /// Parameters that apply to the active filter kind.
    pub fn params(&self) -> Vec<SessionParam> {
        SessionParam::ALL
            .into_iter()
            .filter(|p| match (p, self.filter()) {
                (SessionParam::Cutoff | SessionParam::Order, FilterParams::LowPass { .. }) => true,
                (SessionParam::WindowSize, FilterParams::MovingAverage { .. }) => true,
                (SessionParam::Cutoff | SessionParam::Order | SessionParam::WindowSize, _) => {
                    false
                }
                _ => true,
            })
            .collect()
    }

    pub fn range(&self, param: SessionParam) -> ParamRange {
        let ranges = &self.config.ranges;
        match param {
            SessionParam::Amplitude => ranges.amplitude,
            SessionParam::Frequency => ranges.frequency,
            SessionParam::Phase => ranges.phase,
            SessionParam::NoiseMean => ranges.noise_mean,
            SessionParam::NoiseVariance => ranges.noise_variance,
            SessionParam::Cutoff => ranges.cutoff,
            SessionParam::Order => ranges.order,
            SessionParam::WindowSize => ranges.window_size,
        }
    }

    /// Current value, or `None` for a filter parameter the active filter
    /// does not have.
    pub fn value(&self, param: SessionParam) -> Option<f64> {
        match (param, self.filter()) {
            (SessionParam::Amplitude, _) => Some(self.harmonic.amplitude),
            (SessionParam::Frequency, _) => Some(self.harmonic.frequency),
            (SessionParam::Phase, _) => Some(self.harmonic.phase),
            (SessionParam::NoiseMean, _) => Some(self.noise.mean),
            (SessionParam::NoiseVariance, _) => Some(self.noise.variance),
            (SessionParam::Cutoff, FilterParams::LowPass { cutoff_hz, .. }) => Some(cutoff_hz),
            (SessionParam::Order, FilterParams::LowPass { order, .. }) => Some(order as f64),
            (SessionParam::WindowSize, FilterParams::MovingAverage { window_size }) => {
                Some(window_size as f64)
            }
            _ => None,
        }
    }

    /// Set a parameter, clamped into its range. Does not recompute.
    pub fn set(&mut self, param: SessionParam, value: f64) -> Result<()> {
        let value = self.range(param).clamp(value);
        match param {
            SessionParam::Amplitude => self.harmonic.amplitude = value,
            SessionParam::Frequency => self.harmonic.frequency = value,
            SessionParam::Phase => self.harmonic.phase = value,
            SessionParam::NoiseMean => self.set_noise(NoiseParams {
                mean: value,
                ..self.noise
            }),
            SessionParam::NoiseVariance => self.set_noise(NoiseParams {
                variance: value,
                ..self.noise
            }),
            SessionParam::Cutoff => match self.filter() {
                FilterParams::LowPass { order, .. } => self
                    .pipeline
                    .set_filter(FilterParams::low_pass(value, order))?,
                FilterParams::MovingAverage { .. } => {
                    return Err(not_active("cutoff"));
                }
            },
            SessionParam::Order => match self.filter() {
                FilterParams::LowPass { cutoff_hz, .. } => self
                    .pipeline
                    .set_filter(FilterParams::low_pass(cutoff_hz, value.round() as usize))?,
                FilterParams::MovingAverage { .. } => {
                    return Err(not_active("order"));
                }
            },
            SessionParam::WindowSize => match self.filter() {
                FilterParams::MovingAverage { .. } => self
                    .pipeline
                    .set_filter(FilterParams::moving_average(value.round() as usize))?,
                FilterParams::LowPass { .. } => {
                    return Err(not_active("window_size"));
                }
            },
        }
        debug!("{param:?} set to {value}");
        Ok(())
    }

    /// Move a parameter by `steps` increments of its range step.
    pub fn nudge(&mut self, param: SessionParam, steps: i32) -> Result<()> {
        let Some(current) = self.value(param) else {
            return Err(not_active(param.label()));
        };
        let step = self.range(param).step;
        self.set(param, current + step * steps as f64)
    }

    pub fn set_amplitude(&mut self, amplitude: f64) {
        self.harmonic.amplitude = self.config.ranges.amplitude.clamp(amplitude);
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.harmonic.frequency = self.config.ranges.frequency.clamp(frequency);
    }

    pub fn set_phase(&mut self, phase: f64) {
        self.harmonic.phase = self.config.ranges.phase.clamp(phase);
    }

    pub fn set_noise_mean(&mut self, mean: f64) {
        let mean = self.config.ranges.noise_mean.clamp(mean);
        self.set_noise(NoiseParams { mean, ..self.noise });
    }

    pub fn set_noise_variance(&mut self, variance: f64) {
        let variance = self.config.ranges.noise_variance.clamp(variance);
        self.set_noise(NoiseParams {
            variance,
            ..self.noise
        });
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f64) -> Result<()> {
        self.set(SessionParam::Cutoff, cutoff_hz)
    }

    pub fn set_order(&mut self, order: usize) -> Result<()> {
        self.set(SessionParam::Order, order as f64)
    }

    pub fn set_window_size(&mut self, window_size: usize) -> Result<()> {
        self.set(SessionParam::WindowSize, window_size as f64)
    }

    pub fn set_show_noise(&mut self, show: bool) {
        self.show_noise = show;
    }

    pub fn toggle_noise(&mut self) {
        self.show_noise = !self.show_noise;
    }

    fn set_noise(&mut self, noise: NoiseParams) {
        if noise != self.noise && self.config.policy.regenerate_on_noise_param_change {
            self.noise_dirty = true;
        }
        self.noise = noise;
    }

    /// Recompute the three series. On failure the previous set is kept and
    /// the error returned.
    pub fn evaluate(&mut self) -> Result<&SignalSet> {
        if self.show_noise && self.noise_dirty {
            self.pipeline.generate_noise(&self.noise)?;
            self.noise_dirty = false;
        }

        match self
            .pipeline
            .evaluate(&self.harmonic, &self.noise, self.show_noise)
        {
            Ok(set) => {
                self.current = set;
                Ok(&self.current)
            }
            Err(e) => {
                warn!("recomputation failed, keeping previous signals: {e}");
                Err(e)
            }
        }
    }

    /// Fresh noise draw with the current parameters, then recompute.
    pub fn regenerate_noise(&mut self) -> Result<&SignalSet> {
        self.pipeline.generate_noise(&self.noise)?;
        self.noise_dirty = false;
        self.evaluate()
    }

    /// Uniform random harmonic and noise parameters within their ranges,
    /// followed by a fresh noise draw.
    pub fn randomize(&mut self) -> Result<&SignalSet> {
        let ranges = self.config.ranges;
        let source = self.pipeline.source_mut();
        let harmonic = HarmonicParams {
            amplitude: source.uniform(ranges.amplitude.min, ranges.amplitude.max),
            frequency: source.uniform(ranges.frequency.min, ranges.frequency.max),
            phase: source.uniform(ranges.phase.min, ranges.phase.max),
        };
        let noise = NoiseParams {
            mean: source.uniform(ranges.noise_mean.min, ranges.noise_mean.max),
            variance: source.uniform(ranges.noise_variance.min, ranges.noise_variance.max),
        };

        debug!("randomized to {harmonic:?}, {noise:?}");
        self.harmonic = harmonic;
        self.noise = noise;
        self.regenerate_noise()
    }

    /// Back to the configured initial values with noise shown, followed by
    /// a fresh noise draw.
    pub fn reset(&mut self) -> Result<&SignalSet> {
        self.harmonic = self.config.harmonic;
        self.noise = self.config.noise;
        self.show_noise = true;
        self.pipeline.set_filter(self.config.filter)?;
        self.regenerate_noise()
    }

    /// Vertical plot bounds around the noisy series: whole numbers at least
    /// two units beyond its extremes.
    pub fn y_bounds(&self) -> (f64, f64) {
        let series = if self.current.noisy.is_empty() {
            &self.current.harmonic
        } else {
            &self.current.noisy
        };
        match min_max(series) {
            Some((lo, hi)) => ((lo - Y_MARGIN).floor(), (hi + Y_MARGIN).ceil()),
            None => (-Y_MARGIN, Y_MARGIN),
        }
    }
}

fn clamp_initial(config: &mut SessionConfig) {
    let ranges = config.ranges;
    let harmonic = &mut config.harmonic;
    harmonic.amplitude = ranges.amplitude.clamp(harmonic.amplitude);
    harmonic.frequency = ranges.frequency.clamp(harmonic.frequency);
    harmonic.phase = ranges.phase.clamp(harmonic.phase);

    let noise = &mut config.noise;
    noise.mean = ranges.noise_mean.clamp(noise.mean);
    noise.variance = ranges.noise_variance.clamp(noise.variance);

    config.filter = match config.filter {
        FilterParams::LowPass { cutoff_hz, order } => FilterParams::low_pass(
            ranges.cutoff.clamp(cutoff_hz),
            ranges.order.clamp(order as f64).round() as usize,
        ),
        FilterParams::MovingAverage { window_size } => FilterParams::moving_average(
            ranges.window_size.clamp(window_size as f64).round() as usize,
        ),
    };
}

fn not_active(name: &'static str) -> SignalError {
    SignalError::invalid(name, "not used by the active filter")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParamRanges;

    fn session(config: SessionConfig) -> DemoSession {
        DemoSession::new(config.seed(1234)).unwrap()
    }

    #[test]
    fn starts_with_a_full_signal_set() {
        let s = session(SessionConfig::default());
        assert_eq!(s.signals().len(), 1000);
        assert!(!s.pipeline().noise_cache().is_empty());
        assert_ne!(s.signals().noisy, s.signals().harmonic);
    }

    #[test]
    fn harmonic_changes_keep_the_noise_draw() {
        let mut s = session(SessionConfig::default());
        let before = s.pipeline().noise_cache().samples().unwrap().to_vec();

        s.set_amplitude(4.0);
        s.set_frequency(2.0);
        s.set_phase(1.0);
        let set = s.evaluate().unwrap().clone();

        let after = s.pipeline().noise_cache().samples().unwrap();
        assert_eq!(before, after);
        for i in 0..set.len() {
            assert!((set.noisy[i] - set.harmonic[i] - before[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn noise_change_redraws_under_default_policy() {
        let mut s = session(SessionConfig::default());
        let before = s.pipeline().noise_cache().samples().unwrap().to_vec();

        s.set_noise_variance(0.5);
        s.evaluate().unwrap();

        let cache = s.pipeline().noise_cache();
        assert_ne!(cache.samples().unwrap(), before.as_slice());
        assert_eq!(cache.params(), Some(NoiseParams::new(0.0, 0.5)));
    }

    #[test]
    fn noise_change_keeps_stale_draw_when_policy_disabled() {
        let mut s = session(SessionConfig::default().regenerate_on_noise_param_change(false));
        let before = s.pipeline().noise_cache().samples().unwrap().to_vec();

        s.set_noise_mean(0.8);
        s.evaluate().unwrap();

        let cache = s.pipeline().noise_cache();
        assert_eq!(cache.samples().unwrap(), before.as_slice());
        assert!(cache.is_stale_for(&s.noise()));

        s.regenerate_noise().unwrap();
        assert!(!s.pipeline().noise_cache().is_stale_for(&s.noise()));
    }

    #[test]
    fn hiding_noise_shows_the_bare_harmonic() {
        let mut s = session(SessionConfig::default());
        s.toggle_noise();
        let set = s.evaluate().unwrap();
        assert_eq!(set.noisy, set.harmonic);
    }

    #[test]
    fn setters_clamp_into_ranges() {
        let mut s = session(SessionConfig::default());
        s.set_amplitude(50.0);
        s.set_noise_variance(-3.0);
        s.set_cutoff(0.0).unwrap();
        assert_eq!(s.harmonic().amplitude, 10.0);
        assert_eq!(s.noise().variance, 0.0);
        assert_eq!(s.value(SessionParam::Cutoff), Some(0.1));
    }

    #[test]
    fn nudge_steps_by_range_increment() {
        let mut s = session(SessionConfig::default());
        s.nudge(SessionParam::Order, 2).unwrap();
        assert_eq!(s.filter(), FilterParams::low_pass(3.0, 7));
        s.nudge(SessionParam::Amplitude, -1).unwrap();
        assert!((s.harmonic().amplitude - 0.9).abs() < 1e-12);
        assert!(s.nudge(SessionParam::WindowSize, 1).is_err());
    }

    #[test]
    fn filter_params_follow_the_active_kind() {
        let mut s = session(SessionConfig::default().filter(FilterParams::moving_average(3)));
        assert!(s.params().contains(&SessionParam::WindowSize));
        assert!(!s.params().contains(&SessionParam::Cutoff));
        assert_eq!(s.value(SessionParam::Order), None);

        s.set_window_size(9).unwrap();
        assert_eq!(s.filter(), FilterParams::moving_average(9));
        assert!(s.set_cutoff(2.0).is_err());
    }

    #[test]
    fn failed_evaluation_keeps_previous_signals() {
        // 10 Hz sampling: a 10 Hz cutoff sits above Nyquist.
        let config = SessionConfig::default()
            .time_base(101, 0.0, 10.0)
            .filter(FilterParams::low_pass(3.0, 5));
        let mut s = session(config);
        let before = s.signals().clone();

        s.set_cutoff(10.0).unwrap();
        s.set_amplitude(5.0);
        let err = s.evaluate().unwrap_err();

        assert!(matches!(err, SignalError::InvalidParameter { name: "cutoff", .. }));
        assert_eq!(s.signals(), &before);
    }

    #[test]
    fn randomize_stays_in_ranges_and_redraws() {
        let mut s = session(SessionConfig::default());
        let before = s.pipeline().noise_cache().samples().unwrap().to_vec();
        s.randomize().unwrap();

        let ranges = s.config().ranges;
        assert!(ranges.amplitude.contains(s.harmonic().amplitude));
        assert!(ranges.frequency.contains(s.harmonic().frequency));
        assert!(ranges.phase.contains(s.harmonic().phase));
        assert!(ranges.noise_mean.contains(s.noise().mean));
        assert!(ranges.noise_variance.contains(s.noise().variance));
        assert_ne!(s.pipeline().noise_cache().samples().unwrap(), before.as_slice());
    }

    #[test]
    fn reset_restores_initial_values() {
        let mut s = session(SessionConfig::default());
        s.set_amplitude(7.0);
        s.set_noise_mean(0.5);
        s.set_cutoff(8.0).unwrap();
        s.set_show_noise(false);

        s.reset().unwrap();
        assert_eq!(s.harmonic(), HarmonicParams::default());
        assert_eq!(s.noise(), NoiseParams::default());
        assert_eq!(s.filter(), FilterParams::default());
        assert!(s.show_noise());
    }

    #[test]
    fn initial_values_are_clamped_into_ranges() {
        let s = session(
            SessionConfig::default()
                .harmonic(HarmonicParams::new(50.0, 0.0, 1.0))
                .noise(NoiseParams::new(-4.0, 3.0))
                .filter(FilterParams::low_pass(25.0, 40)),
        );
        assert_eq!(s.harmonic(), HarmonicParams::new(10.0, 0.1, 1.0));
        assert_eq!(s.noise(), NoiseParams::new(-1.0, 1.0));
        assert_eq!(s.filter(), FilterParams::low_pass(10.0, 10));

        let s = session(SessionConfig::default().filter(FilterParams::moving_average(99)));
        assert_eq!(s.filter(), FilterParams::moving_average(35));
    }

    #[test]
    fn inverted_range_is_rejected_up_front() {
        let mut ranges = ParamRanges::default();
        ranges.amplitude = ParamRange::new(5.0, 1.0, 0.1);
        assert!(matches!(
            DemoSession::new(SessionConfig::default().ranges(ranges)),
            Err(SignalError::InvalidParameter { name: "amplitude", .. })
        ));
    }

    #[test]
    fn y_bounds_wrap_the_noisy_series() {
        let mut s = session(SessionConfig::default());
        s.set_show_noise(false);
        s.set_amplitude(3.0);
        s.evaluate().unwrap();
        assert_eq!(s.y_bounds(), (-5.0, 5.0));
    }
}
