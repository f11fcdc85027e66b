//! Spectrum widget
//!
//! FFT magnitude of the noisy and filtered series, so the effect of the
//! low-pass shows up as the high end dropping away.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f64::consts::PI;
use std::sync::Arc;

/// Floor for displayed magnitudes (dB)
const FLOOR_DB: f64 = -80.0;

pub struct SpectrumAnalyzer {
    /// Hann window coefficients
    window: Vec<f64>,
    fft: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex<f64>>,
    /// Hz per FFT bin
    bin_width: f64,
    /// (frequency_hz, magnitude_db) for bins up to Nyquist
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(buffer_len: usize, sample_rate: f64) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer_len);

        let window: Vec<f64> = (0..buffer_len)
            .map(|i| {
                if buffer_len > 1 {
                    let denom = (buffer_len - 1) as f64;
                    0.5 * (1.0 - (2.0 * PI * i as f64 / denom).cos())
                } else {
                    1.0
                }
            })
            .collect();

        let bin_width = if buffer_len > 0 {
            sample_rate / buffer_len as f64
        } else {
            0.0
        };
        let half = buffer_len / 2;
        let spectrum = (0..half).map(|k| (k as f64 * bin_width, FLOOR_DB)).collect();

        Self {
            window,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            bin_width,
            spectrum,
        }
    }

    /// Recompute from `buffer`. Ignored if its length does not match.
    pub fn update(&mut self, buffer: &[f64]) {
        if buffer.len() != self.window.len() || buffer.is_empty() {
            return;
        }

        for (slot, (&sample, &w)) in self.scratch.iter_mut().zip(buffer.iter().zip(&self.window)) {
            *slot = Complex::new(sample * w, 0.0);
        }

        self.fft.process(&mut self.scratch);

        let scale = 2.0 / buffer.len() as f64;
        for (k, (freq, magnitude_db)) in self.spectrum.iter_mut().enumerate() {
            let magnitude = (self.scratch[k].norm() * scale).max(1e-12);
            *freq = k as f64 * self.bin_width;
            *magnitude_db = (20.0 * magnitude.log10()).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, noisy: &[(f64, f64)], filtered: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let datasets = vec![
        Dataset::default()
            .name("noisy")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(noisy),
        Dataset::default()
            .name("filtered")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(filtered),
    ];

    let max_freq = noisy
        .iter()
        .map(|(f, _)| *f)
        .fold(0.0, f64::max)
        .max(1.0);
    let max_db = noisy
        .iter()
        .chain(filtered)
        .map(|(_, db)| *db)
        .fold(FLOOR_DB, f64::max);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, max_freq])
                .labels(vec!["0 Hz".to_string(), format!("{max_freq:.0} Hz")])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, max_db.max(0.0) + 10.0])
                .labels(vec!["-80", "-40", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
