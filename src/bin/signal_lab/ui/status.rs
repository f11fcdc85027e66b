//! Status bar - sampling info, filter, series statistics or the last error

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use signal_lab::analysis::SignalStats;
use signal_lab::{DemoSession, FilterParams};

fn describe_filter(filter: FilterParams) -> String {
    match filter {
        FilterParams::LowPass { cutoff_hz, order } => {
            format!("Butterworth LP {cutoff_hz:.1} Hz, order {order}")
        }
        FilterParams::MovingAverage { window_size } => format!("Moving avg, window {window_size}"),
    }
}

pub fn render_status(frame: &mut Frame, area: Rect, session: &DemoSession, error: Option<&str>) {
    let block = Block::default().title(" signal-lab ").borders(Borders::ALL);

    let time_base = session.pipeline().time_base();
    let mut spans = vec![
        Span::styled(
            format!(" {} samples @ {:.2} Hz  ", time_base.len(), time_base.sampling_rate()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{}  ", describe_filter(session.filter())),
            Style::default().fg(Color::White),
        ),
    ];

    match error {
        Some(message) => spans.push(Span::styled(
            format!("Error: {message}"),
            Style::default().fg(Color::Red),
        )),
        None => {
            let signals = session.signals();
            let noisy = SignalStats::from_signal(&signals.noisy);
            let filtered = SignalStats::from_signal(&signals.filtered);
            spans.push(Span::styled(
                format!(
                    "Var noisy: {:.3}  filtered: {:.3}  RMS: {:.3}",
                    noisy.variance, filtered.variance, filtered.rms
                ),
                Style::default().fg(Color::Magenta),
            ));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
