//! Signal chart: harmonic, noisy and filtered series over time

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use signal_lab::SignalSet;

fn points(times: &[f64], values: &[f64]) -> Vec<(f64, f64)> {
    times.iter().copied().zip(values.iter().copied()).collect()
}

pub fn render_signals(
    frame: &mut Frame,
    area: Rect,
    times: &[f64],
    signals: &SignalSet,
    show_noise: bool,
    y_bounds: (f64, f64),
) {
    let block = Block::default().title(" Signal ").borders(Borders::ALL);

    let harmonic = points(times, &signals.harmonic);
    let noisy = points(times, &signals.noisy);
    let filtered = points(times, &signals.filtered);

    let mut datasets = Vec::with_capacity(3);
    if show_noise {
        datasets.push(
            Dataset::default()
                .name("noisy")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Red))
                .data(&noisy),
        );
    }
    datasets.push(
        Dataset::default()
            .name("harmonic")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&harmonic),
    );
    datasets.push(
        Dataset::default()
            .name("filtered")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&filtered),
    );

    let (t0, t1) = match (times.first(), times.last()) {
        (Some(&a), Some(&b)) => (a, b),
        _ => (0.0, 1.0),
    };
    let (y0, y1) = y_bounds;

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([t0, t1])
                .labels(vec![format!("{t0:.1}"), format!("{t1:.1}")])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([y0, y1])
                .labels(vec![format!("{y0:.0}"), "0".to_string(), format!("{y1:.0}")])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
