//! Parameter panel - one row per adjustable value with a slider bar

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use signal_lab::{DemoSession, ParamRange, SessionParam};

const BAR_WIDTH: usize = 12;

fn slider(range: ParamRange, value: f64) -> String {
    let span = range.max - range.min;
    let frac = if span > 0.0 {
        ((value - range.min) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (frac * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn render_params(frame: &mut Frame, area: Rect, session: &DemoSession, selected: SessionParam) {
    let block = Block::default().title(" Parameters ").borders(Borders::ALL);

    let mut lines = Vec::new();
    for param in session.params() {
        let Some(value) = session.value(param) else {
            continue;
        };
        let is_selected = param == selected;
        let label_style = if is_selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let marker = if is_selected { "▶ " } else { "  " };

        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{}", param.label()), label_style),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                slider(session.range(param), value),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(format!(" {value:>6.2}"), Style::default().fg(Color::Gray)),
        ]));
    }

    lines.push(Line::from(""));
    let noise_state = if session.show_noise() { "on" } else { "off" };
    lines.push(Line::from(Span::styled(
        format!("  Noise: {noise_state}"),
        Style::default().fg(Color::Magenta),
    )));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
