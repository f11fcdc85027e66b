//! TUI module for signal-lab
//!
//! Parameter list on the left, the three signal series and their spectrum
//! on the right. Every key press is a direct call into the session.

mod chart;
mod params;
mod spectrum;
mod status;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::warn;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use std::time::Duration;

use signal_lab::{DemoSession, Result as SignalResult, SessionParam, SignalSet};

use chart::render_signals;
use params::render_params;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::render_status;

/// UI application state
pub struct UiApp {
    session: DemoSession,
    /// Index into `session.params()`
    selected: usize,
    /// Last recomputation error, shown until the next success
    last_error: Option<String>,
    noisy_spectrum: SpectrumAnalyzer,
    filtered_spectrum: SpectrumAnalyzer,
    should_quit: bool,
}

impl UiApp {
    pub fn new(session: DemoSession) -> Self {
        let time_base = session.pipeline().time_base();
        let (len, rate) = (time_base.len(), time_base.sampling_rate());
        let mut app = Self {
            session,
            selected: 0,
            last_error: None,
            noisy_spectrum: SpectrumAnalyzer::new(len, rate),
            filtered_spectrum: SpectrumAnalyzer::new(len, rate),
            should_quit: false,
        };
        app.refresh_spectra();
        app
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn selected_param(&self) -> SessionParam {
        let params = self.session.params();
        params[self.selected.min(params.len() - 1)]
    }

    fn handle_key(&mut self, key: KeyCode) {
        let count = self.session.params().len();
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.selected = (self.selected + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Tab => {
                self.selected = (self.selected + 1) % count;
            }
            KeyCode::Left => self.nudge(-1),
            KeyCode::Right => self.nudge(1),
            KeyCode::PageDown => self.nudge(-10),
            KeyCode::PageUp => self.nudge(10),
            KeyCode::Char('n') => {
                self.session.toggle_noise();
                let outcome = self.session.evaluate().map(|_| ());
                self.apply(outcome);
            }
            KeyCode::Char('g') => {
                let outcome = self.session.regenerate_noise().map(|_| ());
                self.apply(outcome);
            }
            KeyCode::Char('r') => {
                let outcome = self.session.randomize().map(|_| ());
                self.apply(outcome);
            }
            KeyCode::Char('0') => {
                let outcome = self.session.reset().map(|_| ());
                self.apply(outcome);
            }
            _ => {}
        }
    }

    fn nudge(&mut self, steps: i32) {
        let param = self.selected_param();
        let outcome = self
            .session
            .nudge(param, steps)
            .and_then(|_| self.session.evaluate().map(|_| ()));
        self.apply(outcome);
    }

    fn apply(&mut self, outcome: SignalResult<()>) {
        match outcome {
            Ok(()) => {
                self.last_error = None;
                self.refresh_spectra();
            }
            Err(e) => {
                warn!("{e}");
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn refresh_spectra(&mut self) {
        let SignalSet {
            noisy, filtered, ..
        } = self.session.signals();
        self.noisy_spectrum.update(noisy);
        self.filtered_spectrum.update(filtered);
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),   // Parameters + charts
                Constraint::Length(3), // Status bar
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(20)])
            .split(rows[0]);

        let plots = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[1]);

        render_params(frame, columns[0], &self.session, self.selected_param());
        render_signals(
            frame,
            plots[0],
            self.session.pipeline().time_base().times(),
            self.session.signals(),
            self.session.show_noise(),
            self.session.y_bounds(),
        );
        render_spectrum(
            frame,
            plots[1],
            self.noisy_spectrum.data(),
            self.filtered_spectrum.data(),
        );
        render_status(frame, rows[1], &self.session, self.last_error.as_deref());

        let help = Paragraph::new(
            " [↑↓] Select  [←→] Adjust  [N] Noise on/off  [G] Regenerate  [R] Random  [0] Reset  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[2]);
    }
}
