//! signal-lab - noisy harmonic signal with live filtering
//!
//! Run with: cargo run -- tui

mod cli;
mod render;
mod ui;

use std::fs::File;

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use env_logger::{Env, Target};

use cli::{Cli, Command, TuiArgs};
use signal_lab::DemoSession;
use ui::UiApp;

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match cli.command {
        Command::Tui(args) => run_tui(args),
        Command::Render(args) => {
            env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
            render::run(&args)
        }
    }
}

fn run_tui(args: TuiArgs) -> EyreResult<()> {
    // Logging to the terminal would tear the alternate screen.
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
        env_logger::Builder::from_env(Env::default().default_filter_or("debug"))
            .target(Target::Pipe(Box::new(file)))
            .init();
    }

    let session = DemoSession::new(args.signal.to_config())
        .wrap_err("failed to build the initial signal")?;
    let mut app = UiApp::new(session);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
