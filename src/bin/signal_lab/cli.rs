//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use signal_lab::{FilterParams, HarmonicParams, NoiseParams, SessionConfig};

#[derive(Parser, Debug)]
#[command(name = "signal-lab", version, about = "Noisy harmonic signal with live filtering")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive terminal view with adjustable parameters
    Tui(TuiArgs),
    /// Evaluate once and write `t,harmonic,noisy,filtered` as CSV
    Render(RenderArgs),
}

#[derive(Args, Debug)]
pub struct TuiArgs {
    #[command(flatten)]
    pub signal: SignalArgs,

    /// Write logs here; without it, logging is off while the TUI runs
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub signal: SignalArgs,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterChoice {
    Lowpass,
    MovingAverage,
}

#[derive(Args, Debug, Clone)]
pub struct SignalArgs {
    /// Number of samples in the time base
    #[arg(long, default_value_t = 1000)]
    pub samples: usize,

    /// First sample time (s)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub start: f64,

    /// Last sample time (s)
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub end: f64,

    #[arg(long, default_value_t = 1.0)]
    pub amplitude: f64,

    /// Frequency in Hz
    #[arg(long, default_value_t = 1.0)]
    pub frequency: f64,

    /// Phase in radians
    #[arg(long, default_value_t = 0.0)]
    pub phase: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub noise_mean: f64,

    #[arg(long, default_value_t = 0.1)]
    pub noise_variance: f64,

    /// Hide the noise (noisy series equals the harmonic)
    #[arg(long)]
    pub no_noise: bool,

    #[arg(long, value_enum, default_value_t = FilterChoice::Lowpass)]
    pub filter: FilterChoice,

    /// Low-pass cutoff in Hz
    #[arg(long, default_value_t = 3.0)]
    pub cutoff: f64,

    /// Low-pass Butterworth order
    #[arg(long, default_value_t = 5)]
    pub order: usize,

    /// Moving-average window in samples
    #[arg(long, default_value_t = 3)]
    pub window: usize,

    /// Seed for reproducible noise
    #[arg(long)]
    pub seed: Option<u64>,

    /// Keep the current noise draw when mean or variance change
    #[arg(long)]
    pub keep_stale_noise: bool,
}

impl SignalArgs {
    pub fn to_config(&self) -> SessionConfig {
        let filter = match self.filter {
            FilterChoice::Lowpass => FilterParams::low_pass(self.cutoff, self.order),
            FilterChoice::MovingAverage => FilterParams::moving_average(self.window),
        };

        let config = SessionConfig::new()
            .time_base(self.samples, self.start, self.end)
            .harmonic(HarmonicParams::new(self.amplitude, self.frequency, self.phase))
            .noise(NoiseParams::new(self.noise_mean, self.noise_variance))
            .filter(filter)
            .show_noise(!self.no_noise)
            .regenerate_on_noise_param_change(!self.keep_stale_noise);

        match self.seed {
            Some(seed) => config.seed(seed),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_session_defaults() {
        let cli = Cli::parse_from(["signal-lab", "render"]);
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.signal.to_config(), SessionConfig::default());
    }

    #[test]
    fn moving_average_flags() {
        let cli = Cli::parse_from([
            "signal-lab",
            "tui",
            "--filter",
            "moving-average",
            "--window",
            "9",
            "--seed",
            "5",
            "--keep-stale-noise",
            "--noise-mean",
            "-0.5",
        ]);
        let Command::Tui(args) = cli.command else {
            panic!("expected tui");
        };
        let config = args.signal.to_config();
        assert_eq!(config.filter, FilterParams::moving_average(9));
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.noise.mean, -0.5);
        assert!(!config.policy.regenerate_on_noise_param_change);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
