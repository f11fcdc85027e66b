//! One-shot evaluation written as CSV

use std::fs::File;
use std::io::{self, BufWriter, Write};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use log::info;

use signal_lab::analysis::SignalStats;
use signal_lab::{DemoSession, SignalSet};

use crate::cli::RenderArgs;

pub fn run(args: &RenderArgs) -> EyreResult<()> {
    let session = DemoSession::new(args.signal.to_config())
        .wrap_err("failed to evaluate the signal pipeline")?;
    let signals = session.signals();

    let noisy = SignalStats::from_signal(&signals.noisy);
    let filtered = SignalStats::from_signal(&signals.filtered);
    info!(
        "noisy variance {:.4}, filtered variance {:.4}",
        noisy.variance, filtered.variance
    );

    let times = session.pipeline().time_base().times();
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("failed to create {}", path.display()))?;
            write_csv(BufWriter::new(file), times, signals)?;
            info!("wrote {} rows to {}", times.len(), path.display());
        }
        None => write_csv(BufWriter::new(io::stdout().lock()), times, signals)?,
    }
    Ok(())
}

fn write_csv<W: Write>(mut out: W, times: &[f64], signals: &SignalSet) -> EyreResult<()> {
    writeln!(out, "t,harmonic,noisy,filtered")?;
    for (i, t) in times.iter().enumerate() {
        writeln!(
            out,
            "{},{},{},{}",
            t, signals.harmonic[i], signals.noisy[i], signals.filtered[i]
        )?;
    }
    out.flush()?;
    Ok(())
}
