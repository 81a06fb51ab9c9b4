//! Binary driver: load a flute description, compute its impedance
//! spectrum and tuning report, and write the requested output files.

mod args;
mod writer;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use flute_acoustics::{tuning, ImpedanceSpectrum};
use tracing::info;

use args::CliArgs;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = CliArgs::parse();
    run(&cli)
}

fn run(cli: &CliArgs) -> Result<()> {
    let source = fs::read_to_string(&cli.input_file)
        .with_context(|| format!("reading {}", cli.input_file))?;

    let mut instrument = flute_loader::load(&source, cli.pitch_standard)
        .with_context(|| format!("loading {}", cli.input_file))?;
    info!(file = %cli.input_file, "loaded instrument");

    if cli.emit_bore_flag != 0 {
        let path = PathBuf::from(format!("{}.fcb", cli.output_prefix));
        writer::write_bore_profile(&instrument, &path)?;
        info!(path = %path.display(), "wrote bore profile");
    }

    if !cli.note_name.is_empty() {
        instrument
            .set_fingering(&cli.note_name, cli.note_octave)
            .with_context(|| format!("note {} octave {} is not a known fingering", cli.note_name, cli.note_octave))?;

        let spectrum = ImpedanceSpectrum::scan(cli.freq_start, cli.freq_end, cli.nfreq, |f| {
            instrument.compute_z(f)
        });
        let path = PathBuf::from(format!("{}.fci", cli.output_prefix));
        writer::write_spectrum(&spectrum, &path)?;
        info!(path = %path.display(), "wrote impedance spectrum");
    }

    if cli.emit_tuning_flag != 0 {
        let note_octaves: Vec<(String, i32)> = instrument
            .fingerings()
            .map(|(name, octave)| (name.to_string(), octave))
            .collect();
        let report = tuning::tuning_report(&mut instrument, &note_octaves, cli.nfreq);
        let path = PathBuf::from(format!("{}.fct", cli.output_prefix));
        writer::write_tuning_report(&report, &path)?;
        info!(path = %path.display(), "wrote tuning report");
    }

    Ok(())
}
