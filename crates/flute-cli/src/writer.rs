//! Tab-separated output writers for `.fcb`, `.fci`, and `.fct`, matching
//! the reference `output_bore`/`FluteCalc0.cc` writers: no header row, one
//! record per line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use flute_acoustics::{ChainElement, Element, ImpedanceSpectrum, Instrument};
use flute_acoustics::tuning::TuningLine;

/// Write the bore profile: one line for the head diameter, then one line
/// per bore section giving its foot diameter at the updated running length.
pub fn write_bore_profile(instrument: &Instrument, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let mut running_length = 0.0f64;
    let mut wrote_head = false;
    for element in instrument.elements() {
        if let Element::Bore(bore) = element {
            if !wrote_head {
                writeln!(out, "{}\t{}", running_length, 2.0 * bore.r_left())?;
                wrote_head = true;
            }
            running_length += bore.length();
            writeln!(out, "{}\t{}", running_length, 2.0 * bore.r_right())?;
        }
    }
    Ok(())
}

/// Write the per-frequency impedance spectrum in ascending frequency order.
pub fn write_spectrum(spectrum: &ImpedanceSpectrum, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);

    for (f, z) in spectrum.frequencies().iter().zip(spectrum.impedances()) {
        writeln!(out, "{}\t{}\t{}\t{}", f, z.norm(), z.re, z.im)?;
    }
    Ok(())
}

/// Write the tuning report, one line per fingering that resonated within
/// its search band. Out-of-band fingerings are skipped (and were already
/// logged by `tune_one`).
pub fn write_tuning_report(lines: &[TuningLine], path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);

    for line in lines {
        if let Some(cents) = line.cents_deviation {
            writeln!(out, "{}\t{}\t{}\t{}", line.note, line.octave, line.nominal_hz, cents)?;
        }
    }
    Ok(())
}
