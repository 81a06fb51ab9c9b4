//! Command-line arguments: ten positional fields, in the fixed order the
//! reference driver uses.

use clap::Parser;

/// Compute a transverse flute's input impedance spectrum and tuning report.
#[derive(Debug, Parser)]
#[command(name = "flute-cli", version, about)]
pub struct CliArgs {
    /// Path to the flute description file (the `flute { ... }` grammar).
    pub input_file: String,

    /// Prefix for the output files: `<prefix>.fcb`, `<prefix>.fci`, `<prefix>.fct`.
    pub output_prefix: String,

    /// Reference pitch standard in Hz (A4, typically 440.0).
    pub pitch_standard: f64,

    /// Emit the `.fcb` bore profile when nonzero.
    pub emit_bore_flag: u8,

    /// Emit the `.fct` tuning report when nonzero.
    pub emit_tuning_flag: u8,

    /// Note name to sweep a single impedance spectrum for; empty string skips it.
    pub note_name: String,

    /// Octave of `note_name`.
    pub note_octave: i32,

    /// Start of the frequency sweep, in Hz.
    pub freq_start: f64,

    /// End of the frequency sweep, in Hz.
    pub freq_end: f64,

    /// Number of uniformly-spaced samples in the frequency sweep.
    pub nfreq: usize,
}
