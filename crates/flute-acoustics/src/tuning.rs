//! Per-fingering tuning analysis: nominal pitch vs. nearest impedance
//! minimum within a narrow band.

use tracing::warn;

use crate::instrument::Instrument;
use crate::spectrum::ImpedanceSpectrum;

const SEMITONE: f64 = 1.059_463_094_359_295_3; // 2^(1/12)
const BAND_SEMITONES: i32 = 4;

/// One line of a tuning report: a fingering's nominal frequency and its
/// deviation from the nearest impedance minimum, if one was found within
/// the search band.
#[derive(Debug, Clone)]
pub struct TuningLine {
    pub note: String,
    pub octave: i32,
    pub nominal_hz: f64,
    /// Signed cents deviation of the nearest minimum from nominal, or
    /// `None` if no minimum fell within the +-4 semitone band.
    pub cents_deviation: Option<f64>,
}

/// For a single fingering, sweep a band of `r^(+-4)` around its nominal
/// frequency (r = 2^(1/12)) and find the impedance minimum closest to
/// nominal, at `nfreq` samples across the band.
pub fn tune_one(instrument: &Instrument, note: &str, octave: i32, nominal_hz: f64, nfreq: usize) -> TuningLine {
    let band_factor = SEMITONE.powi(BAND_SEMITONES);
    let f_start = nominal_hz / band_factor;
    let f_end = nominal_hz * band_factor;

    let spectrum = ImpedanceSpectrum::scan(f_start, f_end, nfreq, |f| instrument.compute_z(f));
    let cents_deviation = spectrum
        .minimum_nearest(nominal_hz)
        .map(|f_min| 1200.0 * (f_min / nominal_hz).log2());

    if cents_deviation.is_none() {
        warn!(note, octave, "no impedance minimum found within tuning band");
    }

    TuningLine {
        note: note.to_string(),
        octave,
        nominal_hz,
        cents_deviation,
    }
}

/// Run `tune_one` over every given (note, octave) pair registered as a
/// fingering, mutating the instrument's fingering state in turn.
pub fn tuning_report(instrument: &mut Instrument, note_octaves: &[(String, i32)], nfreq: usize) -> Vec<TuningLine> {
    let mut lines = Vec::with_capacity(note_octaves.len());
    for (note, octave) in note_octaves {
        if instrument.set_fingering(note, *octave).is_err() {
            continue;
        }
        let nominal_hz = instrument
            .temperament()
            .get_frequency(note, *octave, instrument.ref_pitch())
            .unwrap_or(instrument.ref_pitch());
        lines.push(tune_one(instrument, note, *octave, nominal_hz, nfreq));
    }
    lines
}
