//! Note naming and frequency lookup under a named tuning system.

/// A single pitch class: a name and its cents offset from the
/// temperament's reference note within an octave. Enharmonic spellings
/// (C#/Db, D#/Eb, ...) share the same cents value.
#[derive(Debug, Clone)]
pub struct Note {
    pub name: String,
    pub cents: f64,
}

/// An ordered collection of [`Note`]s spanning one octave (0..1200 cents),
/// against which frequencies and note names can be converted.
#[derive(Debug, Clone)]
pub struct Temperament {
    notes: Vec<Note>,
}

impl Temperament {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// The standard twelve-tone equal temperament, seeded with sharp and
    /// flat spellings for the five black keys and anchored to A=0 cents,
    /// matching the reference pitch standard used throughout the system.
    /// Note-lookup order matters for enharmonic ties: the sharp spelling
    /// is listed first, so it is the first match in a name-order scan.
    pub fn equal_temperament() -> Self {
        let seeds: &[(&str, f64)] = &[
            ("C", -900.0),
            ("C#", -800.0),
            ("Db", -800.0),
            ("D", -700.0),
            ("D#", -600.0),
            ("Eb", -600.0),
            ("E", -500.0),
            ("F", -400.0),
            ("F#", -300.0),
            ("Gb", -300.0),
            ("G", -200.0),
            ("G#", -100.0),
            ("Ab", -100.0),
            ("A", 0.0),
            ("A#", 100.0),
            ("Bb", 100.0),
            ("B", 200.0),
        ];
        Self::new(
            seeds
                .iter()
                .map(|(name, cents)| Note {
                    name: (*name).to_string(),
                    cents: *cents,
                })
                .collect(),
        )
    }

    /// Frequency of `note` in the given `octave`, relative to the
    /// reference pitch `ref_hz` at octave 0.
    pub fn get_frequency(&self, note: &str, octave: i32, ref_hz: f64) -> Option<f64> {
        let cents = self.notes.iter().find(|n| n.name == note)?.cents;
        Some(ref_hz * 2f64.powf(cents / 1200.0) * 2f64.powi(octave))
    }

    /// The nearest named note to frequency `f`, given reference pitch
    /// `ref_hz` at octave 0. Returns (name, octave, signed cents
    /// deviation). Scans the enclosing octave's notes plus one wrapped
    /// neighbor on each side, so a frequency near an octave boundary can
    /// still match the note just across it.
    pub fn nearest_note(&self, f: f64, ref_hz: f64) -> (String, i32, f64) {
        let lowest_cents = self
            .notes
            .iter()
            .map(|n| n.cents)
            .fold(f64::INFINITY, f64::min);

        let total_cents = 1200.0 * (f / ref_hz).log2() - lowest_cents;
        let octave = (total_cents / 1200.0).floor() as i32;
        let cents_in_octave = total_cents - 1200.0 * octave as f64;

        let mut best: Option<(String, i32, f64)> = None;

        for delta_octave in [-1, 0, 1] {
            for note in &self.notes {
                let candidate_cents = note.cents + 1200.0 * delta_octave as f64;
                let deviation = cents_in_octave - candidate_cents;
                let abs_dev = deviation.abs();
                if best.as_ref().map(|(_, _, d)| abs_dev < d.abs()).unwrap_or(true) {
                    best = Some((note.name.clone(), octave - delta_octave, deviation));
                }
            }
        }

        best.expect("temperament has at least one note")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_frequency_octave_above_reference() {
        let t = Temperament::equal_temperament();
        assert!((t.get_frequency("A", 1, 440.0).unwrap() - 880.0).abs() < 1e-9);
    }

    #[test]
    fn test_get_frequency_below_reference() {
        let t = Temperament::equal_temperament();
        let expected = 440.0 * 2f64.powf(-9.0 / 12.0);
        assert!((t.get_frequency("C", 0, 440.0).unwrap() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_nearest_note_sharp_below_reference() {
        let t = Temperament::equal_temperament();
        let (name, octave, cents) = t.nearest_note(466.0, 440.0);
        assert!(name == "A#" || name == "Bb");
        assert_eq!(octave, 0);
        assert!((cents - (-1.8)).abs() < 0.2, "cents = {cents}");
    }

    #[test]
    fn test_cents_round_trip_for_every_seed_note() {
        let t = Temperament::equal_temperament();
        // Use only the sharp spellings, since Db/Eb/... are exact
        // enharmonic ties and the first-match scan may return either name.
        let names = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
        for name in names {
            let f = t.get_frequency(name, 0, 440.0).unwrap();
            let (_, octave, cents) = t.nearest_note(f, 440.0);
            assert_eq!(octave, 0);
            assert!(cents.abs() < 1e-6, "{name}: cents = {cents}");
        }
    }

    #[test]
    fn test_unknown_note_name_returns_none() {
        let t = Temperament::equal_temperament();
        assert!(t.get_frequency("H", 0, 440.0).is_none());
    }
}
