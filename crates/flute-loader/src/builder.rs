//! Folds a [`ParsedFlute`] into a validated [`Instrument`].
//!
//! Mirrors `FluteParser::ProcessParsedData`: bore points and hole
//! positions share one position-keyed table, holes without an explicit
//! bore diameter inherit one by linear interpolation between their
//! neighboring explicit points, and the foot-most bore section is the
//! *second-to-last* table entry rather than the last.

use flute_acoustics::{
    BoreSection, Element, Embouchure, Fingering, FlangedEnd, Hole, Instrument, PaddedHole, PhysParams, Temperament,
};

use crate::ast::{ParsedFlute, ParsedHole, ParsedHoleKind};
use crate::error::LoaderError;

/// One position in the merged bore-point table. `diam` is `0.0` until an
/// explicit bore point or an interpolation pass assigns it, mirroring the
/// original's default-constructed sentinel.
struct BorePointEntry {
    pos: f64,
    diam: f64,
    hole: Option<ParsedHole>,
}

fn merge_bore_points(parsed: &ParsedFlute) -> Vec<BorePointEntry> {
    let mut entries: Vec<BorePointEntry> = Vec::new();

    let find_or_insert = |entries: &mut Vec<BorePointEntry>, pos: f64| -> usize {
        if let Some(idx) = entries.iter().position(|e| e.pos == pos) {
            idx
        } else {
            entries.push(BorePointEntry { pos, diam: 0.0, hole: None });
            entries.len() - 1
        }
    };

    for &(pos, diam) in &parsed.bore_points {
        let idx = find_or_insert(&mut entries, pos);
        entries[idx].diam = diam;
    }
    for hole in &parsed.holes {
        let idx = find_or_insert(&mut entries, hole.pos);
        entries[idx].hole = Some(hole.clone());
    }

    entries.sort_by(|a, b| a.pos.partial_cmp(&b.pos).expect("bore positions are never NaN"));
    entries
}

/// Assign each hole-bearing entry's diameter by interpolating between the
/// nearest explicit bore points on either side, exactly as
/// `ProcessParsedData`'s "set the diameter at the holes" pass does.
fn interpolate_hole_diameters(entries: &mut [BorePointEntry]) -> Result<(), LoaderError> {
    let mut prev: Option<usize> = None;
    let mut cur = 0;
    while cur < entries.len() {
        if entries[cur].hole.is_some() {
            let mut next = cur;
            while entries[next].diam == 0.0 {
                next += 1;
                if next >= entries.len() {
                    return Err(LoaderError::HoleAtBoreEdge);
                }
            }
            let prev_idx = prev.ok_or(LoaderError::HoleAtBoreEdge)?;

            let l_total = entries[next].pos - entries[prev_idx].pos;
            let l_here = entries[cur].pos - entries[prev_idx].pos;
            let d1 = entries[prev_idx].diam;
            let d3 = entries[next].diam;
            entries[cur].diam = d1 + (d3 - d1) * l_here / l_total;
            prev = Some(cur);
        } else {
            prev = Some(cur);
        }
        cur += 1;
    }
    Ok(())
}

fn build_hole_element(entry_diam: f64, hole: &ParsedHole) -> Result<Element, LoaderError> {
    let r_bore = 0.5 * entry_diam;
    let r_hole = 0.5 * hole.diam;
    match hole.kind {
        ParsedHoleKind::Plain => {
            Ok(Element::Hole(Hole::new(r_bore, r_hole, hole.depth, false, hole.edge_rc)?))
        }
        ParsedHoleKind::Silver { pad_height, pad_diam } => Ok(Element::PaddedHole(PaddedHole::new(
            r_bore,
            r_hole,
            hole.depth,
            false,
            hole.edge_rc,
            pad_height,
            0.5 * pad_diam,
        )?)),
    }
}

/// Assemble and validate an [`Instrument`] from a parsed description.
pub fn build(parsed: ParsedFlute, ref_pitch: f64) -> Result<Instrument, LoaderError> {
    let params = PhysParams::at_temperature(parsed.temp_c);

    let mut entries = merge_bore_points(&parsed);
    if entries.is_empty() || entries[0].pos != 0.0 {
        return Err(LoaderError::MissingOriginBorePoint);
    }
    interpolate_hole_diameters(&mut entries)?;

    if entries.len() < 2 {
        return Err(LoaderError::MissingFinalBoreSection);
    }

    let bore_sections: Vec<BoreSection> = entries
        .windows(2)
        .map(|pair| {
            let length = pair[1].pos - pair[0].pos;
            BoreSection::new(length, 0.5 * pair[0].diam, 0.5 * pair[1].diam)
        })
        .collect::<Result<_, _>>()?;

    let mut elements = Vec::new();
    if let Some(emb) = &parsed.embouchure {
        let r_bore = 0.5 * emb.diam.unwrap_or(entries[0].diam);
        elements.push(Element::Embouchure(Embouchure::new(r_bore, emb.char_dim, emb.cav_length)?));
    }

    for (i, entry) in entries.iter().enumerate() {
        if let Some(hole) = &entry.hole {
            elements.push(build_hole_element(entry.diam, hole)?);
        }
        if i < bore_sections.len() {
            elements.push(Element::Bore(bore_sections[i]));
        }
    }

    // The foot-most bore section is the second-to-last table entry's
    // section, not the last entry's: mirrors `--last_it; --last_it;`.
    let terminal_section = bore_sections[bore_sections.len() - 1];
    let termination = parsed.termination.ok_or(LoaderError::MissingFinalBoreSection)?;
    let terminal = FlangedEnd::new(terminal_section, 0.5 * termination.flange_diam)?;

    let fingerings = parsed
        .notes
        .iter()
        .map(|note| Fingering {
            name: note.name.clone(),
            octave: note.octave,
            holes_closed: note
                .hole_config
                .chars()
                .filter_map(|c| match c {
                    'x' => Some(true),
                    'o' => Some(false),
                    _ => None,
                })
                .collect(),
        })
        .collect();

    Ok(Instrument::new(
        elements,
        terminal,
        fingerings,
        Temperament::equal_temperament(),
        ref_pitch,
        params,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    const SILVER_FLUTE: &str = r#"
        flute {
            notes {
                allClosed = "xx"
                allOpen = "oo"
            }
            parameters { temp = 20.0 length-units = mm }
            bore {
                from [ 0.0 , 19.0 ] [ 50.0 , 19.0 ] [ 100.0 , 18.0 ] [ 300.0 , 17.0 ]
            }
            embouchure @ 0.0 char-dim = 10.0 cav-length = 5.0
            termination @ 300.0 flange-diam = 30.0
            holes {
                hole @ 50.0 diam = 8.0 depth = 3.0
                silver-flute-hole @ 100.0 diam = 9.0 depth = 3.0 pad { height = 2.0 diam = 14.0 }
            }
        }
    "#;

    #[test]
    fn test_builds_instrument_with_interpolated_hole_diameters() {
        let parsed = parse(SILVER_FLUTE).unwrap();
        let instrument = build(parsed, 440.0).unwrap();
        let z = instrument.compute_z(600.0);
        assert!(z.norm().is_finite());
    }

    #[test]
    fn test_fingering_round_trip_all_closed_and_all_open() {
        let parsed = parse(SILVER_FLUTE).unwrap();
        let mut instrument = build(parsed, 440.0).unwrap();

        instrument.set_fingering("allClosed", 0).unwrap();
        for element in instrument.elements() {
            if let Some(closed) = element.is_closed() {
                assert!(closed);
            }
        }

        instrument.set_fingering("allOpen", 0).unwrap();
        for element in instrument.elements() {
            if let Some(closed) = element.is_closed() {
                assert!(!closed);
            }
        }
    }

    #[test]
    fn test_missing_origin_bore_point_is_rejected() {
        let src = r#"
            flute {
                parameters { temp = 20.0 length-units = mm }
                bore { from [ 10.0 , 19.0 ] [ 300.0 , 17.0 ] }
                embouchure @ 0.0 char-dim = 10.0 cav-length = 5.0
                termination @ 300.0 flange-diam = 30.0
            }
        "#;
        let parsed = parse(src).unwrap();
        assert!(matches!(build(parsed, 440.0), Err(LoaderError::MissingOriginBorePoint)));
    }

    #[test]
    fn test_hole_coinciding_with_explicit_bore_point_keeps_its_own_diameter() {
        let src = r#"
            flute {
                parameters { temp = 20.0 length-units = mm }
                bore { from [ 0.0 , 19.0 ] [ 50.0 , 18.5 ] [ 300.0 , 17.0 ] }
                embouchure @ 0.0 char-dim = 10.0 cav-length = 5.0
                termination @ 300.0 flange-diam = 30.0
                holes { hole @ 50.0 diam = 8.0 depth = 3.0 }
            }
        "#;
        let parsed = parse(src).unwrap();
        let instrument = build(parsed, 440.0).unwrap();
        let bore_section_at_hole = instrument
            .elements()
            .iter()
            .filter_map(|e| e.as_bore_section())
            .nth(0)
            .unwrap();
        assert!((bore_section_at_hole.r_right() - 0.0185 / 2.0).abs() < 1e-9);
    }
}
