//! The assembled instrument: ordered chain of elements, terminal load,
//! fingering table, and temperament reference.

use std::collections::HashMap;

use num_complex::Complex64;
use tracing::debug;

use crate::constants::PhysParams;
use crate::elements::{ChainElement, Element};
use crate::error::{InstrumentError, ValidationError};
use crate::temperament::Temperament;
use crate::terminal::{FlangedEnd, Terminal};
use crate::transfer_matrix::TransferMatrix;

/// A named fingering: one open/closed flag per hole, head to foot, for a
/// given nominal (note, octave) pair.
#[derive(Debug, Clone)]
pub struct Fingering {
    pub name: String,
    pub octave: i32,
    pub holes_closed: Vec<bool>,
}

/// The fully assembled flute: its acoustic chain, terminal, fingering
/// table, temperament, and reference pitch.
#[derive(Debug, Clone)]
pub struct Instrument {
    elements: Vec<Element>,
    terminal: FlangedEnd,
    fingerings: HashMap<(String, i32), Fingering>,
    temperament: Temperament,
    ref_pitch: f64,
    params: PhysParams,
}

impl Instrument {
    /// Assemble and validate an instrument. `elements` is the chain from
    /// head to foot; validation enforces that it contains exactly one
    /// embouchure, does not begin or end with a hole, and that every
    /// fingering names the same number of holes as the chain contains.
    pub fn new(
        elements: Vec<Element>,
        terminal: FlangedEnd,
        fingerings: Vec<Fingering>,
        temperament: Temperament,
        ref_pitch: f64,
        params: PhysParams,
    ) -> Result<Self, ValidationError> {
        let embouchure_count = elements
            .iter()
            .filter(|e| matches!(e, Element::Embouchure(_)))
            .count();
        if embouchure_count != 1 {
            return Err(ValidationError::MissingEmbouchure);
        }

        match elements.first() {
            Some(e) if e.is_hole() => return Err(ValidationError::BoreEdgeIsHole),
            None => return Err(ValidationError::MissingEmbouchure),
            _ => {}
        }
        match elements.last() {
            Some(e) if e.is_hole() => return Err(ValidationError::BoreEdgeIsHole),
            _ => {}
        }

        let hole_count = elements.iter().filter(|e| e.is_hole()).count();
        for fingering in &fingerings {
            if fingering.holes_closed.len() != hole_count {
                return Err(ValidationError::FingeringHoleCountMismatch {
                    note: fingering.name.clone(),
                    given: fingering.holes_closed.len(),
                    expected: hole_count,
                });
            }
        }

        let fingerings = fingerings
            .into_iter()
            .map(|f| ((f.name.clone(), f.octave), f))
            .collect();

        Ok(Self {
            elements,
            terminal,
            fingerings,
            temperament,
            ref_pitch,
            params,
        })
    }

    pub fn params(&self) -> &PhysParams {
        &self.params
    }

    pub fn temperament(&self) -> &Temperament {
        &self.temperament
    }

    pub fn ref_pitch(&self) -> f64 {
        self.ref_pitch
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn fingerings(&self) -> impl Iterator<Item = (&str, i32)> {
        self.fingerings.keys().map(|(name, octave)| (name.as_str(), *octave))
    }

    /// Apply a named fingering's open/closed flags to the chain's holes,
    /// in head-to-foot order.
    pub fn set_fingering(&mut self, name: &str, octave: i32) -> Result<(), InstrumentError> {
        let closed = self
            .fingerings
            .get(&(name.to_string(), octave))
            .ok_or_else(|| InstrumentError::UnknownFingering {
                name: name.to_string(),
                octave,
            })?
            .holes_closed
            .clone();

        let mut closed = closed.into_iter();
        for element in &mut self.elements {
            if element.is_hole() {
                let is_closed = closed.next().expect("hole count validated at construction");
                element.set_closed(is_closed);
            }
        }
        debug!(fingering = name, octave, "applied fingering");
        Ok(())
    }

    /// The input impedance at frequency `f`: the chain product folded
    /// head-to-foot, terminated by the flanged end's load impedance.
    pub fn compute_z(&self, freq: f64) -> Complex64 {
        let chain = self
            .elements
            .iter()
            .map(|e| e.transfer_matrix(freq, &self.params))
            .fold(TransferMatrix::identity(), |acc, t| acc.chain(&t));

        let z_l = self.terminal.load_impedance(freq, &self.params);
        chain.input_impedance(z_l)
    }
}
