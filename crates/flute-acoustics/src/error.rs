//! Error types for the acoustics engine.

use thiserror::Error;

/// A structural invariant violation discovered while validating geometry or
/// assembling an instrument.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{element}: length must be positive, got {value}")]
    NonPositiveLength { element: &'static str, value: f64 },

    #[error("{element}: radius must be positive, got {value}")]
    NonPositiveRadius { element: &'static str, value: f64 },

    #[error("instrument must include exactly one embouchure")]
    MissingEmbouchure,

    #[error("the instrument must not begin or end with a hole")]
    BoreEdgeIsHole,

    #[error("fingering {note} has {given} hole states but the instrument has {expected} holes")]
    FingeringHoleCountMismatch {
        note: String,
        given: usize,
        expected: usize,
    },
}

/// Error returned when looking up or applying a fingering.
#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("note {name} octave {octave} is not in the fingering table")]
    UnknownFingering { name: String, octave: i32 },
}
