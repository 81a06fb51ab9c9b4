//! Errors produced while parsing and assembling an instrument description.

use flute_acoustics::ValidationError;
use thiserror::Error;

/// Everything that can go wrong turning an input file into an
/// [`flute_acoustics::Instrument`](flute_acoustics::Instrument).
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("line {line}: {msg}")]
    Syntax { line: usize, msg: String },

    #[error("there must be a bore specification at position 0.0")]
    MissingOriginBorePoint,

    #[error("the flute must not begin or end with a hole")]
    HoleAtBoreEdge,

    #[error("the flute must end with a bore section")]
    MissingFinalBoreSection,

    #[error("the length reference \"{0}\" does not exist")]
    UnknownLengthRef(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
