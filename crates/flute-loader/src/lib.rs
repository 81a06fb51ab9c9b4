//! Parses the flute description grammar into a validated
//! [`flute_acoustics::Instrument`].

mod ast;
mod builder;
mod error;
mod lexer;
mod parser;

pub use ast::ParsedFlute;
pub use error::LoaderError;

use flute_acoustics::Instrument;

/// Parse and assemble a complete instrument description in one step.
pub fn load(input: &str, ref_pitch: f64) -> Result<Instrument, LoaderError> {
    let parsed = parser::parse(input)?;
    builder::build(parsed, ref_pitch)
}
