//! Acoustic modeling core: a chain of frequency-dependent two-port
//! elements composing into an instrument's input impedance, plus the
//! resonance-finding sweep and temperament lookup built on top of it.

pub mod constants;
pub mod elements;
pub mod error;
pub mod instrument;
pub mod spectrum;
pub mod temperament;
pub mod terminal;
pub mod transfer_matrix;
pub mod tuning;

pub use constants::PhysParams;
pub use elements::{BoreSection, ChainElement, Element, Embouchure, Hole, PaddedHole};
pub use error::{InstrumentError, ValidationError};
pub use instrument::{Fingering, Instrument};
pub use spectrum::ImpedanceSpectrum;
pub use temperament::{Note, Temperament};
pub use terminal::{FlangedEnd, Terminal};
pub use transfer_matrix::TransferMatrix;
pub use tuning::{tune_one, tuning_report, TuningLine};
