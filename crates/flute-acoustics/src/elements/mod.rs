//! Chain elements composing the instrument's acoustic bore: conic bore
//! sections, tone holes (plain and padded), and the embouchure.

mod bore;
mod embouchure;
mod hole;

pub use bore::BoreSection;
pub use embouchure::Embouchure;
pub use hole::{Hole, PaddedHole};

use crate::constants::PhysParams;
use crate::transfer_matrix::TransferMatrix;

/// A two-port component in the instrument's acoustic chain.
pub trait ChainElement {
    fn transfer_matrix(&self, freq: f64, params: &PhysParams) -> TransferMatrix;
}

/// One link of the instrument's chain: either a length of bore, a tone
/// hole (open or closed), or the embouchure. Tagged rather than boxed
/// since the set of variants is closed and known at compile time.
#[derive(Debug, Clone, Copy)]
pub enum Element {
    Bore(BoreSection),
    Hole(Hole),
    PaddedHole(PaddedHole),
    Embouchure(Embouchure),
}

impl Element {
    /// True if this element is some kind of tone hole.
    pub fn is_hole(&self) -> bool {
        matches!(self, Element::Hole(_) | Element::PaddedHole(_))
    }

    /// Set the open/closed state if this is a hole; a no-op otherwise.
    pub fn set_closed(&mut self, closed: bool) {
        match self {
            Element::Hole(h) => h.set_closed(closed),
            Element::PaddedHole(h) => h.set_closed(closed),
            Element::Bore(_) | Element::Embouchure(_) => {}
        }
    }

    /// True if this is a hole and it is currently closed. Returns `None`
    /// for non-hole elements.
    pub fn is_closed(&self) -> Option<bool> {
        match self {
            Element::Hole(h) => Some(h.is_closed()),
            Element::PaddedHole(h) => Some(h.is_closed()),
            Element::Bore(_) | Element::Embouchure(_) => None,
        }
    }

    /// Borrow the bore section, if this element is one.
    pub fn as_bore_section(&self) -> Option<&BoreSection> {
        match self {
            Element::Bore(b) => Some(b),
            _ => None,
        }
    }
}

impl ChainElement for Element {
    fn transfer_matrix(&self, freq: f64, params: &PhysParams) -> TransferMatrix {
        match self {
            Element::Bore(e) => e.transfer_matrix(freq, params),
            Element::Hole(e) => e.transfer_matrix(freq, params),
            Element::PaddedHole(e) => e.transfer_matrix(freq, params),
            Element::Embouchure(e) => e.transfer_matrix(freq, params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PhysParams;

    #[test]
    fn test_set_closed_is_noop_on_bore_and_embouchure() {
        let mut bore = Element::Bore(BoreSection::new(0.1, 0.01, 0.01).unwrap());
        bore.set_closed(true);
        assert_eq!(bore.is_closed(), None);

        let mut emb = Element::Embouchure(Embouchure::new(0.006, 0.01, 0.005).unwrap());
        emb.set_closed(true);
        assert_eq!(emb.is_closed(), None);
    }

    #[test]
    fn test_set_closed_propagates_to_hole_variants() {
        let mut hole =
            Element::Hole(Hole::new(0.008, 0.004, 0.003, false, 0.0005).unwrap());
        assert_eq!(hole.is_closed(), Some(false));
        hole.set_closed(true);
        assert_eq!(hole.is_closed(), Some(true));

        let mut padded = Element::PaddedHole(
            PaddedHole::new(0.008, 0.0045, 0.003, false, 0.0005, 0.002, 0.007).unwrap(),
        );
        padded.set_closed(true);
        assert_eq!(padded.is_closed(), Some(true));
    }

    #[test]
    fn test_element_dispatch_matches_variant_transfer_matrix() {
        let params = PhysParams::at_temperature(20.0);
        let section = BoreSection::new(0.1, 0.01, 0.01).unwrap();
        let direct = section.transfer_matrix(440.0, &params);
        let via_enum = Element::Bore(section).transfer_matrix(440.0, &params);
        assert_eq!(direct.pp, via_enum.pp);
        assert_eq!(direct.up, via_enum.up);
    }
}
