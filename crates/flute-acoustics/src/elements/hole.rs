//! Finger/tone holes: a plain open/closed hole, and a padded "silver flute"
//! variant with a different geometric-length and open-effective-length
//! formula.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::constants::PhysParams;
use crate::error::ValidationError;
use crate::transfer_matrix::TransferMatrix;

use super::ChainElement;

/// Shared geometry and cached derived quantities common to both hole
/// variants. Not exposed directly — [`Hole`] and [`PaddedHole`] embed it.
#[derive(Debug, Clone, Copy)]
struct HoleCore {
    r_bore: f64,
    r_hole: f64,
    depth: f64,
    closed: bool,
    edge_radius: f64,
    // Cached at validation:
    r_hg: f64,
    l_hg: f64,
    ohlb: f64,
    chlb: f64,
}

fn check_positive_length(element: &'static str, value: f64) -> Result<(), ValidationError> {
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveLength { element, value });
    }
    Ok(())
}

fn check_positive_radius(element: &'static str, value: f64) -> Result<(), ValidationError> {
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveRadius { element, value });
    }
    Ok(())
}

/// Series length corrections from Keefe (1990) eqs. 8-9.
fn series_length_corrections(r_hg: f64, l_hg: f64, r_bore: f64) -> (f64, f64) {
    let rho = r_hg / r_bore;
    let rho2 = rho * rho;
    let rho4 = rho2 * rho2;

    let t1 = 0.47 * r_hg * rho4;
    let t2 = 0.62 * rho2 + 0.64 * rho;
    let t3 = (1.84 * l_hg / r_hg).tanh();

    let ohlb = t1 / (t2 + t3);
    let chlb = t1 / (t2 + 1.0 / t3);
    (ohlb, chlb)
}

/// Specific resistance along the bore when the hole is open (boundary-layer
/// dissipation), Keefe (1990).
fn boundary_layer_resistance(freq: f64, params: &PhysParams, r_hg: f64, l_hg: f64, r_c: f64) -> f64 {
    let omega = 2.0 * PI * freq;
    let k = omega / params.c;

    let d_v = (2.0 * params.eta / (params.rho * omega)).sqrt();
    let alpha = ((2.0 * params.eta * omega / params.rho).sqrt()
        + (params.gamma - 1.0) * (2.0 * params.kappa * omega / (params.rho * params.c_p)).sqrt())
        / (2.0 * r_hg * params.c);

    0.25 * (k * r_hg).powi(2) + alpha * l_hg + 0.25 * k * d_v * (2.0 * r_hg / r_c).ln()
}

/// Assemble the shunt-branch transfer matrix shared by both hole variants.
fn hole_transfer_matrix(
    freq: f64,
    params: &PhysParams,
    core: &HoleCore,
    open_effective_length: f64,
) -> TransferMatrix {
    let omega = 2.0 * PI * freq;
    let k = omega / params.c;
    let z0 = params.z0(core.r_bore);
    let rb_on_rh2 = (core.r_bore / core.r_hg).powi(2);
    let j = Complex64::new(0.0, -1.0);

    let one = Complex64::new(1.0, 0.0);

    if core.closed {
        let pu = -j * z0 * rb_on_rh2 * k * core.chlb;
        let up = j * (k * core.l_hg).tan() / (z0 * rb_on_rh2);
        TransferMatrix::new(one, pu, up, one)
    } else {
        let pu = -j * z0 * rb_on_rh2 * k * core.ohlb;
        let xi = boundary_layer_resistance(freq, params, core.r_hg, core.l_hg, core.edge_radius);
        let up = one / (z0 * rb_on_rh2 * (j * k * open_effective_length + xi));
        TransferMatrix::new(one, pu, up, one)
    }
}

/// A plain, unpadded tone hole.
#[derive(Debug, Clone, Copy)]
pub struct Hole {
    core: HoleCore,
}

impl Hole {
    /// Build and validate a plain tone hole.
    ///
    /// `r_bore` is the bore radius at the hole's position, `r_hole` its
    /// own radius, `depth` its physical depth, `closed` its initial state,
    /// and `edge_radius` the edge radius of curvature (Keefe 1990).
    pub fn new(
        r_bore: f64,
        r_hole: f64,
        depth: f64,
        closed: bool,
        edge_radius: f64,
    ) -> Result<Self, ValidationError> {
        check_positive_radius("hole (bore radius)", r_bore)?;
        check_positive_radius("hole (hole radius)", r_hole)?;
        check_positive_length("hole (depth)", depth)?;

        let r_hg = r_hole;
        let l_hg = depth;
        let (ohlb, chlb) = series_length_corrections(r_hg, l_hg, r_bore);

        Ok(Self {
            core: HoleCore {
                r_bore,
                r_hole,
                depth,
                closed,
                edge_radius,
                r_hg,
                l_hg,
                ohlb,
                chlb,
            },
        })
    }

    pub fn is_closed(&self) -> bool {
        self.core.closed
    }

    /// Mutate the open/closed state. The cached series length corrections
    /// are reused — only which one is selected changes.
    pub fn set_closed(&mut self, closed: bool) {
        self.core.closed = closed;
    }

    /// Open effective length of the hole, Keefe (1990) eq. 5.
    pub fn open_effective_length(&self, freq: f64, params: &PhysParams) -> f64 {
        let k = 2.0 * PI * freq / params.c;
        let tan_kl = (k * self.core.l_hg).tan();
        let rho = self.core.r_hg / self.core.r_bore;

        (1.0 / k * tan_kl + self.core.r_hg * (1.40 - 0.58 * rho * rho))
            / (1.0 - 0.61 * k * self.core.r_hg * tan_kl)
    }
}

impl ChainElement for Hole {
    fn transfer_matrix(&self, freq: f64, params: &PhysParams) -> TransferMatrix {
        let le = if self.core.closed {
            0.0
        } else {
            self.open_effective_length(freq, params)
        };
        hole_transfer_matrix(freq, params, &self.core, le)
    }
}

/// A "silver flute" tone hole with a pad sitting above it, which both
/// adjusts the geometric length and replaces the open effective-length
/// formula's constants with pad-dependent ones.
#[derive(Debug, Clone, Copy)]
pub struct PaddedHole {
    core: HoleCore,
    pad_height: f64,
    pad_radius: f64,
}

impl PaddedHole {
    pub fn new(
        r_bore: f64,
        r_hole: f64,
        depth: f64,
        closed: bool,
        edge_radius: f64,
        pad_height: f64,
        pad_radius: f64,
    ) -> Result<Self, ValidationError> {
        check_positive_radius("padded hole (bore radius)", r_bore)?;
        check_positive_radius("padded hole (hole radius)", r_hole)?;
        check_positive_length("padded hole (depth)", depth)?;
        check_positive_length("padded hole (pad height)", pad_height)?;
        check_positive_radius("padded hole (pad radius)", pad_radius)?;

        let r_hg = r_hole;
        let rho = r_hg / r_bore;
        let l_hg = depth + 0.125 * r_hg * rho * (1.0 + 0.172 * rho * rho);
        let (ohlb, chlb) = series_length_corrections(r_hg, l_hg, r_bore);

        Ok(Self {
            core: HoleCore {
                r_bore,
                r_hole,
                depth,
                closed,
                edge_radius,
                r_hg,
                l_hg,
                ohlb,
                chlb,
            },
            pad_height,
            pad_radius,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.core.closed
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.core.closed = closed;
    }

    /// Open effective length with the pad-dependent constant tau in place
    /// of the plain hole's fixed coefficients.
    pub fn open_effective_length(&self, freq: f64, params: &PhysParams) -> f64 {
        let k = 2.0 * PI * freq / params.c;
        let tan_kl = (k * self.core.l_hg).tan();
        let rho = self.core.r_hg / self.core.r_bore;

        let tau = 0.61
            * (self.pad_radius / self.core.r_hg).powf(0.18)
            * (self.core.r_hg / self.pad_height).powf(0.39);

        (1.0 / k * tan_kl + self.core.r_hg * (tau + (PI / 4.0) * (1.0 - 0.74 * rho * rho)))
            / (1.0 - tau * k * self.core.r_hg * tan_kl)
    }
}

impl ChainElement for PaddedHole {
    fn transfer_matrix(&self, freq: f64, params: &PhysParams) -> TransferMatrix {
        let le = if self.core.closed {
            0.0
        } else {
            self.open_effective_length(freq, params)
        };
        hole_transfer_matrix(freq, params, &self.core, le)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_hole_has_unit_diagonal() {
        let params = PhysParams::at_temperature(20.0);
        let hole = Hole::new(0.008, 0.004, 0.003, true, 0.0005).unwrap();
        let t = hole.transfer_matrix(440.0, &params);
        assert!((t.pp - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        assert!((t.uu - Complex64::new(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_open_vs_closed_give_different_matrices() {
        let params = PhysParams::at_temperature(20.0);
        let mut hole = Hole::new(0.008, 0.004, 0.003, false, 0.0005).unwrap();
        let open_t = hole.transfer_matrix(440.0, &params);
        hole.set_closed(true);
        let closed_t = hole.transfer_matrix(440.0, &params);
        assert!((open_t.up - closed_t.up).norm() > 1e-9);
    }

    #[test]
    fn test_mutating_closed_state_reuses_cache() {
        let mut hole = Hole::new(0.008, 0.004, 0.003, false, 0.0005).unwrap();
        let ohlb_before = hole.core.ohlb;
        let chlb_before = hole.core.chlb;
        hole.set_closed(true);
        assert_eq!(hole.core.ohlb, ohlb_before);
        assert_eq!(hole.core.chlb, chlb_before);
        hole.set_closed(false);
        assert_eq!(hole.core.ohlb, ohlb_before);
    }

    #[test]
    fn test_padded_hole_geometric_length_exceeds_physical_depth() {
        let hole = PaddedHole::new(0.008, 0.0045, 0.003, false, 0.0005, 0.002, 0.007).unwrap();
        assert!(hole.core.l_hg > hole.core.depth);
    }

    #[test]
    fn test_rejects_nonpositive_geometry() {
        assert!(Hole::new(0.0, 0.004, 0.003, false, 0.0005).is_err());
        assert!(Hole::new(0.008, 0.0, 0.003, false, 0.0005).is_err());
        assert!(Hole::new(0.008, 0.004, 0.0, false, 0.0005).is_err());
    }
}
