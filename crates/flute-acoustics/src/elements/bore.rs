//! Conic bore section with viscothermal losses (Scavone's formulation).

use num_complex::Complex64;

use crate::constants::PhysParams;
use crate::error::ValidationError;
use crate::transfer_matrix::TransferMatrix;

use super::ChainElement;

/// A conic frustum of bore, from a head-end (left) radius to a foot-end
/// (right) radius over a given length.
#[derive(Debug, Clone, Copy)]
pub struct BoreSection {
    length: f64,
    r_left: f64,
    r_right: f64,
    is_converging: bool,
    r_small: f64,
    r_large: f64,
    /// Inverse "missing length" - reciprocal distance from the cone's
    /// hypothetical apex to the small end.
    x0_inv: f64,
}

impl BoreSection {
    /// Build and validate a conic bore section.
    pub fn new(length: f64, r_left: f64, r_right: f64) -> Result<Self, ValidationError> {
        if length <= 0.0 {
            return Err(ValidationError::NonPositiveLength {
                element: "bore section",
                value: length,
            });
        }
        if r_left <= 0.0 {
            return Err(ValidationError::NonPositiveRadius {
                element: "bore section (left radius)",
                value: r_left,
            });
        }
        if r_right <= 0.0 {
            return Err(ValidationError::NonPositiveRadius {
                element: "bore section (right radius)",
                value: r_right,
            });
        }

        let is_converging = r_right < r_left;
        let r_small = if is_converging { r_right } else { r_left };
        let r_large = if is_converging { r_left } else { r_right };
        let x0_inv = (r_large - r_small) / (length * r_small);

        Ok(Self {
            length,
            r_left,
            r_right,
            is_converging,
            r_small,
            r_large,
            x0_inv,
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn r_left(&self) -> f64 {
        self.r_left
    }

    pub fn r_right(&self) -> f64 {
        self.r_right
    }

    pub fn is_converging(&self) -> bool {
        self.is_converging
    }
}

impl ChainElement for BoreSection {
    fn transfer_matrix(&self, freq: f64, params: &PhysParams) -> TransferMatrix {
        let omega = 2.0 * std::f64::consts::PI * freq;
        let k = omega / params.c;

        let z0 = params.z0(self.r_small);

        let r_ave = 0.5 * (self.r_left + self.r_right);
        let r_v_inv = 1.0 / (r_ave * (omega * params.rho / params.eta).sqrt());
        let r_v_inv2 = r_v_inv * r_v_inv;
        let r_v_inv3 = r_v_inv2 * r_v_inv;

        let alpha = k * (1.045 * r_v_inv + 1.080 * r_v_inv2 + 0.750 * r_v_inv3);
        let omega_on_vp = k * (1.0 + 1.045 * r_v_inv);
        let gamma = Complex64::new(alpha, -omega_on_vp);

        let z_c_factor = Complex64::new(
            1.0 + 0.369 * r_v_inv,
            0.369 * r_v_inv + 1.149 * r_v_inv2 + 0.303 * r_v_inv3,
        );
        let z_c = z_c_factor * z0;

        let h = 1.0 + self.length * self.x0_inv;
        let l_c_inv = self.x0_inv / h;

        let gamma_l = gamma * self.length;
        let cosh_gl = gamma_l.cosh();
        let sinh_gl = gamma_l.sinh();
        let x0_on_gamma = self.x0_inv / gamma;

        let a = cosh_gl * h - sinh_gl * x0_on_gamma;
        let b = sinh_gl * z_c / h;
        let c = ((h - x0_on_gamma * x0_on_gamma) * sinh_gl
            + x0_on_gamma * self.x0_inv * self.length * cosh_gl)
            / z_c;
        let d = cosh_gl / h + sinh_gl * l_c_inv / gamma;

        if self.is_converging {
            TransferMatrix::new(d, b, c, a)
        } else {
            TransferMatrix::new(a, b, c, d)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cylindrical_limit_matches_pure_cylinder_formula() {
        // r_left == r_right: gamma reduces to the pure-cylinder formula and
        // PP=UU=cosh(gamma*L), PU=Z0*sinh(gamma*L), UP=sinh(gamma*L)/Z0.
        let params = PhysParams::at_temperature(20.0);
        let r = 0.01;
        let l = 0.3;
        let section = BoreSection::new(l, r, r).unwrap();
        let t = section.transfer_matrix(440.0, &params);

        let omega = 2.0 * std::f64::consts::PI * 440.0;
        let k = omega / params.c;
        let r_v_inv = 1.0 / (r * (omega * params.rho / params.eta).sqrt());
        let r_v_inv2 = r_v_inv * r_v_inv;
        let r_v_inv3 = r_v_inv2 * r_v_inv;
        let alpha = k * (1.045 * r_v_inv + 1.080 * r_v_inv2 + 0.750 * r_v_inv3);
        let omega_on_vp = k * (1.0 + 1.045 * r_v_inv);
        let gamma = Complex64::new(alpha, -omega_on_vp);
        let z0 = params.z0(r);
        let z_c_factor = Complex64::new(
            1.0 + 0.369 * r_v_inv,
            0.369 * r_v_inv + 1.149 * r_v_inv2 + 0.303 * r_v_inv3,
        );
        let z_c = z_c_factor * z0;
        let gl = gamma * l;

        assert!((t.pp - gl.cosh()).norm() < 1e-6);
        assert!((t.uu - gl.cosh()).norm() < 1e-6);
        assert!((t.pu - z_c * gl.sinh()).norm() < 1e-6);
        assert!((t.up - gl.sinh() / z_c).norm() < 1e-6);
    }

    #[test]
    fn test_converging_diverging_symmetry() {
        let params = PhysParams::at_temperature(20.0);
        let diverging = BoreSection::new(0.2, 0.008, 0.012).unwrap();
        let converging = BoreSection::new(0.2, 0.012, 0.008).unwrap();

        let td = diverging.transfer_matrix(500.0, &params);
        let tc = converging.transfer_matrix(500.0, &params);

        assert!((td.pp - tc.uu).norm() < 1e-9);
        assert!((td.uu - tc.pp).norm() < 1e-9);
        assert!((td.pu - tc.pu).norm() < 1e-9);
        assert!((td.up - tc.up).norm() < 1e-9);
    }

    #[test]
    fn test_unit_conic_produces_finite_nonzero_impedance() {
        let params = PhysParams::at_temperature(20.0);
        let section = BoreSection::new(0.5, 0.01, 0.01).unwrap();
        let t = section.transfer_matrix(440.0, &params);
        assert!(t.pp.norm().is_finite());
        assert!(t.pp.norm() > 0.0);
    }

    #[test]
    fn test_rejects_nonpositive_length() {
        assert!(BoreSection::new(0.0, 0.01, 0.01).is_err());
        assert!(BoreSection::new(-1.0, 0.01, 0.01).is_err());
    }

    #[test]
    fn test_rejects_nonpositive_radius() {
        assert!(BoreSection::new(0.1, 0.0, 0.01).is_err());
        assert!(BoreSection::new(0.1, 0.01, -0.01).is_err());
    }
}
