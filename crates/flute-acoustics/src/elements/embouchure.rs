//! Embouchure hole plus the stopper-cavity, modeled as a single shunt
//! compliance-and-mass at the head end.

use num_complex::Complex64;

use crate::constants::PhysParams;
use crate::error::ValidationError;
use crate::transfer_matrix::TransferMatrix;

use super::ChainElement;

/// The embouchure hole and the stopper cavity behind it.
#[derive(Debug, Clone, Copy)]
pub struct Embouchure {
    r_bore: f64,
    l_char: f64,
    l_cav: f64,
}

impl Embouchure {
    /// `r_bore` is the local bore radius, `l_char` the characteristic
    /// length (hole area / effective length), `l_cav` the stopper cavity's
    /// length.
    pub fn new(r_bore: f64, l_char: f64, l_cav: f64) -> Result<Self, ValidationError> {
        if r_bore <= 0.0 {
            return Err(ValidationError::NonPositiveRadius {
                element: "embouchure (bore radius)",
                value: r_bore,
            });
        }
        if l_char <= 0.0 {
            return Err(ValidationError::NonPositiveLength {
                element: "embouchure (characteristic length)",
                value: l_char,
            });
        }
        if l_cav < 0.0 {
            return Err(ValidationError::NonPositiveLength {
                element: "embouchure (cavity length)",
                value: l_cav,
            });
        }
        Ok(Self {
            r_bore,
            l_char,
            l_cav,
        })
    }

    fn j_ye(&self, omega: f64, params: &PhysParams) -> f64 {
        self.l_char / (params.gamma * omega)
    }

    fn j_yc(&self, omega: f64, params: &PhysParams) -> f64 {
        let v = 2.0 * std::f64::consts::PI * self.r_bore * self.r_bore * self.l_cav;
        -(omega * v) / (params.gamma * params.c * params.c)
    }

    fn k_delta_l(&self, freq: f64, params: &PhysParams) -> f64 {
        let omega = 2.0 * std::f64::consts::PI * freq;
        let z0 = params.z0(self.r_bore);
        (1.0 / (z0 * (self.j_ye(omega, params) + self.j_yc(omega, params)))).atan()
    }
}

impl ChainElement for Embouchure {
    fn transfer_matrix(&self, freq: f64, params: &PhysParams) -> TransferMatrix {
        let z0 = params.z0(self.r_bore);
        let k_delta_l = self.k_delta_l(freq, params);
        let j = Complex64::new(0.0, -1.0);
        let cos = Complex64::new(k_delta_l.cos(), 0.0);
        let sin = Complex64::new(k_delta_l.sin(), 0.0);
        TransferMatrix::new(cos, j * sin * z0, j * sin / z0, cos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_nonpositive_char_length() {
        assert!(Embouchure::new(0.006, 0.0, 0.01).is_err());
    }

    #[test]
    fn test_zero_cavity_is_valid() {
        assert!(Embouchure::new(0.006, 0.01, 0.0).is_ok());
    }

    #[test]
    fn test_matrix_has_unit_determinant() {
        let params = PhysParams::at_temperature(20.0);
        let emb = Embouchure::new(0.006, 0.01, 0.005).unwrap();
        let t = emb.transfer_matrix(600.0, &params);
        let det = t.pp * t.uu - t.pu * t.up;
        assert!((det - Complex64::new(1.0, 0.0)).norm() < 1e-9, "det = {det}");
    }
}
