//! 2x2 complex transfer matrix relating (pressure, volume flow) at the two
//! faces of a linear acoustic two-port.

use num_complex::Complex64;

/// A 2x2 complex transfer matrix.
///
/// ```text
/// [P_out]   [PP  PU] [P_in]
/// [U_out] = [UP  UU] [U_in]
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TransferMatrix {
    pub pp: Complex64,
    pub pu: Complex64,
    pub up: Complex64,
    pub uu: Complex64,
}

impl TransferMatrix {
    pub fn new(pp: Complex64, pu: Complex64, up: Complex64, uu: Complex64) -> Self {
        Self { pp, pu, up, uu }
    }

    /// Identity matrix (no-op element).
    pub fn identity() -> Self {
        Self {
            pp: Complex64::new(1.0, 0.0),
            pu: Complex64::new(0.0, 0.0),
            up: Complex64::new(0.0, 0.0),
            uu: Complex64::new(1.0, 0.0),
        }
    }

    /// Chain (multiply) this matrix with another: self * other, applying
    /// `self` to the input face first.
    pub fn chain(&self, other: &TransferMatrix) -> TransferMatrix {
        TransferMatrix {
            pp: self.pp * other.pp + self.pu * other.up,
            pu: self.pp * other.pu + self.pu * other.uu,
            up: self.up * other.pp + self.uu * other.up,
            uu: self.up * other.pu + self.uu * other.uu,
        }
    }

    /// Input impedance given a terminating load impedance `z_l`:
    /// `Z_in = (Z_L*PP + PU) / (Z_L*UP + UU)`.
    pub fn input_impedance(&self, z_l: Complex64) -> Complex64 {
        (z_l * self.pp + self.pu) / (z_l * self.up + self.uu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_chain() {
        let id = TransferMatrix::identity();
        let m = TransferMatrix::new(
            Complex64::new(1.0, 0.5),
            Complex64::new(0.0, 1.0),
            Complex64::new(0.0, -1.0),
            Complex64::new(1.0, 0.5),
        );
        let result = id.chain(&m);
        assert!((result.pp - m.pp).norm() < 1e-12);
        assert!((result.pu - m.pu).norm() < 1e-12);
        assert!((result.up - m.up).norm() < 1e-12);
        assert!((result.uu - m.uu).norm() < 1e-12);
    }

    #[test]
    fn test_reciprocity_of_lossless_cylinder_matrix() {
        // det(T) = 1 for a passive lossless element.
        let k: f64 = 1.0;
        let l: f64 = 0.5;
        let z: f64 = 100.0;
        let cos_kl = Complex64::new((k * l).cos(), 0.0);
        let sin_kl = Complex64::new((k * l).sin(), 0.0);
        let j = Complex64::new(0.0, 1.0);
        let m = TransferMatrix::new(
            cos_kl,
            j * Complex64::new(z, 0.0) * sin_kl,
            j * Complex64::new(1.0 / z, 0.0) * sin_kl,
            cos_kl,
        );
        let det = m.pp * m.uu - m.pu * m.up;
        assert!((det - Complex64::new(1.0, 0.0)).norm() < 1e-12, "det = {det}");
    }

    #[test]
    fn test_split_section_composition() {
        // Chaining a section of length L/2 with itself should equal the
        // single section of length L, for a lossless cylindrical bore.
        let z: f64 = 200.0;
        let j = Complex64::new(0.0, 1.0);
        let k: f64 = 3.0;
        let make = |l: f64| {
            let kl = k * l;
            let cos_kl = Complex64::new(kl.cos(), 0.0);
            let sin_kl = Complex64::new(kl.sin(), 0.0);
            TransferMatrix::new(
                cos_kl,
                j * Complex64::new(z, 0.0) * sin_kl,
                j * Complex64::new(1.0 / z, 0.0) * sin_kl,
                cos_kl,
            )
        };
        let l = 0.8;
        let whole = make(l);
        let half = make(l / 2.0);
        let split = half.chain(&half);
        assert!((whole.pp - split.pp).norm() < 1e-9);
        assert!((whole.pu - split.pu).norm() < 1e-9);
        assert!((whole.up - split.up).norm() < 1e-9);
        assert!((whole.uu - split.uu).norm() < 1e-9);
    }
}
