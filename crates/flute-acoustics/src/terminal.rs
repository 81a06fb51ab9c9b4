//! One-port terminal loads (the foot end of the instrument).

use num_complex::Complex64;

use crate::constants::PhysParams;
use crate::elements::BoreSection;
use crate::error::ValidationError;

/// A one-port component terminating the instrument's chain, producing a
/// load impedance at a given frequency. It does not participate in the
/// chain matrix product.
pub trait Terminal {
    fn load_impedance(&self, freq: f64, params: &PhysParams) -> Complex64;
}

/// A flanged open conic end: the foot-most bore section plus an outer
/// flange radius.
#[derive(Debug, Clone, Copy)]
pub struct FlangedEnd {
    bore: BoreSection,
    r_flange: f64,
}

impl FlangedEnd {
    pub fn new(bore: BoreSection, r_flange: f64) -> Result<Self, ValidationError> {
        if r_flange <= 0.0 {
            return Err(ValidationError::NonPositiveRadius {
                element: "flanged end (flange radius)",
                value: r_flange,
            });
        }
        Ok(Self { bore, r_flange })
    }

    /// The embedded foot-most bore section (e.g. for bore-profile output).
    pub fn bore(&self) -> &BoreSection {
        &self.bore
    }

    pub fn r_flange(&self) -> f64 {
        self.r_flange
    }
}

impl Terminal for FlangedEnd {
    fn load_impedance(&self, freq: f64, params: &PhysParams) -> Complex64 {
        let r_foot = self.bore.r_right();
        let kr = 2.0 * std::f64::consts::PI * freq * r_foot / params.c;
        let z0 = params.z0(r_foot);
        let flange_factor = r_foot / self.r_flange;

        let length_corr = 0.821 - 0.135 * flange_factor - 0.073 * flange_factor.powi(4);
        let reactance = z0 * length_corr * kr;
        let resistance = if kr < 2.0 { z0 * 0.25 * kr * kr } else { z0 };

        Complex64::new(resistance, -reactance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_impedance_independent_of_interior_state() {
        // The flanged end's load impedance depends only on its own
        // geometry, not on anything upstream in the chain.
        let params = PhysParams::at_temperature(20.0);
        let bore = BoreSection::new(0.1, 0.01, 0.009).unwrap();
        let end = FlangedEnd::new(bore, 0.02).unwrap();
        let z1 = end.load_impedance(440.0, &params);
        let z2 = end.load_impedance(440.0, &params);
        assert_eq!(z1, z2);
    }

    #[test]
    fn test_low_frequency_resistance_quadratic_in_kr() {
        let params = PhysParams::at_temperature(20.0);
        let bore = BoreSection::new(0.1, 0.01, 0.01).unwrap();
        let end = FlangedEnd::new(bore, 0.02).unwrap();
        let z = end.load_impedance(50.0, &params);
        assert!(z.re > 0.0);
        assert!(z.re.is_finite());
    }

    #[test]
    fn test_rejects_nonpositive_flange_radius() {
        let bore = BoreSection::new(0.1, 0.01, 0.01).unwrap();
        assert!(FlangedEnd::new(bore, 0.0).is_err());
    }
}
