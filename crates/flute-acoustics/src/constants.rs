//! Temperature-dependent properties of air.

use std::f64::consts::PI;

/// Dry air pressure, Pa.
const P_AIR: f64 = 101_325.0;
/// Specific gas constant for dry air, J/(kg*K).
const R_AIR: f64 = 287.05;

/// Physical constants of air at a given temperature, SI units throughout.
///
/// Built once from a temperature in Celsius via [`PhysParams::at_temperature`]
/// and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysParams {
    /// Absolute temperature, K.
    pub temperature: f64,
    /// Speed of sound, m/s.
    pub c: f64,
    /// Density, kg/m^3.
    pub rho: f64,
    /// Shear viscosity, Pa*s.
    pub eta: f64,
    /// Ratio of specific heats.
    pub gamma: f64,
    /// Thermal conductivity, W/(m*K).
    pub kappa: f64,
    /// Specific heat at constant pressure, J/(kg*K).
    pub c_p: f64,
}

impl PhysParams {
    /// Derive air properties at `temp_c` degrees Celsius.
    pub fn at_temperature(temp_c: f64) -> Self {
        let temperature = temp_c + 273.15;
        let c = 332.0 * (1.0 + 0.00166 * temp_c);
        let rho = (P_AIR / R_AIR) / temperature;
        let eta = 3.648e-6 * (1.0 + 0.0135003 * temperature);

        Self {
            temperature,
            c,
            rho,
            eta,
            gamma: 1.4017,
            kappa: 2.6118e-2,
            c_p: 1.0063e3,
        }
    }

    /// Wave impedance of an infinite cylindrical bore of radius `r`:
    /// `Z0 = rho*c / (pi*r^2)`.
    pub fn z0(&self, r: f64) -> f64 {
        self.rho * self.c / (PI * r * r)
    }
}
