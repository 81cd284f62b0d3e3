//! Temporal part of separable laser profiles.

use std::f64::consts::PI;
use std::fmt;

use ndarray::{ArrayD, ArrayViewD};
use num_complex::Complex64;

use crate::constants::C;
use crate::error::ProfileResult;
use crate::profile::require_positive;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array1;

    #[test]
    fn gaussian_peak_and_width() {
        let profile = GaussianLongitudinalProfile::new(0.8e-6, 30e-15, 10e-15, 0.0).unwrap();
        let t = Array1::from(vec![10e-15, 40e-15]).into_dyn();
        let env = profile.evaluate(&t.view());

        assert_relative_eq!(env[0].norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(env[1].norm(), (-1.0f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn gaussian_phase() {
        let wavelength = 0.8e-6;
        let t_peak = 5e-15;
        let cep = 0.3;
        let profile = GaussianLongitudinalProfile::new(wavelength, 30e-15, t_peak, cep).unwrap();
        let t = Array1::from(vec![0.0, -20e-15]).into_dyn();
        let env = profile.evaluate(&t.view());

        let omega0 = 2.0 * PI * C / wavelength;
        let expected = Complex64::from_polar(1.0, cep + omega0 * t_peak);
        for value in env.iter() {
            let phase = *value / value.norm();
            assert_relative_eq!(phase.re, expected.re, epsilon = 1e-9);
            assert_relative_eq!(phase.im, expected.im, epsilon = 1e-9);
        }
    }

    #[test]
    fn invalid_duration() {
        assert!(GaussianLongitudinalProfile::new(0.8e-6, 0.0, 0.0, 0.0).is_err());
        assert!(GaussianLongitudinalProfile::new(0.0, 30e-15, 0.0, 0.0).is_err());
    }
}

/// Envelope of a pulse as a function of time only.
pub trait LongitudinalProfile: fmt::Debug + Send + Sync {
    fn evaluate(&self, t: &ArrayViewD<'_, f64>) -> ArrayD<Complex64>;
}

/// Gaussian temporal envelope,
/// `exp(-(t - t_peak)^2 / tau^2 + i (cep_phase + omega0 t_peak))`.
///
/// `tau` is the duration at which the field falls to `1/e` of its peak, and
/// the carrier-envelope phase is defined at `t_peak`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianLongitudinalProfile {
    pub tau: f64,
    pub t_peak: f64,
    pub cep_phase: f64,
    omega0: f64,
}

impl GaussianLongitudinalProfile {
    pub fn new(wavelength: f64, tau: f64, t_peak: f64, cep_phase: f64) -> ProfileResult<Self> {
        require_positive("wavelength", wavelength)?;
        require_positive("tau", tau)?;
        Ok(Self {
            tau,
            t_peak,
            cep_phase,
            omega0: 2.0 * PI * C / wavelength,
        })
    }
}

impl LongitudinalProfile for GaussianLongitudinalProfile {
    fn evaluate(&self, t: &ArrayViewD<'_, f64>) -> ArrayD<Complex64> {
        let phase = self.cep_phase + self.omega0 * self.t_peak;
        t.mapv(|t| {
            let arg = (t - self.t_peak) / self.tau;
            Complex64::new(-arg * arg, phase).exp()
        })
    }
}
