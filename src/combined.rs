//! Separable profiles, the product of a longitudinal and a transverse envelope.

use ndarray::{ArrayD, ArrayViewD};
use num_complex::Complex64;

use crate::error::ProfileResult;
use crate::longitudinal::{GaussianLongitudinalProfile, LongitudinalProfile};
use crate::profile::{require_positive, Profile, ProfileBase};
use crate::transverse::{GaussianTransverseProfile, TransverseProfile};


/// Profile factorised as `longitudinal(t) * transverse(x, y)`, carrying the
/// energy the pulse is normalised to once evaluated on a grid.
#[derive(Debug)]
pub struct CombinedLongitudinalTransverseProfile {
    base: ProfileBase,
    laser_energy: f64, // J
    longitudinal: Box<dyn LongitudinalProfile>,
    transverse: Box<dyn TransverseProfile>,
}

impl CombinedLongitudinalTransverseProfile {
    pub fn new(
        wavelength: f64,
        polarization: &[Complex64],
        laser_energy: f64,
        longitudinal: Box<dyn LongitudinalProfile>,
        transverse: Box<dyn TransverseProfile>,
    ) -> ProfileResult<Self> {
        let base = ProfileBase::new(wavelength, polarization)?;
        require_positive("laser_energy", laser_energy)?;
        Ok(Self {
            base,
            laser_energy,
            longitudinal,
            transverse,
        })
    }

    pub fn longitudinal(&self) -> &dyn LongitudinalProfile {
        self.longitudinal.as_ref()
    }

    pub fn transverse(&self) -> &dyn TransverseProfile {
        self.transverse.as_ref()
    }
}

impl Profile for CombinedLongitudinalTransverseProfile {
    fn base(&self) -> &ProfileBase {
        &self.base
    }

    fn envelope(
        &self,
        x: &ArrayViewD<'_, f64>,
        y: &ArrayViewD<'_, f64>,
        t: &ArrayViewD<'_, f64>,
    ) -> ArrayD<Complex64> {
        self.longitudinal.evaluate(t) * self.transverse.evaluate(x, y)
    }

    fn laser_energy(&self) -> Option<f64> {
        Some(self.laser_energy)
    }
}

/// Gaussian pulse, Gaussian both in time and in the transverse plane.
#[derive(Debug)]
pub struct GaussianProfile {
    combined: CombinedLongitudinalTransverseProfile,
    w0: f64,
    tau: f64,
    t_peak: f64,
}

impl GaussianProfile {
    pub fn new(
        wavelength: f64,
        polarization: &[Complex64],
        laser_energy: f64,
        w0: f64,
        tau: f64,
        t_peak: f64,
        cep_phase: f64,
    ) -> ProfileResult<Self> {
        let longitudinal = GaussianLongitudinalProfile::new(wavelength, tau, t_peak, cep_phase)?;
        let transverse = GaussianTransverseProfile::new(w0)?;
        let combined = CombinedLongitudinalTransverseProfile::new(
            wavelength,
            polarization,
            laser_energy,
            Box::new(longitudinal),
            Box::new(transverse),
        )?;
        Ok(Self {
            combined,
            w0,
            tau,
            t_peak,
        })
    }

    pub fn w0(&self) -> f64 {
        self.w0
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn t_peak(&self) -> f64 {
        self.t_peak
    }
}

impl Profile for GaussianProfile {
    fn base(&self) -> &ProfileBase {
        self.combined.base()
    }

    fn envelope(
        &self,
        x: &ArrayViewD<'_, f64>,
        y: &ArrayViewD<'_, f64>,
        t: &ArrayViewD<'_, f64>,
    ) -> ArrayD<Complex64> {
        self.combined.envelope(x, y, t)
    }

    fn laser_energy(&self) -> Option<f64> {
        self.combined.laser_energy()
    }
}
