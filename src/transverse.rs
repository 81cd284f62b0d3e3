//! Transverse part of separable laser profiles.
//!
//! Each variant gives the envelope in a plane perpendicular to the propagation
//! axis, as a function of the Cartesian coordinates `x` and `y`. All of them
//! are normalised so that the peak of the lowest-order mode is 1; the overall
//! amplitude is fixed later by energy normalisation.

use std::fmt;

use ndarray::{ArrayD, ArrayViewD, Zip};
use num_complex::Complex64;

use crate::error::ProfileResult;
use crate::profile::require_positive;


/// Envelope of a pulse in the transverse plane.
///
/// `x` and `y` must share a shape; implementations panic otherwise. Go through
/// [`Profile::evaluate`](crate::profile::Profile::evaluate) for a checked call.
pub trait TransverseProfile: fmt::Debug + Send + Sync {
    fn evaluate(&self, x: &ArrayViewD<'_, f64>, y: &ArrayViewD<'_, f64>) -> ArrayD<Complex64>;
}

/// Gaussian transverse envelope `exp(-(x^2 + y^2) / w0^2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianTransverseProfile {
    pub w0: f64, // waist (m)
}

impl GaussianTransverseProfile {
    pub fn new(w0: f64) -> ProfileResult<Self> {
        require_positive("w0", w0)?;
        Ok(Self { w0 })
    }
}

impl TransverseProfile for GaussianTransverseProfile {
    fn evaluate(&self, x: &ArrayViewD<'_, f64>, y: &ArrayViewD<'_, f64>) -> ArrayD<Complex64> {
        let w0_sq = self.w0 * self.w0;
        Zip::from(x)
            .and(y)
            .map_collect(|&x, &y| Complex64::new((-(x * x + y * y) / w0_sq).exp(), 0.0))
    }
}

/// Laguerre-Gaussian mode of radial index `p` and azimuthal index `m`.
///
/// With `s = 2 r^2 / w0^2` the envelope reads
/// `s^(|m|/2) L_p^|m|(s) exp(-s/2) exp(-i m theta)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LaguerreGaussianTransverseProfile {
    pub w0: f64,
    pub p: usize,
    pub m: i32,
}

impl LaguerreGaussianTransverseProfile {
    pub fn new(w0: f64, p: usize, m: i32) -> ProfileResult<Self> {
        require_positive("w0", w0)?;
        Ok(Self { w0, p, m })
    }
}

impl TransverseProfile for LaguerreGaussianTransverseProfile {
    fn evaluate(&self, x: &ArrayViewD<'_, f64>, y: &ArrayViewD<'_, f64>) -> ArrayD<Complex64> {
        let w0_sq = self.w0 * self.w0;
        let abs_m = self.m.unsigned_abs() as i32;
        Zip::from(x).and(y).map_collect(|&x, &y| {
            let s = 2.0 * (x * x + y * y) / w0_sq;
            let theta = y.atan2(x);
            let amplitude = s.sqrt().powi(abs_m)
                * generalized_laguerre(self.p, abs_m as f64, s)
                * (-0.5 * s).exp();
            Complex64::from_polar(amplitude, -(self.m as f64) * theta)
        })
    }
}

/// Hermite-Gaussian mode of orders `n_x`, `n_y`:
/// `H_nx(sqrt(2) x / w0) H_ny(sqrt(2) y / w0) exp(-(x^2 + y^2) / w0^2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct HermiteGaussianTransverseProfile {
    pub w0: f64,
    pub n_x: usize,
    pub n_y: usize,
}

impl HermiteGaussianTransverseProfile {
    pub fn new(w0: f64, n_x: usize, n_y: usize) -> ProfileResult<Self> {
        require_positive("w0", w0)?;
        Ok(Self { w0, n_x, n_y })
    }
}

impl TransverseProfile for HermiteGaussianTransverseProfile {
    fn evaluate(&self, x: &ArrayViewD<'_, f64>, y: &ArrayViewD<'_, f64>) -> ArrayD<Complex64> {
        let w0_sq = self.w0 * self.w0;
        let scale = 2f64.sqrt() / self.w0;
        Zip::from(x).and(y).map_collect(|&x, &y| {
            let value = hermite(self.n_x, scale * x)
                * hermite(self.n_y, scale * y)
                * (-(x * x + y * y) / w0_sq).exp();
            Complex64::new(value, 0.0)
        })
    }
}

/// Super-Gaussian (flat-top) envelope `exp(-(r / w0)^n_order)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SuperGaussianTransverseProfile {
    pub w0: f64,
    pub n_order: f64,
}

impl SuperGaussianTransverseProfile {
    pub fn new(w0: f64, n_order: f64) -> ProfileResult<Self> {
        require_positive("w0", w0)?;
        require_positive("n_order", n_order)?;
        Ok(Self { w0, n_order })
    }
}

impl TransverseProfile for SuperGaussianTransverseProfile {
    fn evaluate(&self, x: &ArrayViewD<'_, f64>, y: &ArrayViewD<'_, f64>) -> ArrayD<Complex64> {
        Zip::from(x).and(y).map_collect(|&x, &y| {
            let r = (x * x + y * y).sqrt();
            Complex64::new((-(r / self.w0).powf(self.n_order)).exp(), 0.0)
        })
    }
}

/// Generalized Laguerre polynomial `L_p^alpha(x)` by upward recurrence.
pub fn generalized_laguerre(p: usize, alpha: f64, x: f64) -> f64 {
    if p == 0 {
        return 1.0;
    }
    let mut prev = 1.0;
    let mut curr = 1.0 + alpha - x;
    for k in 1..p {
        let k = k as f64;
        let next = ((2.0 * k + 1.0 + alpha - x) * curr - (k + alpha) * prev) / (k + 1.0);
        prev = curr;
        curr = next;
    }
    curr
}

/// Physicists' Hermite polynomial `H_n(x)`.
pub fn hermite(n: usize, x: f64) -> f64 {
    if n == 0 {
        return 1.0;
    }
    let mut prev = 1.0;
    let mut curr = 2.0 * x;
    for k in 1..n {
        let next = 2.0 * x * curr - 2.0 * k as f64 * prev;
        prev = curr;
        curr = next;
    }
    curr
}
