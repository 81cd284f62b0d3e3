use std::fmt;

use num_complex::Complex64;

use crate::constants::{POLARIZATION_ATOL, POLARIZATION_RTOL};
use crate::error::{ProfileError, ProfileResult};


/// Unit-norm complex 2-vector giving the relative amplitude and phase of the
/// x and y components of the electric field envelope.
///
/// `Ex_env = envelope * pol[0]`, `Ey_env = envelope * pol[1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polarization([Complex64; 2]);

impl Polarization {
    /// Creates a polarization from two complex components, rescaling them to
    /// unit magnitude.
    pub fn new(components: &[Complex64]) -> ProfileResult<Self> {
        if components.len() != 2 {
            return Err(ProfileError::InvalidArgument(format!(
                "polarization must have exactly 2 components, got {}",
                components.len()
            )));
        }

        let norm = (components[0].norm_sqr() + components[1].norm_sqr()).sqrt();
        if norm == 0.0 || !norm.is_finite() {
            return Err(ProfileError::InvalidArgument(format!(
                "polarization must have a finite, non-zero norm: {:?}",
                components
            )));
        }

        Ok(Self([components[0] / norm, components[1] / norm]))
    }

    pub fn linear_x() -> Self {
        Self([Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)])
    }

    pub fn linear_y() -> Self {
        Self([Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)])
    }

    pub fn x(&self) -> Complex64 {
        self.0[0]
    }

    pub fn y(&self) -> Complex64 {
        self.0[1]
    }

    pub fn components(&self) -> [Complex64; 2] {
        self.0
    }

    /// Euclidean norm, 1 up to rounding.
    pub fn norm(&self) -> f64 {
        (self.0[0].norm_sqr() + self.0[1].norm_sqr()).sqrt()
    }

    /// Component-wise comparison with `|a - b| <= atol + rtol * |b|`.
    pub fn is_close(&self, other: &Polarization) -> bool {
        let (lhs, rhs) = (self.components(), other.components());
        lhs.iter().zip(&rhs).all(|(a, b)| {
            (a - b).norm() <= POLARIZATION_ATOL + POLARIZATION_RTOL * b.norm()
        })
    }
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.6} + {:.6}i, {:.6} + {:.6}i)",
            self.0[0].re, self.0[0].im, self.0[1].re, self.0[1].im
        )
    }
}
