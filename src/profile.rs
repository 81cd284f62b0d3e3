//! Laser profiles and their algebra.
//!
//! A profile describes the complex envelope of a laser pulse as an analytic
//! function of the transverse coordinates `x`, `y` and of time `t`, together
//! with the central wavelength and the polarization vector that turn the
//! envelope into the `Ex` and `Ey` field components.
//!
//! Profiles compose functionally:
//! - [`SummedProfile`] adds the envelopes of several profiles sharing a
//!   wavelength and a polarization
//! - [`ScaledProfile`] multiplies an envelope by a real factor
//!
//! Both are profiles themselves, so compositions nest freely. The `+` and `*`
//! operators are available on every profile type in this crate and return a
//! [`ProfileResult`], since composition validates its operands.

use std::f64::consts::PI;
use std::fmt;

use ndarray::{ArrayD, ArrayViewD};
use num_complex::Complex64;
use rayon::prelude::*;

use crate::combined::{CombinedLongitudinalTransverseProfile, GaussianProfile};
use crate::constants::{C, WAVELENGTH_RTOL};
use crate::error::{ProfileError, ProfileResult};
use crate::polarization::Polarization;


/// Properties shared by every profile: central wavelength, the derived
/// angular frequency and the normalised polarization vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileBase {
    pub wavelength: f64,        // central wavelength (m)
    pub angular_frequency: f64, // 2 pi c / wavelength (rad/s)
    pub polarization: Polarization,
}

impl ProfileBase {
    pub fn new(wavelength: f64, polarization: &[Complex64]) -> ProfileResult<Self> {
        if !(wavelength.is_finite() && wavelength > 0.0) {
            return Err(ProfileError::InvalidArgument(format!(
                "wavelength must be positive and finite, got {}",
                wavelength
            )));
        }

        Ok(Self {
            wavelength,
            angular_frequency: 2.0 * PI * C / wavelength,
            polarization: Polarization::new(polarization)?,
        })
    }
}

impl fmt::Display for ProfileBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "wavelength: {:.6e} m, omega0: {:.6e} rad/s, polarization: {}",
            self.wavelength, self.angular_frequency, self.polarization
        )
    }
}

/// The envelope of a laser pulse as a function of `x`, `y` and `t`.
pub trait Profile: fmt::Debug + Send + Sync {
    fn base(&self) -> &ProfileBase;

    /// Envelope at each point, without validating the coordinates.
    ///
    /// The three arrays must share a shape; implementations may panic
    /// otherwise. [`Profile::evaluate`] checks the shapes first.
    fn envelope(
        &self,
        x: &ArrayViewD<'_, f64>,
        y: &ArrayViewD<'_, f64>,
        t: &ArrayViewD<'_, f64>,
    ) -> ArrayD<Complex64>;

    fn wavelength(&self) -> f64 {
        self.base().wavelength
    }

    fn angular_frequency(&self) -> f64 {
        self.base().angular_frequency
    }

    fn polarization(&self) -> Polarization {
        self.base().polarization
    }

    /// Energy (J) the pulse should carry once put on a grid, if the profile defines one.
    fn laser_energy(&self) -> Option<f64> {
        None
    }

    /// Returns the complex envelope at the points `(x, y, t)`, in an array of
    /// the same shape as the coordinates.
    fn evaluate(
        &self,
        x: ArrayViewD<'_, f64>,
        y: ArrayViewD<'_, f64>,
        t: ArrayViewD<'_, f64>,
    ) -> ProfileResult<ArrayD<Complex64>> {
        check_coordinates(&x, &y, &t)?;
        Ok(self.envelope(&x, &y, &t))
    }

    /// Sum of this profile and `other`.
    fn add_profile<P: Profile + 'static>(self, other: P) -> ProfileResult<SummedProfile>
    where
        Self: Sized + 'static,
    {
        SummedProfile::new(vec![Box::new(self), Box::new(other)])
    }

    /// This profile multiplied by a real `factor`.
    fn scale(self, factor: f64) -> ProfileResult<ScaledProfile>
    where
        Self: Sized + 'static,
    {
        ScaledProfile::new(Box::new(self), factor)
    }
}

impl Profile for Box<dyn Profile> {
    fn base(&self) -> &ProfileBase {
        (**self).base()
    }

    fn envelope(
        &self,
        x: &ArrayViewD<'_, f64>,
        y: &ArrayViewD<'_, f64>,
        t: &ArrayViewD<'_, f64>,
    ) -> ArrayD<Complex64> {
        (**self).envelope(x, y, t)
    }

    fn laser_energy(&self) -> Option<f64> {
        (**self).laser_energy()
    }
}

pub fn check_coordinates(
    x: &ArrayViewD<'_, f64>,
    y: &ArrayViewD<'_, f64>,
    t: &ArrayViewD<'_, f64>,
) -> ProfileResult<()> {
    if x.shape() != y.shape() || x.shape() != t.shape() {
        return Err(ProfileError::DimensionMismatch(format!(
            "coordinate arrays must share a shape: x {:?}, y {:?}, t {:?}",
            x.shape(),
            y.shape(),
            t.shape()
        )));
    }
    Ok(())
}

/// Profile whose envelope vanishes everywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroProfile {
    base: ProfileBase,
}

impl ZeroProfile {
    pub fn new(wavelength: f64, polarization: &[Complex64]) -> ProfileResult<Self> {
        Ok(Self {
            base: ProfileBase::new(wavelength, polarization)?,
        })
    }
}

impl Profile for ZeroProfile {
    fn base(&self) -> &ProfileBase {
        &self.base
    }

    fn envelope(
        &self,
        x: &ArrayViewD<'_, f64>,
        _y: &ArrayViewD<'_, f64>,
        _t: &ArrayViewD<'_, f64>,
    ) -> ArrayD<Complex64> {
        ArrayD::zeros(x.raw_dim())
    }
}

/// Sum of several profiles.
///
/// All summands must share the same wavelength and polarization; those of the
/// first summand are adopted by the sum.
#[derive(Debug)]
pub struct SummedProfile {
    base: ProfileBase,
    profiles: Vec<Box<dyn Profile>>,
}

impl SummedProfile {
    pub fn new(profiles: Vec<Box<dyn Profile>>) -> ProfileResult<Self> {
        let first = profiles.first().ok_or_else(|| {
            ProfileError::InvalidArgument("a summed profile needs at least one summand".into())
        })?;
        let base = *first.base();

        for (i, profile) in profiles.iter().enumerate().skip(1) {
            let wavelength = profile.wavelength();
            if (wavelength - base.wavelength).abs() > WAVELENGTH_RTOL * base.wavelength.abs() {
                return Err(ProfileError::InvalidArgument(format!(
                    "added profiles must have the same wavelength: \
                     summand {} has {:e} m, expected {:e} m",
                    i, wavelength, base.wavelength
                )));
            }
            if !profile.polarization().is_close(&base.polarization) {
                return Err(ProfileError::InvalidArgument(format!(
                    "added profiles must have the same polarization: \
                     summand {} has {}, expected {}",
                    i,
                    profile.polarization(),
                    base.polarization
                )));
            }
        }

        Ok(Self { base, profiles })
    }

    pub fn profiles(&self) -> &[Box<dyn Profile>] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Profile for SummedProfile {
    fn base(&self) -> &ProfileBase {
        &self.base
    }

    fn envelope(
        &self,
        x: &ArrayViewD<'_, f64>,
        y: &ArrayViewD<'_, f64>,
        t: &ArrayViewD<'_, f64>,
    ) -> ArrayD<Complex64> {
        self.profiles
            .par_iter()
            .map(|profile| profile.envelope(x, y, t))
            .reduce_with(|acc, env| acc + env)
            .unwrap_or_else(|| ArrayD::zeros(x.raw_dim()))
    }
}

/// A profile multiplied by a real factor. Complex factors belong in the
/// polarization vector.
#[derive(Debug)]
pub struct ScaledProfile {
    base: ProfileBase,
    profile: Box<dyn Profile>,
    factor: f64,
}

impl ScaledProfile {
    pub fn new(profile: Box<dyn Profile>, factor: f64) -> ProfileResult<Self> {
        if !factor.is_finite() {
            return Err(ProfileError::InvalidArgument(format!(
                "scale factor must be a finite real number, got {}",
                factor
            )));
        }

        Ok(Self {
            base: *profile.base(),
            profile,
            factor,
        })
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn inner(&self) -> &dyn Profile {
        self.profile.as_ref()
    }
}

impl Profile for ScaledProfile {
    fn base(&self) -> &ProfileBase {
        &self.base
    }

    fn envelope(
        &self,
        x: &ArrayViewD<'_, f64>,
        y: &ArrayViewD<'_, f64>,
        t: &ArrayViewD<'_, f64>,
    ) -> ArrayD<Complex64> {
        self.profile.envelope(x, y, t) * self.factor
    }
}

/// `+` and `*` sugar over [`Profile::add_profile`] and [`Profile::scale`].
macro_rules! impl_profile_ops {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<P: Profile + 'static> std::ops::Add<P> for $ty {
                type Output = ProfileResult<SummedProfile>;

                fn add(self, other: P) -> Self::Output {
                    self.add_profile(other)
                }
            }

            impl std::ops::Mul<f64> for $ty {
                type Output = ProfileResult<ScaledProfile>;

                fn mul(self, factor: f64) -> Self::Output {
                    self.scale(factor)
                }
            }

            impl std::ops::Mul<$ty> for f64 {
                type Output = ProfileResult<ScaledProfile>;

                fn mul(self, profile: $ty) -> Self::Output {
                    profile.scale(self)
                }
            }
        )*
    };
}

impl_profile_ops!(
    ZeroProfile,
    SummedProfile,
    ScaledProfile,
    CombinedLongitudinalTransverseProfile,
    GaussianProfile,
);

/// Rejects shape parameters that are not strictly positive and finite.
pub(crate) fn require_positive(name: &str, value: f64) -> ProfileResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ProfileError::InvalidArgument(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}
