//! A laser pulse: a profile evaluated on a grid.
//!
//! For `xyt` grids the profile is sampled directly on the Cartesian mesh. For
//! `rt` grids it is sampled on `2 n_modes - 1` equally spaced azimuthal angles
//! and decomposed into azimuthal modes with an inverse FFT along the angle,
//! following the numpy normalisation convention (`1 / n_theta` on the inverse).

use std::f64::consts::PI;

use ndarray::{Array3, Axis, Ix3};
use num_complex::Complex64;
use rustfft::FftPlanner;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ProfileError, ProfileResult};
use crate::grid::{Dimensionality, Grid, GridBox};
use crate::profile::Profile;
use crate::utils;


/// Target of a normalisation, in SI units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Normalization {
    /// Total energy (J).
    Energy(f64),
    /// Peak field amplitude (V/m).
    PeakField(f64),
    /// Peak intensity (W/m²).
    PeakIntensity(f64),
}

/// A laser pulse defined by a profile and stored on a grid.
#[derive(Debug)]
pub struct Laser {
    pub dim: Dimensionality,
    pub grid: Grid,
    pub profile: Box<dyn Profile>,
}

impl Laser {
    /// Evaluates `profile` on the box spanned by `lo`, `hi` and `npoints`.
    ///
    /// `n_azimuthal_modes` is only used for `rt` grids. If the profile defines
    /// a laser energy, the field is normalised to it.
    pub fn new(
        dim: Dimensionality,
        lo: &[f64],
        hi: &[f64],
        npoints: &[usize],
        profile: Box<dyn Profile>,
        n_azimuthal_modes: usize,
    ) -> ProfileResult<Self> {
        let n_modes = match dim {
            Dimensionality::Xyt => 1,
            Dimensionality::Rt => n_azimuthal_modes,
        };
        let grid_box = GridBox::new(dim, lo, hi, npoints, n_modes)?;
        let mut grid = Grid::new(grid_box);

        grid.field = match dim {
            Dimensionality::Xyt => evaluate_xyt(&*profile, &grid.grid_box)?,
            Dimensionality::Rt => evaluate_rt(&*profile, &grid.grid_box)?,
        };

        utils::normalize_energy(dim, profile.laser_energy(), &mut grid)?;

        info!(
            %dim,
            shape = ?grid.field.dim(),
            wavelength = profile.wavelength(),
            "laser created"
        );

        Ok(Self { dim, grid, profile })
    }

    pub fn normalize(&mut self, normalization: Normalization) -> ProfileResult<()> {
        match normalization {
            Normalization::Energy(energy) => {
                utils::normalize_energy(self.dim, Some(energy), &mut self.grid)
            }
            Normalization::PeakField(amplitude) => {
                utils::normalize_peak_field_amplitude(Some(amplitude), &mut self.grid)
            }
            Normalization::PeakIntensity(intensity) => {
                utils::normalize_peak_intensity(Some(intensity), &mut self.grid)
            }
        }
    }

    /// Total energy (J) of the pulse on the grid.
    pub fn energy(&self) -> ProfileResult<f64> {
        utils::compute_laser_energy(self.dim, &self.grid)
    }
}

fn evaluate_xyt(profile: &dyn Profile, grid_box: &GridBox) -> ProfileResult<Array3<Complex64>> {
    let shape = Grid::field_shape(grid_box);
    let axes = &grid_box.axes;
    let x = Array3::from_shape_fn(shape, |(i, _, _)| axes[0][i]).into_dyn();
    let y = Array3::from_shape_fn(shape, |(_, j, _)| axes[1][j]).into_dyn();
    let t = Array3::from_shape_fn(shape, |(_, _, k)| axes[2][k]).into_dyn();

    into_field(profile.evaluate(x.view(), y.view(), t.view())?)
}

fn evaluate_rt(profile: &dyn Profile, grid_box: &GridBox) -> ProfileResult<Array3<Complex64>> {
    let shape = Grid::field_shape(grid_box);
    let n_theta = shape.0;
    let axes = &grid_box.axes;
    let theta = |k: usize| 2.0 * PI * k as f64 / n_theta as f64;

    let x = Array3::from_shape_fn(shape, |(k, i, _)| axes[0][i] * theta(k).cos()).into_dyn();
    let y = Array3::from_shape_fn(shape, |(k, i, _)| axes[0][i] * theta(k).sin()).into_dyn();
    let t = Array3::from_shape_fn(shape, |(_, _, j)| axes[1][j]).into_dyn();
    let envelope = into_field(profile.evaluate(x.view(), y.view(), t.view())?)?;

    debug!(n_theta, "azimuthal decomposition");
    let mut planner = FftPlanner::new();
    let ifft = planner.plan_fft_inverse(n_theta);
    let norm = 1.0 / n_theta as f64;

    let mut field = Array3::zeros(shape);
    let mut buffer = vec![Complex64::new(0.0, 0.0); n_theta];
    for (mut modes, samples) in field
        .lanes_mut(Axis(0))
        .into_iter()
        .zip(envelope.lanes(Axis(0)))
    {
        for (slot, &value) in buffer.iter_mut().zip(samples.iter()) {
            *slot = value;
        }
        ifft.process(&mut buffer);
        for (mode, &value) in modes.iter_mut().zip(buffer.iter()) {
            *mode = value * norm;
        }
    }

    Ok(field)
}

fn into_field(envelope: ndarray::ArrayD<Complex64>) -> ProfileResult<Array3<Complex64>> {
    envelope
        .into_dimensionality::<Ix3>()
        .map_err(|err| ProfileError::DimensionMismatch(format!("envelope is not 3D: {}", err)))
}
