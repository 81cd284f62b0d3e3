//! Grid geometry and field storage for evaluated envelopes.

use std::fmt;

use clap::ValueEnum;
use ndarray::{Array1, Array3};
use num_complex::Complex64;
use serde::Deserialize;

use crate::error::{ProfileError, ProfileResult};


/// Geometry of the grid the envelope lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dimensionality {
    /// Cartesian `(x, y)` transversely, time longitudinally.
    Xyt,
    /// Cylindrical `r` transversely, decomposed in azimuthal modes, time longitudinally.
    Rt,
}

impl Dimensionality {
    /// Number of box axes for this geometry.
    pub fn n_axes(&self) -> usize {
        match self {
            Dimensionality::Xyt => 3,
            Dimensionality::Rt => 2,
        }
    }
}

impl fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimensionality::Xyt => write!(f, "xyt"),
            Dimensionality::Rt => write!(f, "rt"),
        }
    }
}

/// Extent and sampling of a grid. The last axis is always time.
#[derive(Debug, Clone, PartialEq)]
pub struct GridBox {
    pub dim: Dimensionality,
    pub lo: Vec<f64>,
    pub hi: Vec<f64>,
    pub npoints: Vec<usize>,
    pub dx: Vec<f64>,           // cell spacing per axis
    pub axes: Vec<Array1<f64>>, // coordinates per axis
    pub n_azimuthal_modes: usize,
}

impl GridBox {
    pub fn new(
        dim: Dimensionality,
        lo: &[f64],
        hi: &[f64],
        npoints: &[usize],
        n_azimuthal_modes: usize,
    ) -> ProfileResult<Self> {
        let n_axes = dim.n_axes();
        if lo.len() != n_axes || hi.len() != n_axes || npoints.len() != n_axes {
            return Err(ProfileError::DimensionMismatch(format!(
                "a {} box needs {} values for lo, hi and npoints, got {}, {} and {}",
                dim,
                n_axes,
                lo.len(),
                hi.len(),
                npoints.len()
            )));
        }
        if n_azimuthal_modes == 0 {
            return Err(ProfileError::InvalidArgument(
                "n_azimuthal_modes must be at least 1".into(),
            ));
        }

        let mut dx = Vec::with_capacity(n_axes);
        let mut axes = Vec::with_capacity(n_axes);
        for ((&lo, &hi), &n) in lo.iter().zip(hi).zip(npoints) {
            if n < 2 {
                return Err(ProfileError::InvalidArgument(format!(
                    "each axis needs at least 2 points, got {}",
                    n
                )));
            }
            if !(lo.is_finite() && hi.is_finite() && hi > lo) {
                return Err(ProfileError::InvalidArgument(format!(
                    "axis bounds must be finite with hi > lo, got lo = {}, hi = {}",
                    lo, hi
                )));
            }
            dx.push((hi - lo) / (n - 1) as f64);
            axes.push(Array1::linspace(lo, hi, n));
        }

        Ok(Self {
            dim,
            lo: lo.to_vec(),
            hi: hi.to_vec(),
            npoints: npoints.to_vec(),
            dx,
            axes,
            n_azimuthal_modes,
        })
    }

    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    /// Azimuthal mode numbers in the order they are stored along the first
    /// field axis of an `rt` grid: `0, 1, ..., n-1, -(n-1), ..., -1`.
    pub fn azimuthal_modes(&self) -> Vec<i64> {
        let n = self.n_azimuthal_modes as i64;
        (0..n).chain(-(n - 1)..0).collect()
    }
}

/// Envelope values on a grid, together with the grid geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub field: Array3<Complex64>,
    pub grid_box: GridBox,
}

impl Grid {
    /// Creates a grid with a zero field.
    pub fn new(grid_box: GridBox) -> Self {
        let field = Array3::zeros(Self::field_shape(&grid_box));
        Self { field, grid_box }
    }

    /// Shape of the field array for a box: `(nx, ny, nt)` for `xyt` and
    /// `(2 n_modes - 1, nr, nt)` for `rt`.
    pub fn field_shape(grid_box: &GridBox) -> (usize, usize, usize) {
        let n = &grid_box.npoints;
        match grid_box.dim {
            Dimensionality::Xyt => (n[0], n[1], n[2]),
            Dimensionality::Rt => (2 * grid_box.n_azimuthal_modes - 1, n[0], n[1]),
        }
    }
}
