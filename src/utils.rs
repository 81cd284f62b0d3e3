//! Energy of an envelope on a grid, and normalisation of that envelope.
//!
//! The energy integral is
//!
//! `E_laser = ∫ dV (ε₀ / 2) |E_env|²`
//!
//! which averages over the oscillations at the central wavelength. It is an
//! approximation that does not hold for few-cycle pulses. The time axis is
//! converted into a longitudinal length with `dz = c dt`.
//!
//! Normalisations rescale `grid.field` in place. Each of them takes an
//! optional target and leaves the field untouched when it is `None`.

use std::f64::consts::PI;

use ndarray::Axis;
use tracing::debug;

use crate::constants::{C, EPSILON_0};
use crate::error::{ProfileError, ProfileResult};
use crate::grid::{Dimensionality, Grid};


/// Computes the total laser energy (J) of the envelope stored in `grid`.
///
/// For `xyt` grids every cell has the volume `dx dy c dt`. For `rt` grids the
/// radial cells are rings of volume `π ((r + dr/2)² - (r - dr/2)²) c dt`,
/// applied identically to every azimuthal mode and time step.
pub fn compute_laser_energy(dim: Dimensionality, grid: &Grid) -> ProfileResult<f64> {
    check_grid(dim, grid)?;

    let envelope = &grid.field;
    let grid_box = &grid.grid_box;
    let dz = grid_box.dx[grid_box.dx.len() - 1] * C;

    let energy = match dim {
        Dimensionality::Xyt => {
            let dv = grid_box.dx[0] * grid_box.dx[1] * dz;
            envelope
                .mapv(|e| dv * EPSILON_0 * 0.5 * e.norm_sqr())
                .sum()
        }
        Dimensionality::Rt => {
            let dr = grid_box.dx[0];
            // volume of each radial ring, shaped (1, nr, 1) to broadcast over modes and time
            let dv = grid_box.axes[0]
                .mapv(|r| PI * ((r + 0.5 * dr).powi(2) - (r - 0.5 * dr).powi(2)) * dz)
                .insert_axis(Axis(0))
                .insert_axis(Axis(2));
            let intensity = envelope.mapv(|e| EPSILON_0 * 0.5 * e.norm_sqr());
            (&dv * &intensity).sum()
        }
    };

    Ok(energy)
}

/// Rescales the envelope so that it carries `energy` joules.
pub fn normalize_energy(
    dim: Dimensionality,
    energy: Option<f64>,
    grid: &mut Grid,
) -> ProfileResult<()> {
    let Some(energy) = energy else {
        return Ok(());
    };
    check_target("energy", energy)?;

    let current_energy = compute_laser_energy(dim, grid)?;
    if current_energy == 0.0 {
        return Err(ProfileError::DivisionByZero(
            "cannot normalise the energy of a field that is identically zero".into(),
        ));
    }

    let norm_factor = (energy / current_energy).sqrt();
    debug!(current_energy, energy, norm_factor, "normalising laser energy");
    grid.field.mapv_inplace(|e| e * norm_factor);
    Ok(())
}

/// Rescales the envelope so that its largest modulus is `amplitude` (V/m).
pub fn normalize_peak_field_amplitude(
    amplitude: Option<f64>,
    grid: &mut Grid,
) -> ProfileResult<()> {
    let Some(amplitude) = amplitude else {
        return Ok(());
    };
    check_target("peak field amplitude", amplitude)?;

    let peak = compute_peak_field(grid);
    if peak == 0.0 {
        return Err(ProfileError::DivisionByZero(
            "cannot normalise the peak field of a field that is identically zero".into(),
        ));
    }

    debug!(peak, amplitude, "normalising peak field amplitude");
    grid.field.mapv_inplace(|e| e / peak * amplitude);
    Ok(())
}

/// Rescales the envelope so that its peak intensity is `peak_intensity` (W/m²).
pub fn normalize_peak_intensity(peak_intensity: Option<f64>, grid: &mut Grid) -> ProfileResult<()> {
    let Some(peak_intensity) = peak_intensity else {
        return Ok(());
    };
    check_target("peak intensity", peak_intensity)?;

    let input_peak_intensity = compute_peak_intensity(grid);
    if input_peak_intensity == 0.0 {
        return Err(ProfileError::DivisionByZero(
            "cannot normalise the peak intensity of a field that is identically zero".into(),
        ));
    }

    let norm_factor = (peak_intensity / input_peak_intensity).sqrt();
    debug!(input_peak_intensity, peak_intensity, norm_factor, "normalising peak intensity");
    grid.field.mapv_inplace(|e| e * norm_factor);
    Ok(())
}

/// Largest modulus of the envelope (V/m).
pub fn compute_peak_field(grid: &Grid) -> f64 {
    grid.field.iter().map(|e| e.norm()).fold(0.0, f64::max)
}

/// Largest value of the intensity `|ε₀ E² c / 2|` (W/m²).
pub fn compute_peak_intensity(grid: &Grid) -> f64 {
    grid.field
        .iter()
        .map(|e| (e * e * (EPSILON_0 * C / 2.0)).norm())
        .fold(0.0, f64::max)
}

fn check_target(name: &str, value: f64) -> ProfileResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ProfileError::InvalidArgument(format!(
            "target {} must be finite and non-negative, got {}",
            name, value
        )))
    }
}

/// Checks that the box matches `dim` and that the field matches the box.
fn check_grid(dim: Dimensionality, grid: &Grid) -> ProfileResult<()> {
    let grid_box = &grid.grid_box;
    let n_axes = dim.n_axes();
    if grid_box.dim != dim
        || grid_box.ndim() != n_axes
        || grid_box.dx.len() != n_axes
        || grid_box.npoints.len() != n_axes
    {
        return Err(ProfileError::DimensionMismatch(format!(
            "expected a {} grid with {} axes, got a {} box with {} axes and {} spacings",
            dim,
            n_axes,
            grid_box.dim,
            grid_box.ndim(),
            grid_box.dx.len()
        )));
    }

    let expected = Grid::field_shape(grid_box);
    if grid.field.dim() != expected {
        return Err(ProfileError::DimensionMismatch(format!(
            "field has shape {:?} but the box requires {:?}",
            grid.field.dim(),
            expected
        )));
    }

    let lengths_match = grid_box
        .axes
        .iter()
        .zip(&grid_box.npoints)
        .all(|(axis, &n)| axis.len() == n);
    if !lengths_match {
        return Err(ProfileError::DimensionMismatch(
            "box axes do not match the number of points".into(),
        ));
    }

    Ok(())
}
