use lasy::combined::GaussianProfile;
use lasy::constants::{C, EPSILON_0};
use lasy::utils::{
    compute_laser_energy, compute_peak_field, normalize_energy, normalize_peak_field_amplitude,
    normalize_peak_intensity,
};
use lasy::{Dimensionality, Grid, GridBox, Laser, ProfileError, ZeroProfile};
use num_complex::Complex64;

// Relative tolerance for comparing energies
const TOL: f64 = 1e-10;

fn unit_xyt_grid(n: usize, dx: f64, dy: f64, dt: f64) -> Grid {
    let last = (n - 1) as f64;
    let grid_box = GridBox::new(
        Dimensionality::Xyt,
        &[0.0, 0.0, 0.0],
        &[last * dx, last * dy, last * dt],
        &[n, n, n],
        1,
    )
    .unwrap();
    let mut grid = Grid::new(grid_box);
    grid.field.fill(Complex64::new(1.0, 0.0));
    grid
}

fn gaussian_laser(dim: Dimensionality) -> Laser {
    let profile = GaussianProfile::new(
        0.8e-6,
        &[Complex64::new(1.0, 0.0), Complex64::new(0.0, 1.0)],
        1.0,
        5e-6,
        30e-15,
        0.0,
        0.0,
    )
    .unwrap();
    let laser = match dim {
        Dimensionality::Xyt => Laser::new(
            dim,
            &[-10e-6, -10e-6, -60e-15],
            &[10e-6, 10e-6, 60e-15],
            &[40, 40, 50],
            Box::new(profile),
            1,
        ),
        Dimensionality::Rt => Laser::new(
            dim,
            &[0.0, -60e-15],
            &[10e-6, 60e-15],
            &[50, 100],
            Box::new(profile),
            2,
        ),
    };
    laser.unwrap()
}

fn relative_diff(a: f64, b: f64) -> f64 {
    (a - b).abs() / b.abs()
}

#[test]
fn uniform_field_energy_matches_closed_form() {
    let (n, dx, dy, dt) = (10, 1e-6, 1e-6, 1e-15);
    let grid = unit_xyt_grid(n, dx, dy, dt);
    let energy = compute_laser_energy(Dimensionality::Xyt, &grid).unwrap();
    let expected = (n * n * n) as f64 * dx * dy * dt * C * (EPSILON_0 / 2.0);
    assert!(relative_diff(energy, expected) < TOL, "energy: {}, expected: {}", energy, expected);
}

#[test]
fn gaussian_lasers_carry_profile_energy() {
    for dim in [Dimensionality::Xyt, Dimensionality::Rt] {
        let laser = gaussian_laser(dim);
        let energy = laser.energy().unwrap();
        assert!(relative_diff(energy, 1.0) < TOL, "{}: energy {}", dim, energy);
    }
}

#[test]
fn renormalising_energy() {
    for dim in [Dimensionality::Xyt, Dimensionality::Rt] {
        let mut laser = gaussian_laser(dim);
        normalize_energy(dim, Some(0.25), &mut laser.grid).unwrap();
        let energy = compute_laser_energy(dim, &laser.grid).unwrap();
        assert!(relative_diff(energy, 0.25) < TOL);
    }
}

#[test]
fn peak_field_then_energy() {
    let mut laser = gaussian_laser(Dimensionality::Xyt);
    normalize_peak_field_amplitude(Some(1e13), &mut laser.grid).unwrap();
    assert!(relative_diff(compute_peak_field(&laser.grid), 1e13) < TOL);

    // doubling the field quadruples the energy
    let energy = laser.energy().unwrap();
    normalize_peak_field_amplitude(Some(2e13), &mut laser.grid).unwrap();
    assert!(relative_diff(laser.energy().unwrap(), 4.0 * energy) < TOL);
}

#[test]
fn unset_targets_leave_field_untouched() {
    let mut laser = gaussian_laser(Dimensionality::Rt);
    let before = laser.grid.field.clone();
    normalize_energy(Dimensionality::Rt, None, &mut laser.grid).unwrap();
    normalize_peak_field_amplitude(None, &mut laser.grid).unwrap();
    normalize_peak_intensity(None, &mut laser.grid).unwrap();
    assert_eq!(laser.grid.field, before);
}

#[test]
fn zero_profile_has_zero_energy() {
    let pol = [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)];
    let profile = ZeroProfile::new(0.8e-6, &pol).unwrap();
    let mut laser = Laser::new(
        Dimensionality::Xyt,
        &[-1e-6, -1e-6, -1e-15],
        &[1e-6, 1e-6, 1e-15],
        &[4, 4, 4],
        Box::new(profile),
        1,
    )
    .unwrap();
    assert_eq!(laser.energy().unwrap(), 0.0);

    let err = normalize_energy(Dimensionality::Xyt, Some(1.0), &mut laser.grid).unwrap_err();
    assert!(matches!(err, ProfileError::DivisionByZero(_)));
}

#[test]
fn wrong_dimensionality_is_rejected() {
    let laser = gaussian_laser(Dimensionality::Rt);
    let err = compute_laser_energy(Dimensionality::Xyt, &laser.grid).unwrap_err();
    assert!(matches!(err, ProfileError::DimensionMismatch(_)));
}
