use lasy::combined::{CombinedLongitudinalTransverseProfile, GaussianProfile};
use lasy::longitudinal::GaussianLongitudinalProfile;
use lasy::polarization::Polarization;
use lasy::transverse::{HermiteGaussianTransverseProfile, SuperGaussianTransverseProfile};
use lasy::{Dimensionality, Laser, Profile, ProfileError, SummedProfile};
use ndarray::{Array1, ArrayD};
use num_complex::Complex64;
use proptest::prelude::*;

const WAVELENGTH: f64 = 0.8e-6;
const TOL: f64 = 1e-12;

fn pol() -> [Complex64; 2] {
    [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)]
}

fn gaussian(w0: f64, t_peak: f64) -> GaussianProfile {
    GaussianProfile::new(WAVELENGTH, &pol(), 1.0, w0, 25e-15, t_peak, 0.0).unwrap()
}

fn hermite(n_x: usize) -> CombinedLongitudinalTransverseProfile {
    CombinedLongitudinalTransverseProfile::new(
        WAVELENGTH,
        &pol(),
        1.0,
        Box::new(GaussianLongitudinalProfile::new(WAVELENGTH, 25e-15, 0.0, 0.0).unwrap()),
        Box::new(HermiteGaussianTransverseProfile::new(4e-6, n_x, 1).unwrap()),
    )
    .unwrap()
}

fn super_gaussian() -> CombinedLongitudinalTransverseProfile {
    CombinedLongitudinalTransverseProfile::new(
        WAVELENGTH,
        &pol(),
        1.0,
        Box::new(GaussianLongitudinalProfile::new(WAVELENGTH, 25e-15, 5e-15, 0.2).unwrap()),
        Box::new(SuperGaussianTransverseProfile::new(6e-6, 6.0).unwrap()),
    )
    .unwrap()
}

fn coords() -> (ArrayD<f64>, ArrayD<f64>, ArrayD<f64>) {
    let x = Array1::linspace(-8e-6, 8e-6, 11).into_dyn();
    let y = Array1::linspace(6e-6, -4e-6, 11).into_dyn();
    let t = Array1::linspace(-30e-15, 30e-15, 11).into_dyn();
    (x, y, t)
}

fn eval<P: Profile>(profile: &P) -> ArrayD<Complex64> {
    let (x, y, t) = coords();
    profile.evaluate(x.view(), y.view(), t.view()).unwrap()
}

fn assert_close(a: &ArrayD<Complex64>, b: &ArrayD<Complex64>) {
    assert_eq!(a.shape(), b.shape());
    for (u, v) in a.iter().zip(b.iter()) {
        assert!((u - v).norm() < TOL, "{} != {}", u, v);
    }
}

#[test]
fn addition_is_commutative() {
    let ab = (gaussian(5e-6, 0.0) + hermite(1)).unwrap();
    let ba = (hermite(1) + gaussian(5e-6, 0.0)).unwrap();
    assert_close(&eval(&ab), &eval(&ba));
}

#[test]
fn addition_is_associative() {
    let left = ((gaussian(5e-6, 0.0) + hermite(2)).unwrap() + super_gaussian()).unwrap();
    let right = (gaussian(5e-6, 0.0) + (hermite(2) + super_gaussian()).unwrap()).unwrap();
    assert_close(&eval(&left), &eval(&right));
}

#[test]
fn sum_of_scaled_profiles() {
    let combo = ((2.0 * gaussian(5e-6, 0.0)).unwrap() + (hermite(0) * -0.5).unwrap()).unwrap();
    let expected = eval(&gaussian(5e-6, 0.0)) * 2.0 - eval(&hermite(0)) * 0.5;
    assert_close(&eval(&combo), &expected);
}

#[test]
fn different_wavelengths_cannot_be_added() {
    let other = GaussianProfile::new(1.0e-6, &pol(), 1.0, 5e-6, 25e-15, 0.0, 0.0).unwrap();
    let err = (gaussian(5e-6, 0.0) + other).unwrap_err();
    assert!(matches!(err, ProfileError::InvalidArgument(_)));
}

#[test]
fn composed_profiles_carry_no_laser_energy() {
    let scaled = gaussian(5e-6, 0.0).scale(3.0).unwrap();
    assert_eq!(scaled.inner().laser_energy(), Some(1.0));
    assert_eq!(scaled.laser_energy(), None);

    let sum = (gaussian(5e-6, 0.0) + gaussian(5e-6, 0.0)).unwrap();
    assert_eq!(sum.laser_energy(), None);
    assert_eq!(sum.profiles().len(), 2);
}

fn xyt_laser(profile: Box<dyn Profile>) -> Laser {
    Laser::new(
        Dimensionality::Xyt,
        &[-10e-6, -10e-6, -60e-15],
        &[10e-6, 10e-6, 60e-15],
        &[20, 20, 30],
        profile,
        1,
    )
    .unwrap()
}

#[test]
fn scaling_survives_grid_evaluation() {
    let k = 3.0;
    let unnormalised = || SummedProfile::new(vec![Box::new(gaussian(5e-6, 0.0))]).unwrap();
    let plain = xyt_laser(Box::new(unnormalised()));
    let scaled = xyt_laser(Box::new((k * unnormalised()).unwrap()));

    assert_eq!(plain.profile.laser_energy(), None);
    assert_eq!(scaled.profile.wavelength(), WAVELENGTH);
    for (u, v) in scaled.grid.field.iter().zip(plain.grid.field.iter()) {
        assert!((u - v * k).norm() <= TOL * (1.0 + v.norm()));
    }
    let ratio = scaled.energy().unwrap() / plain.energy().unwrap();
    assert!((ratio - k * k).abs() < 1e-10);
}

#[test]
fn sum_of_identical_profiles_doubles_the_field() {
    let single = xyt_laser(Box::new(
        SummedProfile::new(vec![Box::new(gaussian(5e-6, 0.0))]).unwrap(),
    ));
    let doubled = xyt_laser(Box::new((gaussian(5e-6, 0.0) + gaussian(5e-6, 0.0)).unwrap()));
    for (u, v) in doubled.grid.field.iter().zip(single.grid.field.iter()) {
        assert!((u - v * 2.0).norm() <= TOL * (1.0 + v.norm()));
    }
}

proptest! {
    /// Polarization vectors have unit norm after construction.
    #[test]
    fn polarization_unit_norm(
        a_re in -10.0f64..10.0,
        a_im in -10.0f64..10.0,
        b_re in -10.0f64..10.0,
        b_im in -10.0f64..10.0,
    ) {
        prop_assume!(a_re.abs() + a_im.abs() + b_re.abs() + b_im.abs() > 1e-6);
        let components = [Complex64::new(a_re, a_im), Complex64::new(b_re, b_im)];
        let pol = Polarization::new(&components).unwrap();
        let norm_sq = pol.x().norm_sqr() + pol.y().norm_sqr();
        prop_assert!((norm_sq - 1.0).abs() < 1e-12);
    }

    /// Scaling twice matches a single scaling by the product.
    #[test]
    fn repeated_scaling(k1 in -100.0f64..100.0, k2 in -100.0f64..100.0) {
        let profile = gaussian(5e-6, 10e-15);
        let expected = eval(&profile) * (k1 * k2);
        let scaled = profile.scale(k1).unwrap().scale(k2).unwrap();
        let result = eval(&scaled);
        for (u, v) in result.iter().zip(expected.iter()) {
            prop_assert!((u - v).norm() <= 1e-12 * (1.0 + v.norm()));
        }
    }

    /// Summation order does not change the envelope.
    #[test]
    fn summation_order(w_a in 1e-6f64..1e-5, w_b in 1e-6f64..1e-5, t_a in -2e-14f64..2e-14) {
        let ab = (gaussian(w_a, t_a) + gaussian(w_b, 0.0)).unwrap();
        let ba = (gaussian(w_b, 0.0) + gaussian(w_a, t_a)).unwrap();
        for (u, v) in eval(&ab).iter().zip(eval(&ba).iter()) {
            prop_assert!((u - v).norm() < TOL);
        }
    }
}
