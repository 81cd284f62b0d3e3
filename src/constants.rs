/// Speed of light in vacuum (m/s).
pub const C: f64 = 299_792_458.0;
/// Vacuum permittivity (F/m).
pub const EPSILON_0: f64 = 8.854_187_812_8e-12;
/// Relative tolerance for two wavelengths to be considered equal when summing profiles.
pub const WAVELENGTH_RTOL: f64 = 1e-5;
/// Relative tolerance for comparing polarization components.
pub const POLARIZATION_RTOL: f64 = 1e-5;
/// Absolute tolerance for comparing polarization components.
pub const POLARIZATION_ATOL: f64 = 1e-8;
