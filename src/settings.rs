use anyhow::{ensure, Context, Result};
use clap::Parser;
use config::{Config, Environment, File};
use num_complex::Complex64;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

use crate::combined::{CombinedLongitudinalTransverseProfile, GaussianProfile};
use crate::grid::Dimensionality;
use crate::laser::{Laser, Normalization};
use crate::longitudinal::GaussianLongitudinalProfile;
use crate::profile::Profile;
use crate::transverse::{
    HermiteGaussianTransverseProfile, LaguerreGaussianTransverseProfile,
    SuperGaussianTransverseProfile, TransverseProfile,
};


/// Runtime configuration for the application.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub dim: Dimensionality,
    pub lo: Vec<f64>,
    pub hi: Vec<f64>,
    pub npoints: Vec<usize>,
    #[serde(default = "default_azimuthal_modes")]
    pub n_azimuthal_modes: usize,
    pub wavelength: f64,
    pub polarization: Vec<Complex64>,
    pub laser_energy: f64,
    pub w0: f64,
    pub tau: f64,
    #[serde(default)]
    pub t_peak: f64,
    #[serde(default)]
    pub cep_phase: f64,
    pub transverse: TransverseSettings,
    pub normalization: Option<Normalization>,
}

/// Shape of the transverse envelope. The waist is shared by all variants.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransverseSettings {
    Gaussian,
    LaguerreGaussian { p: usize, m: i32 },
    HermiteGaussian { n_x: usize, n_y: usize },
    SuperGaussian { n_order: f64 },
}

fn default_azimuthal_modes() -> usize {
    1
}

impl Settings {
    /// Builds the profile described by these settings.
    pub fn build_profile(&self) -> Result<Box<dyn Profile>> {
        let transverse: Box<dyn TransverseProfile> = match self.transverse {
            TransverseSettings::Gaussian => {
                let profile = GaussianProfile::new(
                    self.wavelength,
                    &self.polarization,
                    self.laser_energy,
                    self.w0,
                    self.tau,
                    self.t_peak,
                    self.cep_phase,
                )?;
                return Ok(Box::new(profile));
            }
            TransverseSettings::LaguerreGaussian { p, m } => {
                Box::new(LaguerreGaussianTransverseProfile::new(self.w0, p, m)?)
            }
            TransverseSettings::HermiteGaussian { n_x, n_y } => {
                Box::new(HermiteGaussianTransverseProfile::new(self.w0, n_x, n_y)?)
            }
            TransverseSettings::SuperGaussian { n_order } => {
                Box::new(SuperGaussianTransverseProfile::new(self.w0, n_order)?)
            }
        };

        let longitudinal = GaussianLongitudinalProfile::new(
            self.wavelength,
            self.tau,
            self.t_peak,
            self.cep_phase,
        )?;
        let profile = CombinedLongitudinalTransverseProfile::new(
            self.wavelength,
            &self.polarization,
            self.laser_energy,
            Box::new(longitudinal),
            transverse,
        )?;
        Ok(Box::new(profile))
    }

    /// Builds the profile, evaluates it on the configured grid and applies the
    /// configured normalisation, if any.
    pub fn build_laser(&self) -> Result<Laser> {
        let profile = self.build_profile()?;
        let mut laser = Laser::new(
            self.dim,
            &self.lo,
            &self.hi,
            &self.npoints,
            profile,
            self.n_azimuthal_modes,
        )
        .context("failed to evaluate the profile on the grid")?;

        if let Some(normalization) = self.normalization {
            laser
                .normalize(normalization)
                .with_context(|| format!("failed to apply {:?}", normalization))?;
        }
        Ok(laser)
    }
}

pub fn load_default_config() -> Result<Settings> {
    let lasy_dir = retrieve_project_root()?;
    let default_config_file = lasy_dir.join("config/default.toml");

    let settings = Config::builder()
        .add_source(File::from(default_config_file).required(true))
        .build()
        .context("error loading configuration")?;

    let config: Settings = settings
        .try_deserialize()
        .context("error deserializing configuration")?;

    validate_config(&config)?;

    Ok(config)
}

pub fn load_config() -> Result<Settings> {
    let lasy_dir = retrieve_project_root()?;

    let default_config_file = lasy_dir.join("config/default.toml");
    let local_config = lasy_dir.join("config/local.toml");

    // Check if local config exists, if not use default
    let config_file = if local_config.exists() {
        info!("Using local configuration: {:?}", local_config);
        local_config
    } else {
        info!("Using default configuration: {:?}", default_config_file);
        default_config_file
    };

    let settings = Config::builder()
        .add_source(File::from(config_file).required(true))
        .add_source(Environment::with_prefix("lasy"))
        .build()
        .context("error loading configuration")?;

    let mut config: Settings = settings
        .try_deserialize()
        .context("error deserializing configuration")?;

    // Parse command-line arguments and override values
    let args = CliArgs::parse();

    if let Some(dim) = args.dim {
        config.dim = dim;
    }
    if let Some(lo) = args.lo {
        config.lo = lo;
    }
    if let Some(hi) = args.hi {
        config.hi = hi;
    }
    if let Some(npoints) = args.npoints {
        config.npoints = npoints;
    }
    if let Some(modes) = args.modes {
        config.n_azimuthal_modes = modes;
    }
    if let Some(wavelength) = args.w {
        config.wavelength = wavelength;
    }
    if let Some(w0) = args.w0 {
        config.w0 = w0;
    }
    if let Some(tau) = args.tau {
        config.tau = tau;
    }

    // Handle normalisation
    if let Some(energy) = args.energy {
        config.normalization = Some(Normalization::Energy(energy));
    } else if let Some(amplitude) = args.peak_field {
        config.normalization = Some(Normalization::PeakField(amplitude));
    } else if let Some(intensity) = args.peak_intensity {
        config.normalization = Some(Normalization::PeakIntensity(intensity));
    }

    validate_config(&config)?;

    info!("{}", config);

    Ok(config)
}

/// Retrieve the project root directory.
/// This function tries to find the project root directory in different ways:
/// 1. If the CARGO_MANIFEST_DIR environment variable is set, use it.
/// 2. If the LASY_ROOT_DIR environment variable is set, use it.
/// 3. If the "config" subdirectory is found in the executable directory or any
///    of its parents, use it.
fn retrieve_project_root() -> Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        // When running through cargo (e.g. cargo run, cargo test)
        return Ok(PathBuf::from(manifest_dir));
    }
    if let Ok(path) = env::var("LASY_ROOT_DIR") {
        return Ok(PathBuf::from(path));
    }

    // Walk upward from the executable directory
    let exe_path = env::current_exe().context("failed to get current executable path")?;
    exe_path
        .ancestors()
        .skip(1)
        .find(|dir| dir.join("config").is_dir())
        .map(PathBuf::from)
        .context("could not find project root directory")
}

fn validate_config(config: &Settings) -> Result<()> {
    ensure!(config.wavelength > 0.0, "Wavelength must be greater than 0");
    ensure!(config.laser_energy > 0.0, "Laser energy must be greater than 0");
    let n_axes = config.dim.n_axes();
    ensure!(
        config.lo.len() == n_axes && config.hi.len() == n_axes && config.npoints.len() == n_axes,
        "A {} grid needs {} values for lo, hi and npoints",
        config.dim,
        n_axes
    );
    ensure!(
        config.n_azimuthal_modes >= 1,
        "At least one azimuthal mode is required"
    );
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about = "lasy - laser pulse envelopes on grids")]
pub struct CliArgs {
    /// Grid geometry.
    #[arg(long, value_enum)]
    dim: Option<Dimensionality>,

    /// Lower bounds of the grid, separated by spaces (m for space, s for time).
    #[arg(long, num_args = 2..=3, value_delimiter = ' ', allow_negative_numbers = true)]
    lo: Option<Vec<f64>>,

    /// Upper bounds of the grid, separated by spaces (m for space, s for time).
    #[arg(long, num_args = 2..=3, value_delimiter = ' ', allow_negative_numbers = true)]
    hi: Option<Vec<f64>>,

    /// Number of points along each axis, separated by spaces.
    #[arg(long, num_args = 2..=3, value_delimiter = ' ')]
    npoints: Option<Vec<usize>>,

    /// Number of azimuthal modes for `rt` grids.
    #[arg(long)]
    modes: Option<usize>,

    /// Central wavelength (m).
    #[arg(short, long = "wavelength")]
    w: Option<f64>,

    /// Transverse waist (m).
    #[arg(long)]
    w0: Option<f64>,

    /// Pulse duration (s).
    #[arg(long)]
    tau: Option<f64>,

    /// Normalise the pulse to this energy (J).
    #[arg(long, group = "normalization")]
    energy: Option<f64>,

    /// Normalise the pulse to this peak field amplitude (V/m).
    #[arg(long, group = "normalization")]
    peak_field: Option<f64>,

    /// Normalise the pulse to this peak intensity (W/m^2).
    #[arg(long, group = "normalization")]
    peak_intensity: Option<f64>,
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings:
  - Dimensionality: {}
  - Lower bounds: {:?}
  - Upper bounds: {:?}
  - Points: {:?}
  - Azimuthal modes: {}
  - Wavelength: {:.6e}
  - Polarization: {:?}
  - Laser energy: {:.6e}
  - Waist: {:.6e}
  - Duration: {:.6e}
  - Transverse: {:?}
  - Normalization: {:?}
  ",
            self.dim,
            self.lo,
            self.hi,
            self.npoints,
            self.n_azimuthal_modes,
            self.wavelength,
            self.polarization,
            self.laser_energy,
            self.w0,
            self.tau,
            self.transverse,
            self.normalization,
        )
    }
}
