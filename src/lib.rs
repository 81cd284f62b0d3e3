pub mod combined;
pub mod constants;
pub mod error;
pub mod grid;
pub mod laser;
pub mod longitudinal;
pub mod polarization;
pub mod profile;
pub mod settings;
pub mod transverse;
pub mod utils;

pub use error::{ProfileError, ProfileResult};
pub use grid::{Dimensionality, Grid, GridBox};
pub use laser::{Laser, Normalization};
pub use profile::{Profile, ScaledProfile, SummedProfile, ZeroProfile};
