use anyhow::Result;
use lasy::settings;
use lasy::utils;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let settings = settings::load_config()?;
    let laser = settings.build_laser()?;

    println!("Energy:          {:.6e} J", laser.energy()?);
    println!("Peak field:      {:.6e} V/m", utils::compute_peak_field(&laser.grid));
    println!("Peak intensity:  {:.6e} W/m^2", utils::compute_peak_intensity(&laser.grid));

    Ok(())
}
