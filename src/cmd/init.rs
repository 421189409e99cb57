use crate::data::AppSettings;
use crate::data::persistence::{get_config_dir, get_file_path};
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

pub fn run() -> Result<()> {
    let dir = get_config_dir()?;
    run_in_dir(&dir)?;
    println!("Config written to {}", get_file_path("config.yaml")?.display());
    Ok(())
}

/// Writes the default config.yaml into `dir`, creating it if needed.
pub(crate) fn run_in_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    AppSettings::default().save_to(dir)?;
    info!("initialized config in {}", dir.display());
    Ok(())
}
