use anyhow::{Context, Result};
use intervue_core::config::AppSettings;
use intervue_infrastructure::{ConfigStorage, IntervuePaths};
use std::path::Path;

pub async fn run(config_dir: Option<&Path>) -> Result<()> {
    let secret_path = IntervuePaths::new(config_dir)
        .ensure_secret_file()
        .context("Failed to create secret.json")?;
    println!("Secrets: {}", secret_path.display());

    let storage = ConfigStorage::new(config_dir)?;
    if storage.path().exists() {
        println!("Settings: {} (kept)", storage.path().display());
    } else {
        storage
            .save(&AppSettings::default())
            .await
            .context("Failed to write config.toml")?;
        println!("Settings: {}", storage.path().display());
    }

    Ok(())
}
