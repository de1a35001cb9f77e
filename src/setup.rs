// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

use anyhow::Result;
use inquire::validator::Validation;
use inquire::{Confirm, Text};
use std::path::Path;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::media::Category;

pub async fn interactive_setup(mut config: Config) -> Result<Config> {
    println!("\nWelcome to likedex! Let's set up the movie and TV catalog.\n");
    println!("Movies and TV shows come from TMDB, which needs a free API key:");
    println!("  https://www.themoviedb.org/settings/api");
    println!("Anime comes from Kitsu and needs no key.\n");

    let add_key = Confirm::new("Would you like to enter a TMDB API key now?")
        .with_default(true)
        .prompt()?;

    if !add_key {
        println!("\nYou can add a key later by editing the config file at:");
        println!("  {}", Config::config_path().display());
        println!("or by setting the TMDB_API_KEY environment variable.");
        return Ok(config);
    }

    let key = Text::new("TMDB API key:")
        .with_validator(|input: &str| {
            if input.trim().is_empty() {
                Ok(Validation::Invalid("API key is required".into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt()?;
    config.catalog.tmdb_api_key = key.trim().to_string();

    println!("\nTesting TMDB...");
    if test_tmdb(&config).await {
        println!("Connection successful!");
    } else {
        println!("Warning: TMDB returned no results with this key.");
        println!("    The key will be saved anyway, check it if browsing stays empty.");
    }

    save_config(&config)?;
    Ok(config)
}

async fn test_tmdb(config: &Config) -> bool {
    let Ok(catalog) = Catalog::new(&config.catalog, false) else {
        return false;
    };

    match tokio::time::timeout(
        std::time::Duration::from_secs(10),
        catalog.popular(Category::Movie, 1),
    )
    .await
    {
        Ok(result) => !result.is_empty(),
        Err(_) => false,
    }
}

fn save_config(config: &Config) -> Result<()> {
    let config_dir = Config::ensure_config_dir()?;
    let config_path = config_dir.join("config.toml");

    if config_path.exists() {
        let backup_path = config_dir.join("config.toml.backup");
        std::fs::copy(&config_path, &backup_path)?;
        println!("Existing config backed up to: {}", backup_path.display());
    }

    config.save(&config_path)?;
    println!("Configuration saved to: {}", config_path.display());

    Ok(())
}

/// Setup is offered when there is no config file and no key from the environment
pub fn should_run_setup(config_path: &Path, config: &Config) -> bool {
    !config_path.exists() && !config.has_tmdb_key()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_needed_without_file_or_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(should_run_setup(&path, &Config::default()));

        let mut config = Config::default();
        config.catalog.tmdb_api_key = "k".to_string();
        assert!(!should_run_setup(&path, &config));
    }

    #[test]
    fn existing_file_skips_setup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().save(&path).unwrap();
        assert!(!should_run_setup(&path, &Config::default()));
    }
}
