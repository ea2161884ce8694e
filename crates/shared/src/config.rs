use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Runtime configuration for the collection and reporting pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Try to load .env from multiple locations
        Self::try_load_dotenv();

        let data_dir =
            PathBuf::from(env::var("NEWS_DATA_DIR").unwrap_or_else(|_| "data".to_string()));
        let output_dir =
            PathBuf::from(env::var("NEWS_OUTPUT_DIR").unwrap_or_else(|_| "outputs".to_string()));

        fs::create_dir_all(&data_dir).with_context(|| {
            format!("Failed to create data directory: {}", data_dir.display())
        })?;
        fs::create_dir_all(&output_dir).with_context(|| {
            format!("Failed to create output directory: {}", output_dir.display())
        })?;

        Ok(Self {
            data_dir,
            output_dir,
        })
    }

    fn try_load_dotenv() {
        // Try locations in order of preference:

        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/ai-news-monitor/.env (standard config location)
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("ai-news-monitor").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env (home directory)
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }

        // If none found, that's okay - environment variables might be set system-wide
    }
}
