use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::eyre;
use tracing::debug;

use crate::config::AppConfig;

const CONFIG_DIR: &str = "esevai";
const CONFIG_FILE: &str = "config.toml";

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

/// Load the configuration from `path`, or from the default location.
///
/// A missing default file yields the defaults; a missing explicit path or a
/// malformed file is an error.
pub fn load(path: Option<&Path>) -> color_eyre::Result<AppConfig> {
    if let Some(path) = path
        && !path.exists()
    {
        return Err(eyre!("Config file not found at {}", path.display()));
    }

    let path = match path.map(Path::to_path_buf).or_else(config_path) {
        Some(p) => p,
        None => {
            debug!("No config directory found, using defaults");
            return Ok(AppConfig::default());
        }
    };

    if !path.exists() {
        debug!("Config file not found at {:?}, using defaults", path);
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&path)?;
    let config = parse(&content)?;
    debug!("Loaded config from {:?}", path);
    Ok(config)
}

pub fn parse(content: &str) -> color_eyre::Result<AppConfig> {
    let config: AppConfig = toml::from_str(content)?;
    config.animation.validate()?;
    Ok(config)
}
