// Configuration loader
// Loads the Groq API key from ~/.quill/config.toml or environment variable

use std::fs;
use std::path::PathBuf;

use super::settings::{Config, ConfigFile};
use crate::errors::{Error, Result};

const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Load configuration from the quill config file or environment.
///
/// Surfaced before any completion call is attempted, so a missing key
/// fails the run up front rather than mid-loop.
pub fn load_config() -> Result<Config> {
    if let Some(config) = try_load_from_quill_config()? {
        return Ok(config);
    }

    if let Ok(api_key) = std::env::var(API_KEY_ENV) {
        if !api_key.trim().is_empty() {
            return Ok(Config { api_key });
        }
    }

    Err(Error::Configuration(format!(
        "No API key found. Set the {} environment variable:\n\n\
         export {}=\"gsk_...\"\n\n\
         or create ~/.quill/config.toml containing:\n\n\
         api_key = \"gsk_...\"",
        API_KEY_ENV, API_KEY_ENV
    )))
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".quill").join("config.toml"))
}

fn try_load_from_quill_config() -> Result<Option<Config>> {
    let Some(path) = config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(&path)
        .map_err(|e| Error::Configuration(format!("Failed to read {}: {}", path.display(), e)))?;
    let file: ConfigFile = toml::from_str(&raw)
        .map_err(|e| Error::Configuration(format!("Failed to parse {}: {}", path.display(), e)))?;

    if file.api_key.trim().is_empty() {
        return Err(Error::Configuration(format!(
            "api_key in {} is empty",
            path.display()
        )));
    }

    Ok(Some(Config {
        api_key: file.api_key,
    }))
}
