// src/config.rs

//! Configuration loading utilities.
//!
//! Static settings come from an optional TOML file, then environment
//! overrides are applied on top.

use std::path::Path;

use tracing::info;

use crate::error::{AppError, Result};
use crate::models::Config;

/// Environment variable naming the settings file for the Lambda binary.
pub const CONFIG_PATH_VAR: &str = "WEBHOOK_CONFIG_PATH";

/// Load settings from `path` (falling back to defaults), apply environment
/// overrides and validate the result.
pub fn load_settings(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) if path.exists() => {
            info!("Loading settings from {}", path.display());
            Config::load(path)?
        }
        Some(path) => {
            info!("Settings file {} not found, using defaults", path.display());
            Config::default()
        }
        None => Config::default(),
    };

    config.apply_env_overrides();
    config
        .validate()
        .map_err(|e| AppError::config(format!("Invalid settings: {e}")))?;

    Ok(config)
}

/// Settings for the Lambda environment.
///
/// Reads the file named by `WEBHOOK_CONFIG_PATH` when set.
pub fn load_lambda_settings() -> Result<Config> {
    let path = std::env::var(CONFIG_PATH_VAR).ok();
    load_settings(path.as_deref().map(Path::new))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_settings(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.routes.listing_path, "/blog");
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hook.toml");
        std::fs::write(&path, "[http]\ntimeout_secs = 0\n").unwrap();
        assert!(matches!(load_settings(Some(&path)), Err(AppError::Config(_))));
    }

    #[test]
    fn test_unparsable_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hook.toml");
        std::fs::write(&path, "[http\n").unwrap();
        assert!(matches!(load_settings(Some(&path)), Err(AppError::Toml(_))));
    }
}
