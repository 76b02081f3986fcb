//! Configuration module for media-filter
//!
//! Handles locating, loading and validating settings from YAML files and
//! environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_ENV: &str = "MEDIA_FILTER_SETTINGS_PATH";

/// Candidate settings files, in lookup order
pub fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("media-filter.yml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("media-filter/settings.yml"));
    }
    paths
}

/// Load settings from `explicit`, the settings env var, the default
/// locations, or fall back to defaults; environment overrides apply last
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    load_from(locate(explicit).as_deref())
}

/// Load settings from `path`, or defaults when `None`, then apply
/// environment overrides
pub fn load_from(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    settings.merge_env()?;
    settings.validate()?;
    Ok(settings)
}

/// The settings file that [`load`] would read, if any
pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
    // An explicit path is used even if missing so the read error surfaces
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    default_paths().into_iter().find(|path| path.exists())
}
