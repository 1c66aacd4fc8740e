//! `.env` file loading
//!
//! Variables from the file are added to the process environment before the
//! configuration is assembled. Variables already present in the process
//! environment are left untouched.

use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;

/// Env file read when no explicit path is given
pub const DEFAULT_ENV_FILE: &str = "configs/.env";

/// Load an env file into the process environment.
///
/// Without an explicit `path`, `configs/.env` is read. Either way the file
/// must exist. Returns the file that was loaded.
pub fn load_env_file(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_ENV_FILE));

    if !path.exists() {
        return Err(ConfigError::file_not_found(format!(
            "Env file not found: {}",
            path.display()
        )));
    }

    dotenvy::from_path(path).map_err(|e| {
        ConfigError::env_var(format!("Failed to load env file {}: {}", path.display(), e))
    })?;

    Ok(path.to_path_buf())
}
