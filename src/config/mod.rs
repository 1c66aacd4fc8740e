//! Configuration management module for garage-rs
//!
//! This module provides layered configuration loading with support for:
//! - TOML configuration files
//! - `.env` files loaded into the process environment
//! - The plain `DB_*` database variables
//! - `GARAGE_*` environment variable overrides
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local development overrides (not committed to version control)
//! 4. `DB_USER`, `DB_PASSWORD`, `DB_HOST`, `DB_PORT`, `DB_NAME`
//! 5. `GARAGE_*` environment variables

pub mod env_file;
pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use env_file::{DEFAULT_ENV_FILE, load_env_file};
pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    ApplicationConfig, ConsoleSettings, DatabaseConfig, FileSettings, LoggerSettings,
    ServerConfig, Settings,
};
