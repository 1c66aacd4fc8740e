//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Garage car-record service
#[derive(Parser, Debug)]
#[command(name = "garage-rs")]
#[command(about = "Tracks cars through a service garage over HTTP")]
#[command(long_about = "
garage-rs records cars as they enter a garage, move into service and
complete, and serves those records over a small HTTP API backed by
PostgreSQL.

EXAMPLES:
    # Start the server with default configuration
    garage-rs serve

    # Start server on custom host and port
    garage-rs serve --host 0.0.0.0 --port 8080

    # Use a single configuration file
    garage-rs --config /etc/garage/production.toml serve

    # Read database credentials from a specific env file
    garage-rs --env-file /run/secrets/garage.env serve

    # Check configuration without starting server
    garage-rs serve --dry-run

    # Apply pending database migrations
    garage-rs migrate

    # List pending migrations
    garage-rs migrate --dry-run
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this single TOML file instead of the layered `config/` directory.
    /// The file must exist and be readable.
    ///
    /// Example: --config /etc/garage/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` is layered over `default.toml`,
    /// taking precedence over GARAGE_APP_ENV.
    ///
    /// Available values: development (dev), test, staging (stage), production (prod)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Env file to load before reading configuration
    ///
    /// Defaults to `configs/.env`. The file must exist or startup fails.
    /// Variables already set in the process win.
    #[arg(long, value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Enable verbose logging
    ///
    /// Increases log output to debug level. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Reduces log output to error level only. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Builds the database pool, applies migrations when
    /// `database.auto_migrate` is enabled and begins accepting requests.
    ///
    /// Examples:
    ///   garage-rs serve                           # Start with defaults
    ///   garage-rs serve --host 0.0.0.0 --port 80 # Bind to all interfaces on port 80
    ///   garage-rs serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        ///
        /// Use 127.0.0.1 for localhost only, or 0.0.0.0 to accept connections
        /// from any interface.
        ///
        /// Default: 127.0.0.1
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Must be between 1 and 65535.
        ///
        /// Default: 3000
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Takes precedence over configuration files and --verbose/--quiet.
        ///
        /// Available levels: error, warn, info, debug, trace
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        ///
        /// Returns exit code 0 if valid, non-zero if invalid.
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    ///
    /// Applies the migrations embedded in the binary to the configured
    /// database.
    ///
    /// Examples:
    ///   garage-rs migrate                    # Apply all pending migrations
    ///   garage-rs migrate --dry-run          # Show pending migrations without applying
    Migrate {
        /// Show pending migrations without applying
        #[arg(long)]
        dry_run: bool,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Validate argument combinations clap cannot express on its own.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        if let Some(Commands::Serve {
            host: Some(host),
            port: Some(port),
            ..
        }) = &self.command
            && host == "0.0.0.0"
            && *port < 1024
        {
            return Err("Binding to 0.0.0.0 on a privileged port (< 1024) typically requires root privileges".to_string());
        }

        Ok(())
    }

    /// Whether this invocation starts the HTTP server.
    pub fn is_serve(&self) -> bool {
        matches!(self.command, None | Some(Commands::Serve { .. }))
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["garage-rs", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["garage-rs", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["garage-rs"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.is_serve());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
        assert!(cli.env_file.is_none());
    }

    #[test]
    fn test_serve_command() {
        let cli =
            Cli::try_parse_from(["garage-rs", "serve", "--host", "0.0.0.0", "--port", "8080"])
                .unwrap();
        match cli.command {
            Some(Commands::Serve {
                host,
                port,
                log_level,
                dry_run,
            }) => {
                assert_eq!(host, Some("0.0.0.0".to_string()));
                assert_eq!(port, Some(8080));
                assert!(log_level.is_none());
                assert!(!dry_run);
            }
            other => panic!("Expected Serve command, got {:?}", other),
        }
    }

    #[test]
    fn test_migrate_command() {
        let cli = Cli::try_parse_from(["garage-rs", "migrate", "--dry-run"]).unwrap();
        assert!(!cli.is_serve());
        assert!(matches!(cli.command, Some(Commands::Migrate { dry_run: true })));
    }

    #[test]
    fn test_migrate_rejects_rollback() {
        assert!(Cli::try_parse_from(["garage-rs", "migrate", "--rollback", "1"]).is_err());
    }

    #[test]
    fn test_env_file_and_environment_alias() {
        let cli = Cli::try_parse_from([
            "garage-rs",
            "--env",
            "prod",
            "--env-file",
            "deploy/garage.env",
        ])
        .unwrap();

        assert_eq!(cli.env, Some(Environment::Production));
        assert_eq!(cli.env_file, Some(PathBuf::from("deploy/garage.env")));
        assert_eq!(
            crate::config::Environment::from(Environment::Production),
            crate::config::Environment::Production
        );
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["garage-rs", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_privileged_port_on_all_interfaces() {
        let cli =
            Cli::try_parse_from(["garage-rs", "serve", "--host", "0.0.0.0", "--port", "80"])
                .unwrap();
        assert!(cli.validate().is_err());

        let cli =
            Cli::try_parse_from(["garage-rs", "serve", "--host", "127.0.0.1", "--port", "80"])
                .unwrap();
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_log_level_strings() {
        assert_eq!(String::from(LogLevel::Warn), "warn");
        assert_eq!(LogLevel::Trace.as_str(), "trace");
    }
}
