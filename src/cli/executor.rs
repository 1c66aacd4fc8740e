//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use super::{init_logger_from_settings, load_and_merge_config};
use crate::config::{Settings, load_env_file};

/// Run the whole command line: env file, configuration, logger, command.
///
/// # Errors
/// Any startup failure (missing env file, invalid configuration, logger,
/// database or bind errors) is returned and ends the process.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Err(msg) = cli.validate() {
        anyhow::bail!("Invalid arguments: {}", msg);
    }

    let env_file = load_env_file(cli.env_file.as_deref())?;
    let settings = load_and_merge_config(&cli)?;
    init_logger_from_settings(&settings)?;

    tracing::info!(path = %env_file.display(), "Loaded env file");

    execute_command(&cli, settings).await
}

/// Dispatch to the handler for the parsed command
///
/// No subcommand means `serve`.
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
        Some(Commands::Migrate { dry_run }) => {
            MigrateCommandHandler::new(settings)
                .execute(*dry_run)
                .await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::test_support::{EnvGuard, TEST_MUTEX};
    use clap::Parser;
    use std::path::PathBuf;

    fn create_valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/garage".to_string();
        config
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["garage-rs", "serve", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, create_valid_config()).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_migrate_without_database() {
        let cli = Cli::try_parse_from(["garage-rs", "migrate", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, Settings::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_run_fails_on_missing_env_file() {
        let _lock = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.clear_garage_vars();

        let cli = Cli {
            env_file: Some(PathBuf::from("does/not/exist.env")),
            ..Cli::try_parse_from(["garage-rs", "serve", "--dry-run"]).unwrap()
        };

        let err = run(cli).await.unwrap_err();
        assert!(err.to_string().contains("exist.env"));
    }
}
