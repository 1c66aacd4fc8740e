//! Migrate command handler
//!
//! Applies or lists the migrations embedded in the binary.

use crate::config::Settings;
use crate::db::{pending_migrations, run_pending_migrations};
use crate::error::AppResult;

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Apply pending migrations, or with `dry_run` only list them
    ///
    /// # Errors
    /// - Database configuration errors
    /// - Database connection errors
    /// - Migration execution errors
    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        self.config.database.validate()?;
        let database_url = self.config.database.connection_url();

        if dry_run {
            println!("Checking for pending migrations...");
            let pending = pending_migrations(database_url).await?;

            if pending.is_empty() {
                println!("✓ No pending migrations found - database is up to date");
            } else {
                println!("Found {} pending migration(s):", pending.len());
                for name in &pending {
                    println!("  - {}", name);
                }
                println!("\nRun without --dry-run to apply these migrations");
            }
            return Ok(());
        }

        println!("Running database migrations...");
        let applied = run_pending_migrations(database_url).await?;

        if applied.is_empty() {
            println!("✓ No pending migrations - database is up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for name in &applied {
                println!("  - {}", name);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_migrate_requires_database_configuration() {
        let handler = MigrateCommandHandler::new(Settings::default());

        match handler.execute(true).await {
            Err(AppError::Configuration { key, .. }) => assert_eq!(key, "database.url"),
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_migrate_reports_unreachable_database() {
        let mut config = Settings::default();
        config.database.url = "postgres://garage@127.0.0.1:1/garage".to_string();
        let handler = MigrateCommandHandler::new(config);

        assert!(matches!(
            handler.execute(true).await,
            Err(AppError::Database { .. })
        ));
    }
}
