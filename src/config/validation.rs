//! Configuration validation logic
//!
//! Each settings section validates its own values so that a bad
//! configuration is rejected before any connection is attempted.

use crate::config::error::ConfigError;
use crate::config::settings::{
    ApplicationConfig, DatabaseConfig, FileSettings, LoggerSettings, ServerConfig, Settings,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

const VALID_DATABASE_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

impl ApplicationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::validation(
                "application.name",
                "Application name must not be empty.",
            ));
        }
        Ok(())
    }
}

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Host must not be empty
    /// - Port must be between 1 and 65535
    /// - Timeouts must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Server host must not be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - Either `url` or `host` + `name` must be set
    /// - An explicit URL must use a PostgreSQL scheme
    /// - Pool sizes must be positive and `min <= max`
    /// - Connection timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::validation(
                "database.url",
                "Database connection is not configured. Set database.url or DB_HOST and DB_NAME.",
            ));
        }

        if !self.url.is_empty()
            && !VALID_DATABASE_SCHEMES
                .iter()
                .any(|scheme| self.url.starts_with(scheme))
        {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "database.port",
                "Database port must be between 1 and 65535.",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::ValidationError {
                field: "database.min_connections".to_string(),
                message: format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            });
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one log output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validate every section, stopping at the first failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.application.validate()?;
        self.server.validate()?;
        self.database.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_database() -> DatabaseConfig {
        DatabaseConfig {
            url: "postgres://localhost/garage".to_string(),
            ..DatabaseConfig::default()
        }
    }

    fn valid_settings() -> Settings {
        Settings {
            database: valid_database(),
            ..Settings::default()
        }
    }

    fn assert_field(result: Result<(), ConfigError>, expected: &str) {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, expected),
            other => panic!("Expected validation error on {}, got {:?}", expected, other),
        }
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_server_port_zero_rejected() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        assert_field(config.validate(), "server.port");
    }

    #[test]
    fn test_server_timeouts_rejected() {
        let config = ServerConfig {
            request_timeout: 0,
            ..ServerConfig::default()
        };
        assert_field(config.validate(), "server.request_timeout");
    }

    #[test]
    fn test_unconfigured_database_rejected() {
        assert_field(DatabaseConfig::default().validate(), "database.url");
    }

    #[test]
    fn test_database_parts_are_enough() {
        let config = DatabaseConfig {
            host: "localhost".to_string(),
            name: "garage".to_string(),
            ..DatabaseConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_postgres_url_rejected() {
        let config = DatabaseConfig {
            url: "mysql://localhost/garage".to_string(),
            ..DatabaseConfig::default()
        };
        assert_field(config.validate(), "database.url");
    }

    #[test]
    fn test_min_connections_above_max_rejected() {
        let config = DatabaseConfig {
            min_connections: 20,
            max_connections: 5,
            ..valid_database()
        };
        assert_field(config.validate(), "database.min_connections");
    }

    #[test]
    fn test_logger_level_is_case_insensitive() {
        let logger = LoggerSettings {
            level: "DEBUG".to_string(),
            ..LoggerSettings::default()
        };
        assert!(logger.validate().is_ok());
    }

    #[test]
    fn test_logger_level_rejects_unknown() {
        let logger = LoggerSettings {
            level: "loud".to_string(),
            ..LoggerSettings::default()
        };
        assert_field(logger.validate(), "logger.level");
    }

    #[test]
    fn test_logger_requires_an_output() {
        let mut logger = LoggerSettings::default();
        logger.console.enabled = false;
        logger.file.enabled = false;
        assert_field(logger.validate(), "logger");
    }

    #[test]
    fn test_logger_file_format_rejected() {
        let mut logger = LoggerSettings::default();
        logger.file.format = "xml".to_string();
        assert_field(logger.validate(), "logger.file.format");
    }
}
