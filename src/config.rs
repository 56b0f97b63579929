//! Application configuration management.
//!
//! This module declares the server configuration with [`crate::env_config!`]
//! and loads it through the tag-driven loader in [`crate::loader`].

use crate::{
    env_config,
    error::ConfigError,
    loader::{self, Environment},
};

env_config! {
    /// Application configuration loaded from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ENV` (optional): deployment environment name, defaults to `local`
    /// - `PORT` (optional): HTTP server port, defaults to 8080
    /// - `DEBUG` (optional): verbose logging, defaults to false
    /// - `POSTGRES_URI` (optional): task store connection string
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Config {
        pub env: String [env = "ENV", default = "local"],
        pub port: u16 [env = "PORT", default = "8080"],
        pub debug: bool [env = "DEBUG", default = "false"],
        pub postgres: PostgresConfig [namespace = "POSTGRES"],
    }
}

env_config! {
    /// Connection settings of the task store.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct PostgresConfig {
        pub uri: String [env = "URI"],
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then captures the process environment and loads the Config from it.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable value cannot be parsed
    /// into the expected type (e.g. a non-numeric `PORT`).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        Self::from_environment(&Environment::from_process())
    }

    /// Load configuration from an explicit environment snapshot.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_environment(env: &Environment) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        loader::parse_with(env, &mut config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::from_environment(&Environment::default()).unwrap();

        assert_eq!(config.env, "local");
        assert_eq!(config.port, 8080);
        assert!(!config.debug);
        assert!(config.postgres.uri.is_empty());
    }

    #[test]
    fn test_config_from_environment() {
        let env = Environment::from_lines([
            "ENV=production",
            "PORT=3000",
            "DEBUG=true",
            "POSTGRES_URI=postgres://tasks:secret@db:5432/tasks?sslmode=disable",
        ]);

        let config = Config::from_environment(&env).unwrap();

        assert_eq!(config.env, "production");
        assert_eq!(config.port, 3000);
        assert!(config.debug);
        assert_eq!(
            config.postgres.uri,
            "postgres://tasks:secret@db:5432/tasks?sslmode=disable"
        );
    }

    #[test]
    fn test_invalid_port() {
        let env = Environment::from_lines(["PORT=http"]);

        let err = Config::from_environment(&env).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidType { field: "port", .. }));
    }
}
