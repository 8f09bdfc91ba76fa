//! Layered configuration loading.
//!
//! Sources, highest priority first:
//! 1. Environment variables with the `TASKLEDGER_` prefix, using `__` to
//!    separate sections (`TASKLEDGER_DATABASE__URL` maps to `database.url`)
//! 2. `taskledger.toml` in the working directory
//! 3. Built-in defaults

mod database;
mod error;
mod logging;
mod tasks;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use logging::LoggingConfig;
pub use tasks::TasksConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Default configuration file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "taskledger.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TASKLEDGER_";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TaskLedgerConfig {
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Task service settings.
    #[serde(default)]
    pub tasks: TasksConfig,
}

impl TaskLedgerConfig {
    /// Loads configuration from defaults, `taskledger.toml`, and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or a value is
    /// out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Builds the provider chain.
    ///
    /// Public so tests and embedders can layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extracts and validates configuration from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.max_connections".to_owned(),
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.tasks.initial_status_id <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "tasks.initial_status_id".to_owned(),
                reason: "must be a positive status identifier".to_owned(),
            });
        }
        Ok(())
    }
}
