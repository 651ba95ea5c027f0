//! Application configuration module
//!
//! Type-safe configuration loaded with the `config` and `dotenvy` crates.
//! Values come from an optional `decision-tracker.{toml,json,yaml}` file and
//! are overridden by environment variables with the `DECISION_TRACKER` prefix,
//! using double underscores to separate nested values.
//!
//! # Example
//!
//! ```no_run
//! use decision_tracker::config::{init_tracing, AppConfig};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! init_tracing(&config.logging).expect("Failed to install subscriber");
//!
//! let sequence = config.workflow.sequence();
//! println!("Workflow has {} steps", sequence.len());
//! ```

mod error;
mod logging;
mod relationships;
mod workflow;

pub use error::{ConfigError, ValidationError};
pub use logging::{init_tracing, LogFormat, LoggingConfig};
pub use relationships::RelationshipConfig;
pub use workflow::WorkflowConfig;

use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "DECISION_TRACKER";
const DEFAULT_FILE: &str = "decision-tracker";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Decision workflow step sequence
    #[serde(default)]
    pub workflow: WorkflowConfig,

    /// Log level and output format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Relationship graph limits
    #[serde(default)]
    pub relationships: RelationshipConfig,
}

impl AppConfig {
    /// Load configuration from the default file (if present) and environment
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads `decision-tracker.*` from the working directory if present
    /// 3. Reads environment variables with `DECISION_TRACKER` prefix
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DECISION_TRACKER__LOGGING__LEVEL=debug` -> `logging.level = "debug"`
    /// - `DECISION_TRACKER__RELATIONSHIPS__MAX_RELATIONSHIPS_PER_TYPE=10`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(DEFAULT_FILE).required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration from an explicit file, still overridable by environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or malformed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(true))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.relationships.validate()?;
        Ok(())
    }
}

fn environment() -> config::Environment {
    config::Environment::default()
        .prefix(ENV_PREFIX)
        .separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("DECISION_TRACKER__WORKFLOW__INCLUDE_STAKEHOLDERS_STEP");
        env::remove_var("DECISION_TRACKER__LOGGING__LEVEL");
        env::remove_var("DECISION_TRACKER__LOGGING__FORMAT");
        env::remove_var("DECISION_TRACKER__RELATIONSHIPS__MAX_RELATIONSHIPS_PER_TYPE");
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert!(config.workflow.include_stakeholders_step);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.relationships.max_relationships_per_type, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("DECISION_TRACKER__WORKFLOW__INCLUDE_STAKEHOLDERS_STEP", "false");
        env::set_var("DECISION_TRACKER__LOGGING__FORMAT", "json");
        env::set_var("DECISION_TRACKER__RELATIONSHIPS__MAX_RELATIONSHIPS_PER_TYPE", "5");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(!config.workflow.include_stakeholders_step);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.relationships.max_relationships_per_type, 5);
    }

    #[test]
    fn test_load_from_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = toml_file(
            "[workflow]\ninclude_stakeholders_step = false\n\n[logging]\nlevel = \"debug\"\n",
        );

        let config = AppConfig::load_from(file.path()).unwrap();
        assert!(!config.workflow.include_stakeholders_step);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.relationships.max_relationships_per_type, 100);
    }

    #[test]
    fn test_environment_wins_over_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let file = toml_file("[logging]\nlevel = \"debug\"\n");
        env::set_var("DECISION_TRACKER__LOGGING__LEVEL", "warn");
        let result = AppConfig::load_from(file.path());
        clear_env();

        assert_eq!(result.unwrap().logging.level, "warn");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_validate_rejects_zero_relationship_limit() {
        let config = AppConfig {
            relationships: RelationshipConfig {
                max_relationships_per_type: 0,
            },
            ..AppConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::RelationshipLimitTooSmall)
        );
    }
}
