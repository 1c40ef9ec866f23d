//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PARLEY_` prefix and nested values use underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use parley::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod server;
mod speech;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use speech::SpeechConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the negotiation practice service.
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Every section has workable development defaults; a bare environment
/// yields a mock-backed, text-only service.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI completion configuration (Gemini)
    #[serde(default)]
    pub ai: AiConfig,

    /// Speech service configuration (Google Cloud STT/TTS)
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PARLEY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PARLEY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PARLEY__AI__API_KEY=...` -> `ai.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PARLEY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid, or
    /// if no AI key is configured in production.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate(&self.server.environment)?;
        self.speech.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to clear environment variables after testing
    /// Uses double underscores to separate nested config values
    fn clear_env() {
        env::remove_var("PARLEY__SERVER__PORT");
        env::remove_var("PARLEY__SERVER__ENVIRONMENT");
        env::remove_var("PARLEY__AI__API_KEY");
        env::remove_var("PARLEY__AI__MODEL");
        env::remove_var("PARLEY__SPEECH__API_KEY");
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert!(!config.ai.has_api_key());
        assert!(!config.speech.is_enabled());
    }

    #[test]
    fn test_defaults_validate_in_development() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("PARLEY__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_ai_key_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("PARLEY__AI__API_KEY", "AIza-test-key");
        env::set_var("PARLEY__AI__MODEL", "gemini-1.5-flash");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.ai.has_api_key());
        assert_eq!(config.ai.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("PARLEY__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_production_without_ai_key_fails_validation() {
        let config = AppConfig {
            server: ServerConfig {
                environment: Environment::Production,
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }
}
