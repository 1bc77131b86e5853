use crate::config::{get_env_optional, get_env_or_default, ConfigError, ConfigSource};
use std::collections::HashMap;
use std::str::FromStr;

/// Signing key used when `APP_SECRET_KEY` is not provided outside production
pub const DEVELOPMENT_SECRET_KEY: &str = "quill-development-secret-key-change-me";

/// Shortest secret accepted for form signing
pub const MIN_SECRET_KEY_LEN: usize = 16;

/// Configuration trait for application configuration
pub trait AppConfigTrait: Sized {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self, ConfigError>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError>;

    /// Get configuration source information for debugging
    fn config_sources(&self) -> HashMap<String, ConfigSource>;
}

/// Environment enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Testing,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "testing" | "test" => Ok(Environment::Testing),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue {
                field: "environment".to_string(),
                value: s.to_string(),
                expected: "development, testing, or production".to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let env_str = match self {
            Environment::Development => "development",
            Environment::Testing => "testing",
            Environment::Production => "production",
        };
        write!(f, "{}", env_str)
    }
}

impl Environment {
    /// Check if environment is production
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Application-level configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub name: String,
    pub environment: Environment,
    /// Secret used to sign form tokens
    pub secret_key: String,
    /// Whether `secret_key` came from the environment rather than the built-in default
    pub secret_key_from_env: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "quill".to_string(),
            environment: Environment::Development,
            secret_key: DEVELOPMENT_SECRET_KEY.to_string(),
            secret_key_from_env: false,
        }
    }
}

impl AppConfigTrait for AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let name = get_env_or_default("APP_NAME", "quill");
        let environment = Environment::from_str(&get_env_or_default("APP_ENV", "development"))?;

        let (secret_key, secret_key_from_env) = match get_env_optional("APP_SECRET_KEY") {
            Some(secret) => (secret, true),
            None => (DEVELOPMENT_SECRET_KEY.to_string(), false),
        };

        Ok(AppConfig {
            name,
            environment,
            secret_key,
            secret_key_from_env,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::validation_failed("App name cannot be empty"));
        }

        if self.environment.is_production() && !self.secret_key_from_env {
            return Err(ConfigError::missing_required(
                "secret_key",
                "Set APP_SECRET_KEY when APP_ENV=production",
            ));
        }

        if self.secret_key.len() < MIN_SECRET_KEY_LEN {
            return Err(ConfigError::invalid_value(
                "secret_key",
                "<redacted>",
                format!("at least {} characters", MIN_SECRET_KEY_LEN),
            ));
        }

        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert("name".to_string(), ConfigSource::EnvVar("APP_NAME".to_string()));
        sources.insert(
            "environment".to_string(),
            ConfigSource::EnvVar("APP_ENV".to_string()),
        );
        let secret_source = if self.secret_key_from_env {
            ConfigSource::EnvVar("APP_SECRET_KEY".to_string())
        } else {
            ConfigSource::Default("development secret".to_string())
        };
        sources.insert("secret_key".to_string(), secret_source);
        sources
    }
}
