//! HTTP server configuration
//!
//! Integrates with the quill-core configuration system: every value comes
//! from an environment variable with a built-in default.

use super::defaults::HttpDefaults;
use quill_core::{get_env_or_default, parse_env, AppConfigTrait, ConfigError, ConfigSource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// HTTP server specific configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Maximum request body size in bytes
    pub max_request_size: usize,
    /// Seconds allowed for in-flight requests to finish after a shutdown signal
    pub shutdown_timeout_secs: u64,
    /// Seconds a form token stays valid
    pub csrf_token_lifetime_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: HttpDefaults::HOST.to_string(),
            port: HttpDefaults::PORT,
            request_timeout_secs: HttpDefaults::REQUEST_TIMEOUT_SECS,
            max_request_size: HttpDefaults::MAX_REQUEST_SIZE,
            shutdown_timeout_secs: HttpDefaults::SHUTDOWN_TIMEOUT_SECS,
            csrf_token_lifetime_secs: HttpDefaults::CSRF_TOKEN_LIFETIME_SECS,
        }
    }
}

impl AppConfigTrait for HttpConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation_failed("Server host must not be empty"));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::validation_failed(
                "Request timeout must be greater than 0",
            ));
        }

        if self.shutdown_timeout_secs == 0 {
            return Err(ConfigError::validation_failed(
                "Shutdown timeout must be greater than 0",
            ));
        }

        if self.max_request_size == 0 {
            return Err(ConfigError::validation_failed(
                "Maximum request size must be greater than 0",
            ));
        }

        if self.csrf_token_lifetime_secs == 0 {
            return Err(ConfigError::validation_failed(
                "CSRF token lifetime must be greater than 0",
            ));
        }

        Ok(())
    }

    fn from_env() -> Result<Self, ConfigError> {
        let host = get_env_or_default("SERVER_HOST", HttpDefaults::HOST);
        let port = parse_env(
            "SERVER_PORT",
            &HttpDefaults::PORT.to_string(),
            "port",
            "port number between 0 and 65535",
        )?;
        let request_timeout_secs = parse_env(
            "HTTP_REQUEST_TIMEOUT",
            &HttpDefaults::REQUEST_TIMEOUT_SECS.to_string(),
            "request_timeout_secs",
            "valid number of seconds",
        )?;
        let max_request_size = parse_env(
            "HTTP_MAX_REQUEST_SIZE",
            &HttpDefaults::MAX_REQUEST_SIZE.to_string(),
            "max_request_size",
            "valid number of bytes",
        )?;
        let shutdown_timeout_secs = parse_env(
            "HTTP_SHUTDOWN_TIMEOUT",
            &HttpDefaults::SHUTDOWN_TIMEOUT_SECS.to_string(),
            "shutdown_timeout_secs",
            "valid number of seconds",
        )?;
        let csrf_token_lifetime_secs = parse_env(
            "CSRF_TOKEN_LIFETIME",
            &HttpDefaults::CSRF_TOKEN_LIFETIME_SECS.to_string(),
            "csrf_token_lifetime_secs",
            "valid number of seconds",
        )?;

        Ok(HttpConfig {
            host,
            port,
            request_timeout_secs,
            max_request_size,
            shutdown_timeout_secs,
            csrf_token_lifetime_secs,
        })
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert("host".to_string(), ConfigSource::EnvVar("SERVER_HOST".to_string()));
        sources.insert("port".to_string(), ConfigSource::EnvVar("SERVER_PORT".to_string()));
        sources.insert(
            "request_timeout_secs".to_string(),
            ConfigSource::EnvVar("HTTP_REQUEST_TIMEOUT".to_string()),
        );
        sources.insert(
            "max_request_size".to_string(),
            ConfigSource::EnvVar("HTTP_MAX_REQUEST_SIZE".to_string()),
        );
        sources.insert(
            "shutdown_timeout_secs".to_string(),
            ConfigSource::EnvVar("HTTP_SHUTDOWN_TIMEOUT".to_string()),
        );
        sources.insert(
            "csrf_token_lifetime_secs".to_string(),
            ConfigSource::EnvVar("CSRF_TOKEN_LIFETIME".to_string()),
        );
        sources
    }
}

impl HttpConfig {
    /// `host:port`, resolved when the listener binds
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    /// Get form token lifetime as Duration
    pub fn csrf_token_lifetime(&self) -> Duration {
        Duration::from_secs(self.csrf_token_lifetime_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_defaults_are_valid() {
        let config = HttpConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:5003");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.max_request_size, 2_097_152);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_values_rejected() {
        let config = HttpConfig {
            request_timeout_secs: 0,
            ..HttpConfig::default()
        };
        assert!(config.validate().is_err());

        let config = HttpConfig {
            max_request_size: 0,
            ..HttpConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env() {
        env::set_var("SERVER_HOST", "0.0.0.0");
        env::set_var("SERVER_PORT", "8080");
        env::set_var("CSRF_TOKEN_LIFETIME", "60");

        let config = HttpConfig::from_env().unwrap();

        env::remove_var("SERVER_HOST");
        env::remove_var("SERVER_PORT");
        env::remove_var("CSRF_TOKEN_LIFETIME");

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.csrf_token_lifetime(), Duration::from_secs(60));
        assert_eq!(config.shutdown_timeout_secs, 10);
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_port() {
        env::set_var("SERVER_PORT", "99999");
        let result = HttpConfig::from_env();
        env::remove_var("SERVER_PORT");

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "port"
        ));
    }

    #[test]
    fn test_config_sources() {
        let sources = HttpConfig::default().config_sources();
        assert_eq!(sources["port"], ConfigSource::EnvVar("SERVER_PORT".to_string()));
        assert_eq!(sources.len(), 6);
    }
}
