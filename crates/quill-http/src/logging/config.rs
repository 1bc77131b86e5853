//! # Structured Logging Integration
//!
//! Subscriber setup for quill applications: an `EnvFilter` (with `RUST_LOG`
//! taking precedence over the configured level) and a compact, pretty or
//! JSON formatter on stdout.

use quill_core::{get_env_or_default, AppConfigTrait, ConfigError, ConfigSource};
use serde_json::json;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::str::FromStr;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" | "plain" | "text" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::invalid_value("format", s, "compact, pretty or json")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Level or filter directives, e.g. "info" or "quill_blog=debug,tower_http=info"
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl AppConfigTrait for LoggingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let level = get_env_or_default("LOG_LEVEL", "info");
        let format = get_env_or_default("LOG_FORMAT", "compact").parse()?;

        Ok(LoggingConfig { level, format })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        EnvFilter::try_new(&self.level).map_err(|_| {
            ConfigError::invalid_value(
                "level",
                self.level.clone(),
                "a tracing level or filter directive such as info or quill_blog=debug",
            )
        })?;
        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert("level".to_string(), ConfigSource::EnvVar("LOG_LEVEL".to_string()));
        sources.insert("format".to_string(), ConfigSource::EnvVar("LOG_FORMAT".to_string()));
        sources
    }
}

/// Initialize structured logging for the application
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))?;

    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stdout).json())
            .try_init()?,
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stdout).pretty())
            .try_init()?,
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stdout).compact())
            .try_init()?,
    }

    tracing::info!(
        target: "quill::logging",
        "Structured logging initialized (level: {}, format: {})",
        config.level,
        config.format
    );

    Ok(())
}

/// Log application startup with system information
pub fn log_startup_info(service_name: &str, service_version: &str, address: &str) {
    let startup_info = json!({
        "event": "application_startup",
        "service": service_name,
        "version": service_version,
        "address": address,
        "pid": std::process::id(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "os": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
    });

    tracing::info!(target: "quill::startup", "{}", startup_info);
}

/// Log application shutdown
pub fn log_shutdown_info(service_name: &str) {
    let shutdown_info = json!({
        "event": "application_shutdown",
        "service": service_name,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    tracing::info!(target: "quill::shutdown", "{}", shutdown_info);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("plain".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_filter_validation() {
        assert!(LoggingConfig::default().validate().is_ok());

        let directives = LoggingConfig {
            level: "info,tower_http=warn,sqlx=warn".to_string(),
            ..LoggingConfig::default()
        };
        assert!(directives.validate().is_ok());

        let invalid = LoggingConfig {
            level: "quill=loud".to_string(),
            ..LoggingConfig::default()
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env() {
        env::set_var("LOG_LEVEL", "warn");
        env::set_var("LOG_FORMAT", "json");

        let config = LoggingConfig::from_env().unwrap();

        env::remove_var("LOG_LEVEL");
        env::remove_var("LOG_FORMAT");

        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    #[serial]
    fn test_init_twice_is_an_error_not_a_panic() {
        let config = LoggingConfig::default();
        let first = init_logging(&config);
        let second = init_logging(&config);

        // Another test binary thread may have installed a subscriber first
        assert!(first.is_err() || second.is_err());
    }
}
