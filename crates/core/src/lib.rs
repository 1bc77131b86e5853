//! # quill-core
//!
//! Configuration foundation shared by every quill crate: the
//! [`AppConfigTrait`] contract, the [`ConfigError`] type and the
//! application-level [`AppConfig`].

pub mod config;

pub use config::{
    get_env_or_default, get_env_optional, parse_env, AppConfig, AppConfigTrait, ConfigError,
    ConfigSource, Environment,
};
