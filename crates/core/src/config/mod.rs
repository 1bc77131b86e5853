pub mod app_config;
pub mod sources;
pub mod validation;

pub use app_config::*;
pub use sources::*;
pub use validation::*;

use std::env;
use std::str::FromStr;

/// Read an environment variable, falling back to `default` when unset
pub fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read an environment variable that may legitimately be absent
pub fn get_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

/// Read and parse an environment variable, reporting `field` and `expected`
/// when the value cannot be parsed.
pub fn parse_env<T: FromStr>(
    key: &str,
    default: &str,
    field: &str,
    expected: &str,
) -> Result<T, ConfigError> {
    let raw = get_env_or_default(key, default);
    raw.parse::<T>()
        .map_err(|_| ConfigError::invalid_value(field, raw, expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_parse_env_uses_default() {
        env::remove_var("QUILL_TEST_NUMBER");
        let value: u16 = parse_env("QUILL_TEST_NUMBER", "42", "number", "a number").unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    #[serial]
    fn test_parse_env_reports_field() {
        env::set_var("QUILL_TEST_NUMBER", "forty-two");
        let result: Result<u16, _> = parse_env("QUILL_TEST_NUMBER", "42", "number", "a number");
        env::remove_var("QUILL_TEST_NUMBER");

        match result {
            Err(ConfigError::InvalidValue { field, value, .. }) => {
                assert_eq!(field, "number");
                assert_eq!(value, "forty-two");
            }
            other => panic!("Expected InvalidValue error, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_empty_optional_is_none() {
        env::set_var("QUILL_TEST_OPTIONAL", "");
        assert_eq!(get_env_optional("QUILL_TEST_OPTIONAL"), None);
        env::remove_var("QUILL_TEST_OPTIONAL");
    }
}
