//! Required field validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use async_trait::async_trait;
use serde_json::Value;

/// Validator that ensures a field is present and not blank
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredValidator;

impl RequiredValidator {
    pub fn new() -> Self {
        Self
    }

    /// Whitespace-only text counts as empty
    fn is_empty(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::Array(arr) => arr.is_empty(),
            Value::Object(obj) => obj.is_empty(),
            _ => false,
        }
    }
}

#[async_trait]
impl ValidationRule for RequiredValidator {
    async fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if self.is_empty(value) {
            Err(ValidationError::with_code(field, format!("{} is required", field), "required").into())
        } else {
            Ok(())
        }
    }

    fn rule_name(&self) -> &'static str {
        "required"
    }

    fn stops_on_failure(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_required_validator_with_null() {
        let validator = RequiredValidator::new();
        let result = validator.validate(&Value::Null, "title").await;

        let errors = result.unwrap_err();
        assert!(errors.has_field_errors("title"));
        assert_eq!(errors.get_field_errors("title").unwrap()[0].message, "title is required");
    }

    #[tokio::test]
    async fn test_required_validator_with_empty_string() {
        let validator = RequiredValidator::new();
        let result = validator
            .validate(&Value::String("".to_string()), "subtitle")
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_required_validator_with_whitespace_string() {
        let validator = RequiredValidator::new();
        let result = validator
            .validate(&Value::String(" \t\n ".to_string()), "author")
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_required_validator_with_valid_string() {
        let validator = RequiredValidator::new();
        let result = validator
            .validate(&Value::String("Eve".to_string()), "author")
            .await;

        assert!(result.is_ok());
    }

    #[test]
    fn test_required_stops_field_validation() {
        assert!(RequiredValidator::new().stops_on_failure());
        assert_eq!(RequiredValidator::new().rule_name(), "required");
    }
}
