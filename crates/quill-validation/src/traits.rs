//! Core validation traits

use crate::error::{ValidationErrors, ValidationResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// Core validation trait that all validators must implement
#[async_trait]
pub trait ValidationRule: Send + Sync {
    /// Validate a single value
    async fn validate(&self, value: &Value, field: &str) -> ValidationResult<()>;

    /// Get the validation rule name/type
    fn rule_name(&self) -> &'static str;

    /// A failure of this rule ends validation of the field; later rules
    /// would only repeat the same complaint.
    fn stops_on_failure(&self) -> bool {
        false
    }
}

/// Trait for validating individual fields
#[async_trait]
pub trait ValidateField: Send + Sync {
    /// Validate a single field value
    async fn validate_field(&self, field: &str, value: &Value) -> ValidationResult<()>;
}

/// Trait for validating entire requests/objects
#[async_trait]
pub trait ValidateRequest: Send + Sync {
    /// Validate the entire request data
    async fn validate_request(&self, data: &HashMap<String, Value>) -> ValidationResult<()>;
}

/// Main validation trait that combines field and request validation
#[async_trait]
pub trait Validate: ValidateField + ValidateRequest + Send + Sync {
    /// Validate both individual fields and the entire request
    async fn validate(&self, data: &HashMap<String, Value>) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();

        for (field, value) in data {
            if let Err(field_errors) = self.validate_field(field, value).await {
                errors.merge(field_errors);
            }
        }

        if let Err(request_errors) = self.validate_request(data).await {
            errors.merge(request_errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl<T> Validate for T where T: ValidateField + ValidateRequest + Send + Sync {}
