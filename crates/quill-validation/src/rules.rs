//! Validation rules composition

use crate::error::{ValidationErrors, ValidationResult};
use crate::traits::{ValidateField, ValidateRequest, ValidationRule};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered validation rules keyed by field name
#[derive(Clone, Default)]
pub struct Rules {
    field_rules: HashMap<String, Vec<Arc<dyn ValidationRule>>>,
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules")
            .field("field_rules_count", &self.field_rules.len())
            .field("validated_fields", &self.get_validated_fields())
            .finish()
    }
}

impl Rules {
    /// Create a new empty rules collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validation rule for a specific field
    pub fn field<R>(mut self, field: impl Into<String>, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.field_rules
            .entry(field.into())
            .or_default()
            .push(Arc::new(rule));
        self
    }

    /// Get rules for a specific field
    pub fn get_field_rules(&self, field: &str) -> Option<&Vec<Arc<dyn ValidationRule>>> {
        self.field_rules.get(field)
    }

    /// Get all field names that have validation rules, sorted
    pub fn get_validated_fields(&self) -> Vec<&String> {
        let mut fields: Vec<&String> = self.field_rules.keys().collect();
        fields.sort();
        fields
    }
}

#[async_trait]
impl ValidateField for Rules {
    async fn validate_field(&self, field: &str, value: &Value) -> ValidationResult<()> {
        let Some(rules) = self.get_field_rules(field) else {
            return Ok(());
        };

        let mut errors = ValidationErrors::new();
        for rule in rules {
            if let Err(rule_errors) = rule.validate(value, field).await {
                errors.merge(rule_errors);
                if rule.stops_on_failure() {
                    break;
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[async_trait]
impl ValidateRequest for Rules {
    /// Fields that carry rules but were not submitted at all are checked as null.
    async fn validate_request(&self, data: &HashMap<String, Value>) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();

        for field in self.get_validated_fields() {
            if data.contains_key(field) {
                continue;
            }
            if let Err(field_errors) = self.validate_field(field, &Value::Null).await {
                errors.merge(field_errors);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
