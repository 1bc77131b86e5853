//! URL format validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use async_trait::async_trait;
use serde_json::Value;
use url::{Host, Url};

/// Validator for absolute URLs such as image links
#[derive(Debug, Clone)]
pub struct UrlValidator {
    /// Require a top-level domain on domain hosts (`localhost` is exempt)
    pub require_tld: bool,
}

impl UrlValidator {
    /// Create a new URL validator with default settings
    pub fn new() -> Self {
        Self {
            require_tld: true,
        }
    }

    /// Require top-level domain (e.g., .com, .org)
    pub fn require_tld(mut self, require: bool) -> Self {
        self.require_tld = require;
        self
    }

    /// Check whether `candidate` is an acceptable URL
    pub fn is_valid_url(&self, candidate: &str) -> bool {
        let Ok(parsed) = Url::parse(candidate.trim()) else {
            return false;
        };

        match parsed.host() {
            Some(Host::Domain(domain)) => !self.require_tld || has_tld(domain),
            Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
            None => false,
        }
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn has_tld(domain: &str) -> bool {
    if domain.eq_ignore_ascii_case("localhost") {
        return true;
    }

    let domain = domain.trim_end_matches('.');
    match domain.rsplit_once('.') {
        Some((name, tld)) => {
            !name.is_empty() && !tld.is_empty() && !tld.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

#[async_trait]
impl ValidationRule for UrlValidator {
    async fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        // Absent and blank values are RequiredValidator's concern
        let candidate = match value {
            Value::Null => return Ok(()),
            Value::String(s) if s.trim().is_empty() => return Ok(()),
            Value::String(s) => s,
            _ => {
                return Err(ValidationError::with_code(
                    field,
                    format!("{} must be text", field),
                    "invalid_type",
                )
                .into());
            }
        };

        if self.is_valid_url(candidate) {
            Ok(())
        } else {
            Err(ValidationError::with_code(
                field,
                format!("{} must be a valid URL", field),
                "url",
            )
            .into())
        }
    }

    fn rule_name(&self) -> &'static str {
        "url"
    }
}
