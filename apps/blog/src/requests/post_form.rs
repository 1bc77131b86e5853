//! The post editing form
//!
//! Captures the submitted fields, checks the anti-forgery token and runs
//! the field rules. Validation has no side effects; every failing field is
//! reported at once so the form can be re-rendered with inline errors.

use crate::models::{NewPost, Post, PostChanges};
use quill_http::{FormSigner, CSRF_FIELD};
use quill_validation::{
    LengthValidator, Rules, RequiredValidator, UrlValidator, Validate, ValidationError,
    ValidationErrors,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Column limit shared by every short text field
pub const MAX_FIELD_LEN: usize = 250;

/// Names of the inputs on the form, in display order
pub const FORM_FIELDS: [&str; 6] = ["title", "subtitle", "author", "img_url", "body", CSRF_FIELD];

/// Raw form submission. Missing inputs deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostForm {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub author: String,
    pub img_url: String,
    pub csrf_token: String,
}

/// Field values that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub author: String,
    pub img_url: String,
}

impl PostFields {
    /// A new post dated `date`
    pub fn into_new_post(self, date: String) -> NewPost {
        NewPost {
            title: self.title,
            subtitle: self.subtitle,
            date,
            body: self.body,
            author: self.author,
            img_url: self.img_url,
        }
    }

    fn validation_data(&self) -> HashMap<String, Value> {
        [
            ("title", &self.title),
            ("subtitle", &self.subtitle),
            ("body", &self.body),
            ("author", &self.author),
            ("img_url", &self.img_url),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), Value::String(value.clone())))
        .collect()
    }

    /// Overwrite every editable field; the date is left alone
    pub fn into_changes(self) -> PostChanges {
        PostChanges {
            title: Some(self.title),
            subtitle: Some(self.subtitle),
            body: Some(self.body),
            author: Some(self.author),
            img_url: Some(self.img_url),
        }
    }
}

fn post_rules() -> Rules {
    let mut rules = Rules::new();
    for field in ["title", "subtitle", "author"] {
        rules = rules
            .field(field, RequiredValidator::new())
            .field(field, LengthValidator::new().max(MAX_FIELD_LEN));
    }
    rules
        .field("img_url", RequiredValidator::new())
        .field("img_url", LengthValidator::new().max(MAX_FIELD_LEN))
        .field("img_url", UrlValidator::new())
}

impl PostForm {
    /// Pre-populate the form from a stored post
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            body: post.body.clone(),
            author: post.author.clone(),
            img_url: post.img_url.clone(),
            csrf_token: String::new(),
        }
    }

    /// Copy of the form carrying a freshly issued token, ready to render
    pub fn with_token(&self, signer: &FormSigner) -> Self {
        Self {
            csrf_token: signer.issue(),
            ..self.clone()
        }
    }

    /// Submitted values as they would be stored: every field except the
    /// body is trimmed.
    fn trimmed(&self) -> PostFields {
        PostFields {
            title: self.title.trim().to_string(),
            subtitle: self.subtitle.trim().to_string(),
            body: self.body.clone(),
            author: self.author.trim().to_string(),
            img_url: self.img_url.trim().to_string(),
        }
    }

    /// Check the field rules against the values that would be stored
    pub async fn validate(&self) -> Result<PostFields, ValidationErrors> {
        let fields = self.trimmed();
        post_rules().validate(&fields.validation_data()).await?;
        Ok(fields)
    }

    /// Check the anti-forgery token, then the field rules. Failures of
    /// both are reported together.
    pub async fn validate_submission(
        &self,
        signer: &FormSigner,
    ) -> Result<PostFields, ValidationErrors> {
        let token_check = signer.verify(&self.csrf_token);
        let fields = self.validate().await;

        match (token_check, fields) {
            (Ok(()), fields) => fields,
            (Err(token_error), fields) => {
                let mut errors = ValidationErrors::from_error(ValidationError::with_code(
                    CSRF_FIELD,
                    token_error.to_string(),
                    "csrf",
                ));
                if let Err(field_errors) = fields {
                    errors.merge(field_errors);
                }
                Err(errors)
            }
        }
    }
}

/// Inline error for a title another post already uses
pub fn duplicate_title_error() -> ValidationErrors {
    ValidationErrors::from_error(ValidationError::with_code(
        "title",
        "A post with this title already exists.",
        "unique",
    ))
}

/// Messages for every form input, empty where the input is fine, so
/// templates can index any field without guarding against absence.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    FORM_FIELDS
        .iter()
        .map(|field| {
            let messages = errors
                .get_field_errors(field)
                .map(|field_errors| field_errors.iter().map(|e| e.message.clone()).collect())
                .unwrap_or_default();
            (field.to_string(), messages)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn valid_form() -> PostForm {
        PostForm {
            title: "A".to_string(),
            subtitle: "B".to_string(),
            body: "<p>x</p>".to_string(),
            author: "Eve".to_string(),
            img_url: "https://example.com/x.png".to_string(),
            csrf_token: String::new(),
        }
    }

    fn signer() -> FormSigner {
        FormSigner::new("form-test-secret-key", Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_valid_form() {
        let fields = valid_form().validate().await.unwrap();
        assert_eq!(fields.title, "A");
        assert_eq!(fields.body, "<p>x</p>");
    }

    #[tokio::test]
    async fn test_body_may_be_empty() {
        let form = PostForm {
            body: String::new(),
            ..valid_form()
        };
        assert!(form.validate().await.is_ok());
    }

    #[tokio::test]
    async fn test_whitespace_only_is_empty() {
        let form = PostForm {
            title: "   ".to_string(),
            ..valid_form()
        };
        let errors = form.validate().await.unwrap_err();
        assert_eq!(errors.get_field_errors("title").unwrap()[0].code, "required");
    }

    #[tokio::test]
    async fn test_length_is_checked_after_trimming() {
        let title = "t".repeat(MAX_FIELD_LEN);
        let form = PostForm {
            title: format!("  {}  ", title),
            img_url: " https://example.com/x.png ".to_string(),
            ..valid_form()
        };

        let fields = form.validate().await.unwrap();
        assert_eq!(fields.title, title);
        assert_eq!(fields.img_url, "https://example.com/x.png");

        let too_long = PostForm {
            title: format!(" {} ", "t".repeat(MAX_FIELD_LEN + 1)),
            ..valid_form()
        };
        let errors = too_long.validate().await.unwrap_err();
        assert_eq!(errors.get_field_errors("title").unwrap()[0].code, "length_max");
    }

    #[tokio::test]
    async fn test_all_failures_reported_together() {
        let form = PostForm {
            title: String::new(),
            subtitle: "s".repeat(251),
            author: String::new(),
            img_url: "not-a-url".to_string(),
            ..valid_form()
        };
        let errors = form.validate().await.unwrap_err();

        assert!(errors.has_field_errors("title"));
        assert!(errors.has_field_errors("subtitle"));
        assert!(errors.has_field_errors("author"));
        assert!(errors.has_field_errors("img_url"));
        assert!(!errors.has_field_errors("body"));
    }

    #[tokio::test]
    async fn test_missing_image_url_reports_required_only() {
        let form = PostForm {
            img_url: String::new(),
            ..valid_form()
        };
        let errors = form.validate().await.unwrap_err();
        let img_errors = errors.get_field_errors("img_url").unwrap();
        assert_eq!(img_errors.len(), 1);
        assert_eq!(img_errors[0].code, "required");
    }

    #[tokio::test]
    async fn test_values_are_trimmed() {
        let form = PostForm {
            title: "  Padded  ".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate().await.unwrap().title, "Padded");
    }

    #[tokio::test]
    async fn test_submission_requires_token() {
        let errors = valid_form()
            .validate_submission(&signer())
            .await
            .unwrap_err();
        assert_eq!(errors.get_field_errors(CSRF_FIELD).unwrap()[0].code, "csrf");
        assert_eq!(errors.len(), 1);
    }

    #[tokio::test]
    async fn test_submission_with_token() {
        let signer = signer();
        let form = valid_form().with_token(&signer);
        assert!(form.validate_submission(&signer).await.is_ok());
    }

    #[tokio::test]
    async fn test_bad_token_and_bad_fields_reported_together() {
        let form = PostForm {
            title: String::new(),
            csrf_token: "forged.token".to_string(),
            ..valid_form()
        };
        let errors = form.validate_submission(&signer()).await.unwrap_err();
        assert!(errors.has_field_errors(CSRF_FIELD));
        assert!(errors.has_field_errors("title"));
    }

    #[test]
    fn test_from_post_and_into_changes() {
        let post = Post {
            id: 3,
            title: "T".to_string(),
            subtitle: "S".to_string(),
            date: "October 19, 2026".to_string(),
            body: "B".to_string(),
            author: "A".to_string(),
            img_url: "https://example.com/i.png".to_string(),
        };
        let form = PostForm::from_post(&post);
        assert_eq!(form.title, "T");
        assert!(form.csrf_token.is_empty());

        let changes = PostFields {
            title: form.title,
            subtitle: form.subtitle,
            body: form.body,
            author: form.author,
            img_url: form.img_url,
        }
        .into_changes();
        assert_eq!(changes.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_field_messages_cover_every_input() {
        let messages = field_messages(&duplicate_title_error());
        assert_eq!(messages.len(), FORM_FIELDS.len());
        assert_eq!(messages["title"], vec!["A post with this title already exists."]);
        assert!(messages["author"].is_empty());
    }
}
