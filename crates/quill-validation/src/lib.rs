//! # quill-validation
//!
//! Validation of submitted form data. Rules are attached to field names,
//! every field is checked, and all failures are returned together so a form
//! can show each error next to its input.

pub mod error;
pub mod rules;
pub mod traits;
pub mod validators;

// Re-exports for easy access
pub use error::{ValidationError, ValidationErrors, ValidationResult};
pub use rules::Rules;
pub use traits::{Validate, ValidateField, ValidateRequest, ValidationRule};

// Built-in validators
pub use validators::{
    length::LengthValidator,
    required::RequiredValidator,
    url::UrlValidator,
};
