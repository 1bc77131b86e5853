//! Built-in validators for form fields

pub mod length;
pub mod required;
pub mod url;

pub use self::length::LengthValidator;
pub use self::required::RequiredValidator;
pub use self::url::UrlValidator;
