pub mod post_form;

pub use post_form::{duplicate_title_error, field_messages, PostFields, PostForm};
