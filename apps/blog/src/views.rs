//! Page templates, compiled into the binary

use quill_http::{HttpResult, Templates};
use tracing::debug;

const TEMPLATES: [(&str, &str); 6] = [
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("post.html", include_str!("../templates/post.html")),
    ("make-post.html", include_str!("../templates/make-post.html")),
    ("about.html", include_str!("../templates/about.html")),
    ("contact.html", include_str!("../templates/contact.html")),
];

/// Compile the blog's templates
pub fn templates() -> HttpResult<Templates> {
    let templates = Templates::from_raw(TEMPLATES)?;
    debug!(templates = ?templates.names(), "Templates compiled");
    Ok(templates)
}
