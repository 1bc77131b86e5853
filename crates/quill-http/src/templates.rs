//! HTML rendering through tera
//!
//! Templates whose names end in `.html` are auto-escaped; values that are
//! already trusted HTML must be marked with the `safe` filter.

use crate::errors::HttpResult;
use axum::response::Html;
use tera::{Context, Tera};

/// Compiled template set
#[derive(Debug, Clone)]
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Compile templates from `(name, source)` pairs, typically embedded
    /// with `include_str!`.
    pub fn from_raw<'a, I>(templates: I) -> HttpResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates)?;
        Ok(Self { tera })
    }

    /// Render `name` into a string
    pub fn render_string(&self, name: &str, context: &Context) -> HttpResult<String> {
        Ok(self.tera.render(name, context)?)
    }

    /// Render `name` into an HTML response body
    pub fn render(&self, name: &str, context: &Context) -> HttpResult<Html<String>> {
        self.render_string(name, context).map(Html)
    }

    /// Names of the loaded templates, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::HttpError;

    fn templates() -> Templates {
        Templates::from_raw([
            ("base.html", "<main>{% block content %}{% endblock content %}</main>"),
            (
                "page.html",
                "{% extends \"base.html\" %}{% block content %}{{ title }}|{{ body | safe }}{% endblock content %}",
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_render_escapes_by_default() {
        let mut context = Context::new();
        context.insert("title", "<b>Title</b>");
        context.insert("body", "<p>trusted</p>");

        let html = templates().render_string("page.html", &context).unwrap();

        assert_eq!(
            html,
            "<main>&lt;b&gt;Title&lt;&#x2F;b&gt;|<p>trusted</p></main>"
        );
    }

    #[test]
    fn test_missing_template_is_template_error() {
        let result = templates().render("nope.html", &Context::new());
        assert!(matches!(result, Err(HttpError::TemplateError { .. })));
    }

    #[test]
    fn test_invalid_source_rejected() {
        let result = Templates::from_raw([("broken.html", "{% if %}")]);
        assert!(matches!(result, Err(HttpError::TemplateError { .. })));
    }

    #[test]
    fn test_names_sorted() {
        assert_eq!(templates().names(), vec!["base.html", "page.html"]);
    }
}
