use crate::models::PostStore;
use quill_http::{Context, FormSigner, HttpResult, Templates};
use axum::response::Html;
use std::sync::Arc;

/// Shared application state, cloned into every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub posts: PostStore,
    pub templates: Arc<Templates>,
    pub signer: Arc<FormSigner>,
}

impl AppState {
    pub fn new(posts: PostStore, templates: Templates, signer: FormSigner) -> Self {
        Self {
            posts,
            templates: Arc::new(templates),
            signer: Arc::new(signer),
        }
    }

    pub fn render(&self, template: &str, context: &Context) -> HttpResult<Html<String>> {
        self.templates.render(template, context)
    }
}
