use crate::state::AppState;
use axum::extract::State;
use axum::http::Uri;
use axum::response::Html;
use quill_http::{Context, HttpError, HttpResult};

/// `GET /about`
pub async fn about(State(state): State<AppState>) -> HttpResult<Html<String>> {
    state.render("about.html", &Context::new())
}

/// `GET /contact`
pub async fn contact(State(state): State<AppState>) -> HttpResult<Html<String>> {
    state.render("contact.html", &Context::new())
}

/// Anything no route matched
pub async fn not_found(uri: Uri) -> HttpError {
    HttpError::not_found(format!("The page {}", uri.path()))
}
