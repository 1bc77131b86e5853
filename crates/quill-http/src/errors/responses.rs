//! HTTP error response formatting

use super::HttpError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

impl HttpError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::StartupFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::ConfigError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            HttpError::NotFound { .. } => StatusCode::NOT_FOUND,
            HttpError::Conflict { .. } => StatusCode::CONFLICT,
            HttpError::DatabaseError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::TemplateError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the visitor. Server-side causes stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            HttpError::BadRequest { message } => message.clone(),
            HttpError::NotFound { resource } => format!("{} could not be found.", resource),
            HttpError::Conflict { message } => message.clone(),
            _ => "Something went wrong on our side. Please try again later.".to_string(),
        }
    }
}

/// Render a standalone HTML error page
pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n\
         <h1>{title}</h1>\n\
         <p>{message}</p>\n\
         <p><a href=\"/\">Home</a></p>\n\
         </body>\n\
         </html>\n",
        title = html_escape::encode_text(&title),
        message = html_escape::encode_text(message),
    )
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "Request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "Request rejected");
        }

        (status, Html(error_page(status, &self.public_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_orm::ModelError;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(HttpError::bad_request("test").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(HttpError::not_found("Post").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            HttpError::from(ModelError::UniqueViolation("title".to_string())).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            HttpError::from(ModelError::Database("locked".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let error = HttpError::from(ModelError::Schema("no such table: posts".to_string()));
        assert!(!error.public_message().contains("posts"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let page = error_page(StatusCode::BAD_REQUEST, "<script>alert(1)</script>");
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
        assert!(page.contains("<title>400 Bad Request</title>"));
    }

    #[tokio::test]
    async fn test_error_response_is_html() {
        let response = HttpError::not_found("Post 9").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response.headers()[axum::http::header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/html"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("Post 9 could not be found."));
    }
}
