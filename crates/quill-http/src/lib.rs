//! # quill-http
//!
//! HTTP plumbing shared by quill applications:
//! - [`HttpConfig`] read from the environment
//! - [`HttpError`] rendered as HTML error pages
//! - structured logging setup
//! - [`Templates`], a thin wrapper over tera
//! - [`FormSigner`] for anti-forgery tokens on HTML forms
//! - the server loop with request tracing, timeouts, body limits and
//!   graceful shutdown

pub mod config;
pub mod csrf;
pub mod errors;
pub mod logging;
pub mod server;
pub mod templates;

pub use config::{HttpConfig, HttpDefaults};
pub use csrf::{CsrfError, FormSigner, CSRF_FIELD};
pub use errors::{HttpError, HttpResult};
pub use logging::{init_logging, log_shutdown_info, log_startup_info, LogFormat, LoggingConfig};
pub use server::{apply_http_layers, serve_with_shutdown, shutdown_signal, start_server};
pub use templates::Templates;

// Re-export for handlers building template contexts
pub use tera::Context;
