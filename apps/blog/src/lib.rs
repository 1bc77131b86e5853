//! # quill-blog
//!
//! A minimal blog: list, show, create, edit and delete posts stored in one
//! SQLite table, rendered server-side from HTML templates.

pub mod controllers;
pub mod models;
pub mod requests;
pub mod routes;
pub mod state;
pub mod views;

pub use routes::app;
pub use state::AppState;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
