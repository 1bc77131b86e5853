//! # quill-orm: Database Layer for quill
//!
//! A thin layer over `sqlx` and SQLite: a configurable connection pool
//! ([`Database`]), scoped transactions that roll back unless committed
//! ([`Transaction`]) and a model error type that classifies driver
//! failures into not-found and uniqueness violations ([`ModelError`]).

pub mod database;
pub mod error;
pub mod transaction;

pub use database::*;
pub use error::*;
pub use transaction::*;

/// Re-export of the driver types models need for queries
pub use sqlx::{sqlite::SqliteRow, FromRow, Row, SqliteConnection, SqlitePool};
