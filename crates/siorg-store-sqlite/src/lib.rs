//! SQLite backend for the staffing legal-acts registry.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Uniqueness, foreign keys and
//! the cascade from acts to provisions are enforced by the schema.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
