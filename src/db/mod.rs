//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `dataset.rs`: the `Dataset` trait the generic CRUD routes are written against
//! - `models.rs`: Rust structs mirroring DB rows and request bodies
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: queries, including the truncate-and-reload used by refresh

pub mod dataset;
pub mod models;
pub mod schema;
pub mod sqlite;

pub use dataset::{Dataset, SqlValue};
pub use models::DbUser;
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, Storage};
