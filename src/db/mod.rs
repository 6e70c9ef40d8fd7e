//! Database module: models, schema, and the contact store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows, plus validated input
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `store.rs`: pool lifecycle and the CRUD primitives

pub mod models;
pub mod schema;
pub mod store;

pub use models::{ContactMessage, NewContactMessage};
pub use schema::SQLITE_INIT;
pub use store::ContactStore;
