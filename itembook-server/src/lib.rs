//! itembook-server: HTTP CRUD API over the items table
//!
//! Exposes list, detail, create, update and delete for items stored in
//! PostgreSQL. The binary in `itembook-cli` builds the pool and runs
//! [`http::run_server`].

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, DatabaseConfig};
pub use http::{run_server, ServerConfig};
