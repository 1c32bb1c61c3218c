//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - One pool for the process, passed down explicitly - no globals
//! - Every operation is a single statement - no transactions
//! - Rely on rows_affected for existence checks - no check-then-write

pub mod pool;
pub mod repos;

pub use pool::{create_pool, DatabaseConfig};
pub use sqlx::postgres::PgConnectOptions;
pub use repos::*;
