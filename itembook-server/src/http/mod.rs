//! HTTP server layer
//!
//! Axum server with:
//! - CORS headers on every response (any origin unless restricted)
//! - Request tracing
//! - Graceful shutdown that closes the database pool
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, serve_until, shutdown_signal, AppState, ServerConfig, ServerError};
