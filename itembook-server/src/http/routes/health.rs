//! Liveness endpoint
//!
//! Reports that the process is up and which itembook build is answering. It
//! never touches the items table, so it stays green while the database is
//! unreachable; a lost database shows up as 500s on `/items` instead.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Body of `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Crate name of the answering server (`itembook-server`)
    pub service: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    fn alive() -> Self {
        Self {
            status: "ok",
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::alive())
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
