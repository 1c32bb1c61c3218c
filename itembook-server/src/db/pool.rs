//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is created once
//! at startup and handed to the HTTP layer; it is closed by the server after
//! in-flight requests drain.

use std::fmt;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connection parameters for the items store.
///
/// `host` may carry an explicit port (`db.internal:5433`). IPv6 literals are
/// taken as-is (`::1`) or bracketed when a port follows (`[::1]:5433`).
#[derive(Clone)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub name: String,
}

impl DatabaseConfig {
    /// Build sqlx connect options from the four parts.
    ///
    /// Credentials are passed as discrete options, so passwords containing
    /// URL metacharacters need no escaping.
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .username(&self.user)
            .password(&self.password)
            .database(&self.name);

        match split_host_port(&self.host) {
            (host, Some(port)) => options.host(host).port(port),
            (host, None) => options.host(host),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("name", &self.name)
            .finish()
    }
}

/// Split `host[:port]`, stripping brackets from `[v6]` and `[v6]:port`.
///
/// An unbracketed name with more than one `:` is an IPv6 literal and is
/// never split.
fn split_host_port(host: &str) -> (&str, Option<u16>) {
    if let Some((inner, rest)) = host
        .strip_prefix('[')
        .and_then(|bracketed| bracketed.split_once(']'))
    {
        if rest.is_empty() {
            return (inner, None);
        }
        if let Some(port) = rest.strip_prefix(':').and_then(|p| p.parse().ok()) {
            return (inner, Some(port));
        }
        return (host, None);
    }

    match host.rsplit_once(':') {
        Some((name, port)) if !name.contains(':') => match port.parse() {
            Ok(port) => (name, Some(port)),
            Err(_) => (host, None),
        },
        _ => (host, None),
    }
}

/// Create a PostgreSQL connection pool and verify connectivity.
///
/// # Errors
///
/// Returns an error if the first connection or the ping fails. Callers treat
/// this as fatal and abort startup.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(config.connect_options()).await?;
/// ```
pub async fn create_pool(options: PgConnectOptions) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(options, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a PostgreSQL connection pool with custom options.
pub async fn create_pool_with_options(
    options: PgConnectOptions,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    ping(&pool).await?;
    tracing::debug!(max_connections, "database pool ready");

    Ok(pool)
}

/// Round-trip a trivial statement through the pool.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
