//! HTTP server command for the items API
//!
//! Builds the database pool from flags/environment, then runs the server
//! until SIGTERM or Ctrl+C. A pool that cannot connect aborts startup.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use itembook_server::db::{create_pool, DatabaseConfig, PgConnectOptions};
use itembook_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "ITEMBOOK_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Allowed CORS origin (repeatable, comma-separated in env; default: any)
    #[arg(long = "allow-origin", env = "ITEMBOOK_ALLOW_ORIGINS", value_delimiter = ',')]
    pub allow_origins: Vec<String>,

    /// Database user
    #[arg(long, env = "ITEMBOOK_DB_USER")]
    pub db_user: Option<String>,

    /// Database password
    #[arg(long, env = "ITEMBOOK_DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database host, optionally with :port
    #[arg(long, env = "ITEMBOOK_DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database name
    #[arg(long, env = "ITEMBOOK_DB_NAME")]
    pub db_name: Option<String>,

    /// Full database URL (overrides the individual ITEMBOOK_DB_* settings)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

impl ServeArgs {
    /// Resolve connection options: DATABASE_URL first, then the four parts.
    fn connect_options(&self) -> Result<PgConnectOptions> {
        if let Some(url) = &self.database_url {
            return url
                .parse::<PgConnectOptions>()
                .context("DATABASE_URL is not a valid PostgreSQL URL");
        }

        let config = DatabaseConfig {
            user: self
                .db_user
                .clone()
                .context("ITEMBOOK_DB_USER not set. Set via --db-user, ITEMBOOK_DB_USER env, or .env")?,
            password: self.db_password.clone().unwrap_or_default(),
            host: self.db_host.clone(),
            name: self
                .db_name
                .clone()
                .context("ITEMBOOK_DB_NAME not set. Set via --db-name, ITEMBOOK_DB_NAME env, or .env")?,
        };
        tracing::debug!(?config, "database config resolved");

        Ok(config.connect_options())
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let options = args.connect_options()?;

    let config = ServerConfig {
        bind_addr: args.bind,
        ..ServerConfig::default()
    }
    .with_allowed_origins(&args.allow_origins)
    .context("Invalid --allow-origin")?;

    tracing::info!("Starting itembook server on {}", args.bind);

    // Fail fast: no traffic is served without a working pool
    let pool = create_pool(options)
        .await
        .context("Failed to connect to database")?;

    // Run server (blocks until shutdown, closes the pool on the way out)
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
