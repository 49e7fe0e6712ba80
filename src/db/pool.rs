//! SQLite connection pool
//!
//! File databases get their parent directory created on first use; the
//! special url `:memory:` gives a private in-memory database, which is what
//! the tests run against.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::config::DatabaseConfig;

const MAX_CONNECTIONS: u32 = 20;

fn is_memory_url(url: &str) -> bool {
    url == ":memory:" || url.starts_with("sqlite::memory:")
}

/// Turn a configured url or bare file path into a sqlx connection url
fn connection_url(url: &str) -> String {
    if is_memory_url(url) {
        "sqlite::memory:".to_string()
    } else if url.starts_with("sqlite:") {
        if url.contains('?') {
            url.to_string()
        } else {
            format!("{}?mode=rwc", url)
        }
    } else {
        format!("sqlite:{}?mode=rwc", url)
    }
}

/// Create the SQLite pool described by `config`.
///
/// Foreign keys are enabled on every connection so that deleting a user or
/// post cascades to the rows that reference it.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    let url = config.url.as_str();

    if !is_memory_url(url) {
        let path = url.trim_start_matches("sqlite:");
        let path = path.split('?').next().unwrap_or(path);
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory: {:?}", parent)
                })?;
            }
        }
    }

    let options = SqliteConnectOptions::from_str(&connection_url(url))
        .with_context(|| format!("Invalid SQLite url: {}", url))?
        .foreign_keys(true);

    // An in-memory database lives and dies with its connection, so keep
    // exactly one open for the lifetime of the pool.
    let pool_options = if is_memory_url(url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to connect to SQLite database: {}", url))?;

    tracing::debug!("SQLite pool ready: {}", url);
    Ok(pool)
}

/// Create an in-memory SQLite pool for tests
pub async fn create_test_pool() -> Result<SqlitePool> {
    let config = DatabaseConfig {
        url: ":memory:".to_string(),
    };
    create_pool(&config).await
}

/// Check that the database answers
pub async fn ping(pool: &SqlitePool) -> Result<()> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .context("Database ping failed")?;
    Ok(())
}
