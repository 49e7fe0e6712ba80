//! Database layer
//!
//! SQLite storage for users, posts and comments:
//! - `pool`: connection pool creation
//! - `migrations`: embedded schema migrations
//! - `repositories`: one repository per table
//!
//! # Usage
//!
//! ```ignore
//! use blogdesk::config::DatabaseConfig;
//! use blogdesk::db::{create_pool, migrations};
//!
//! let pool = create_pool(&DatabaseConfig::default()).await?;
//! migrations::run_migrations(&pool).await?;
//! ```

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool, ping};
