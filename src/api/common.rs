//! Common API utilities and shared types

use serde::Deserialize;

/// Default page size for user and post listings
pub fn default_limit() -> u32 {
    100
}

/// Default page size for the in-memory collections
pub fn default_small_limit() -> usize {
    10
}

/// `skip` / `limit` query for database-backed listings
#[derive(Debug, Deserialize)]
pub struct SkipLimitQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// `skip` / `limit` query for in-memory listings
#[derive(Debug, Deserialize)]
pub struct SmallPageQuery {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_small_limit")]
    pub limit: usize,
}

/// `?user_id=` naming the acting user
#[derive(Debug, Deserialize)]
pub struct ActingUserQuery {
    pub user_id: uuid::Uuid,
}
