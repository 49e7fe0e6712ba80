//! User model
//!
//! A registered author. Users own posts and comments; removing a user removes
//! everything they wrote.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{Comment, Post};

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Username (unique, 3-50 chars)
    pub username: String,
    /// Email address (unique)
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Optional short biography
    pub bio: Option<String>,
    /// Password hash (argon2)
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Whether the account is active
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp, unset until the first update
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Build a new, active user with a fresh id.
    ///
    /// The password must already be hashed.
    pub fn new(
        username: String,
        email: String,
        full_name: String,
        bio: Option<String>,
        password_hash: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            full_name,
            bio,
            password_hash,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// A user together with everything they authored
#[derive(Debug, Clone, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
}

/// Input for creating a user
#[derive(Clone, Deserialize)]
pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    pub password: String,
}

impl fmt::Debug for CreateUserInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserInput")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("bio", &self.bio)
            .field("password", &"**********")
            .finish()
    }
}

/// Input for updating a user; absent fields are left unchanged
#[derive(Clone, Default, Deserialize)]
pub struct UpdateUserInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for UpdateUserInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateUserInput")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("bio", &self.bio)
            .field("password", &self.password.as_ref().map(|_| "**********"))
            .finish()
    }
}
