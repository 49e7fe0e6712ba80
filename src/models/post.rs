//! Post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CommentWithAuthor, User};

/// Post entity, owned by exactly one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Drafts are unpublished
    pub published: bool,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Build a new post for `author_id` with a fresh id
    pub fn new(author_id: Uuid, title: String, content: String, published: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            published,
            author_id,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Post with its author and comments, as returned by detail views
#[derive(Debug, Clone, Serialize)]
pub struct PostWithRelations {
    #[serde(flatten)]
    pub post: Post,
    pub author: User,
    pub comments: Vec<CommentWithAuthor>,
}

/// Input for creating a post
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub published: bool,
}

/// Input for updating a post; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}
