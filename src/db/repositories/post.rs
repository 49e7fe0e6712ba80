//! Post repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use uuid::Uuid;

use super::get_uuid;
use crate::models::Post;

const POST_COLUMNS: &str = "id, title, content, published, author_id, created_at, updated_at";

/// Post repository trait
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new post
    async fn create(&self, post: &Post) -> Result<Post>;

    /// Get a post by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Post>>;

    /// List posts in creation order, optionally only (un)published ones
    async fn list(&self, skip: u32, limit: u32, published: Option<bool>) -> Result<Vec<Post>>;

    /// All posts written by a user, oldest first
    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>>;

    /// Persist title, content, published flag and updated_at
    async fn update(&self, post: &Post) -> Result<Post>;

    /// Delete a post (its comments go with it); returns false if there was none
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// SQLx-based post repository implementation
pub struct SqlxPostRepository {
    pool: SqlitePool,
}

impl SqlxPostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> Arc<dyn PostRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn create(&self, post: &Post) -> Result<Post> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, title, content, published, author_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(post.id.to_string())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.published)
        .bind(post.author_id.to_string())
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to create post")?;

        Ok(post.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Post>> {
        let sql = format!("SELECT {} FROM posts WHERE id = ?", POST_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to get post by ID")?;

        row.map(|row| row_to_post(&row)).transpose()
    }

    async fn list(&self, skip: u32, limit: u32, published: Option<bool>) -> Result<Vec<Post>> {
        let rows = match published {
            Some(flag) => {
                let sql = format!(
                    "SELECT {} FROM posts WHERE published = ? ORDER BY created_at ASC, rowid ASC LIMIT ? OFFSET ?",
                    POST_COLUMNS
                );
                sqlx::query(&sql)
                    .bind(flag)
                    .bind(limit as i64)
                    .bind(skip as i64)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM posts ORDER BY created_at ASC, rowid ASC LIMIT ? OFFSET ?",
                    POST_COLUMNS
                );
                sqlx::query(&sql)
                    .bind(limit as i64)
                    .bind(skip as i64)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .context("Failed to list posts")?;

        rows.iter().map(row_to_post).collect()
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>> {
        let sql = format!(
            "SELECT {} FROM posts WHERE author_id = ? ORDER BY created_at ASC, rowid ASC",
            POST_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(author_id.to_string())
            .fetch_all(&self.pool)
            .await
            .context("Failed to list posts by author")?;

        rows.iter().map(row_to_post).collect()
    }

    async fn update(&self, post: &Post) -> Result<Post> {
        sqlx::query(
            r#"
            UPDATE posts
            SET title = ?, content = ?, published = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.published)
        .bind(post.updated_at)
        .bind(post.id.to_string())
        .execute(&self.pool)
        .await
        .context("Failed to update post")?;

        self.get_by_id(post.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Post not found after update"))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete post")?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_post(row: &sqlx::sqlite::SqliteRow) -> Result<Post> {
    Ok(Post {
        id: get_uuid(row, "id")?,
        title: row.get("title"),
        content: row.get("content"),
        published: row.get("published"),
        author_id: get_uuid(row, "author_id")?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
