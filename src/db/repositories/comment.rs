//! Comment repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use uuid::Uuid;

use super::get_uuid;
use crate::models::Comment;

/// Comment repository trait
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a new comment
    async fn create(&self, comment: &Comment) -> Result<Comment>;

    /// Get a comment by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Comment>>;

    /// Comments on a post, oldest first
    async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>>;

    /// Comments written by a user, oldest first
    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Comment>>;

    /// Delete a comment; returns false if there was none
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// SQLx-based comment repository implementation
pub struct SqlxCommentRepository {
    pool: SqlitePool,
}

impl SqlxCommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> Arc<dyn CommentRepository> {
        Arc::new(Self::new(pool))
    }

    async fn list_where(&self, column: &str, id: Uuid) -> Result<Vec<Comment>> {
        let sql = format!(
            r#"
            SELECT id, content, author_id, post_id, created_at, updated_at
            FROM comments
            WHERE {} = ?
            ORDER BY created_at ASC, rowid ASC
            "#,
            column
        );
        let rows = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to list comments by {}", column))?;

        rows.iter().map(row_to_comment).collect()
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(&self, comment: &Comment) -> Result<Comment> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, content, author_id, post_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(comment.id.to_string())
        .bind(&comment.content)
        .bind(comment.author_id.to_string())
        .bind(comment.post_id.to_string())
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to create comment")?;

        Ok(comment.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Comment>> {
        let row = sqlx::query(
            r#"
            SELECT id, content, author_id, post_id, created_at, updated_at
            FROM comments
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get comment by ID")?;

        row.map(|row| row_to_comment(&row)).transpose()
    }

    async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        self.list_where("post_id", post_id).await
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Comment>> {
        self.list_where("author_id", author_id).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete comment")?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_comment(row: &sqlx::sqlite::SqliteRow) -> Result<Comment> {
    Ok(Comment {
        id: get_uuid(row, "id")?,
        content: row.get("content"),
        author_id: get_uuid(row, "author_id")?,
        post_id: get_uuid(row, "post_id")?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{
        PostRepository, SqlxPostRepository, SqlxUserRepository, UserRepository,
    };
    use crate::db::{create_test_pool, migrations};
    use crate::models::{Post, User};

    struct Fixture {
        posts: SqlxPostRepository,
        comments: SqlxCommentRepository,
        user: User,
        post: Post,
    }

    async fn setup() -> Fixture {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let users = SqlxUserRepository::new(pool.clone());
        let posts = SqlxPostRepository::new(pool.clone());
        let user = users
            .create(&User::new(
                "reader".into(),
                "reader@example.com".into(),
                "Reader".into(),
                None,
                "hash".into(),
            ))
            .await
            .expect("Failed to create user");
        let post = posts
            .create(&Post::new(user.id, "Topic".into(), "Body".into(), true))
            .await
            .expect("Failed to create post");

        Fixture {
            posts,
            comments: SqlxCommentRepository::new(pool),
            user,
            post,
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let f = setup().await;
        for text in ["first", "second"] {
            f.comments
                .create(&Comment::new(f.post.id, f.user.id, text.into()))
                .await
                .expect("Failed to create comment");
        }

        let on_post = f.comments.list_by_post(f.post.id).await.unwrap();
        assert_eq!(on_post.len(), 2);
        assert_eq!(on_post[0].content, "first");

        let by_user = f.comments.list_by_author(f.user.id).await.unwrap();
        assert_eq!(by_user.len(), 2);
    }

    #[tokio::test]
    async fn test_deleting_post_removes_comments() {
        let f = setup().await;
        let comment = f
            .comments
            .create(&Comment::new(f.post.id, f.user.id, "bye".into()))
            .await
            .expect("Failed to create comment");

        assert!(f.posts.delete(f.post.id).await.unwrap());
        assert!(f.comments.get_by_id(comment.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let f = setup().await;
        let comment = f
            .comments
            .create(&Comment::new(f.post.id, f.user.id, "gone soon".into()))
            .await
            .expect("Failed to create comment");

        assert!(f.comments.delete(comment.id).await.unwrap());
        assert!(!f.comments.delete(comment.id).await.unwrap());
    }
}
