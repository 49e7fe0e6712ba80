//! Post service
//!
//! Posts belong to a registered user. Reading a single post returns it with
//! its author and its comments, each comment carrying its own author.

use crate::db::repositories::{CommentRepository, PostRepository, UserRepository};
use crate::models::{
    CommentWithAuthor, CreatePostInput, Post, PostWithRelations, UpdatePostInput, User,
};
use crate::services::validation;
use anyhow::anyhow;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Error types for post service operations
#[derive(Debug, thiserror::Error)]
pub enum PostServiceError {
    #[error("Post not found")]
    PostNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

pub struct PostService {
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
}

impl PostService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        post_repo: Arc<dyn PostRepository>,
        comment_repo: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            user_repo,
            post_repo,
            comment_repo,
        }
    }

    /// Create a post written by `author_id`
    pub async fn create(
        &self,
        author_id: Uuid,
        input: CreatePostInput,
    ) -> Result<Post, PostServiceError> {
        validate_title(&input.title)?;
        validate_content(&input.content)?;
        self.require_user(author_id).await?;

        let post = Post::new(author_id, input.title, input.content, input.published);
        let post = self.post_repo.create(&post).await?;
        tracing::info!(post_id = %post.id, author_id = %author_id, "Post created");
        Ok(post)
    }

    /// List posts, optionally only published or only unpublished ones
    pub async fn list(
        &self,
        skip: u32,
        limit: u32,
        published: Option<bool>,
    ) -> Result<Vec<Post>, PostServiceError> {
        Ok(self.post_repo.list(skip, limit, published).await?)
    }

    pub async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, PostServiceError> {
        self.require_user(author_id).await?;
        Ok(self.post_repo.list_by_author(author_id).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<PostWithRelations, PostServiceError> {
        let post = self
            .post_repo
            .get_by_id(id)
            .await?
            .ok_or(PostServiceError::PostNotFound)?;

        let mut authors: HashMap<Uuid, User> = HashMap::new();
        let author = self.load_author(&mut authors, post.author_id).await?;

        let mut comments = Vec::new();
        for comment in self.comment_repo.list_by_post(id).await? {
            let author = self.load_author(&mut authors, comment.author_id).await?;
            comments.push(CommentWithAuthor { comment, author });
        }

        Ok(PostWithRelations {
            post,
            author,
            comments,
        })
    }

    /// Apply the fields present in `input`
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdatePostInput,
    ) -> Result<Post, PostServiceError> {
        let mut post = self
            .post_repo
            .get_by_id(id)
            .await?
            .ok_or(PostServiceError::PostNotFound)?;

        if let Some(title) = input.title {
            validate_title(&title)?;
            post.title = title;
        }
        if let Some(content) = input.content {
            validate_content(&content)?;
            post.content = content;
        }
        if let Some(published) = input.published {
            post.published = published;
        }
        post.updated_at = Some(Utc::now());

        Ok(self.post_repo.update(&post).await?)
    }

    /// Delete a post and its comments
    pub async fn delete(&self, id: Uuid) -> Result<(), PostServiceError> {
        if !self.post_repo.delete(id).await? {
            return Err(PostServiceError::PostNotFound);
        }
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    async fn require_user(&self, id: Uuid) -> Result<User, PostServiceError> {
        self.user_repo
            .get_by_id(id)
            .await?
            .ok_or(PostServiceError::UserNotFound)
    }

    async fn load_author(
        &self,
        cache: &mut HashMap<Uuid, User>,
        id: Uuid,
    ) -> Result<User, PostServiceError> {
        if let Some(user) = cache.get(&id) {
            return Ok(user.clone());
        }
        // Foreign keys keep every author present
        let user = self
            .user_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| anyhow!("Author {} missing", id))?;
        cache.insert(id, user.clone());
        Ok(user)
    }
}

fn validate_title(title: &str) -> Result<(), PostServiceError> {
    validation::length_between("title", title, 1, 200).map_err(PostServiceError::ValidationError)
}

fn validate_content(content: &str) -> Result<(), PostServiceError> {
    validation::min_length("content", content, 1).map_err(PostServiceError::ValidationError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{
        SqlxCommentRepository, SqlxPostRepository, SqlxUserRepository,
    };
    use crate::db::{create_test_pool, migrations};
    use crate::models::Comment;

    struct Fixture {
        service: PostService,
        users: Arc<dyn UserRepository>,
        comments: Arc<dyn CommentRepository>,
    }

    async fn setup() -> Fixture {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let users = SqlxUserRepository::boxed(pool.clone());
        let comments = SqlxCommentRepository::boxed(pool.clone());
        let service = PostService::new(
            users.clone(),
            SqlxPostRepository::boxed(pool),
            comments.clone(),
        );
        Fixture {
            service,
            users,
            comments,
        }
    }

    async fn add_user(users: &Arc<dyn UserRepository>, name: &str) -> User {
        users
            .create(&User::new(
                name.to_string(),
                format!("{}@example.com", name),
                name.to_string(),
                None,
                "hash".to_string(),
            ))
            .await
            .expect("Failed to create user")
    }

    fn input(title: &str, published: bool) -> CreatePostInput {
        CreatePostInput {
            title: title.to_string(),
            content: "Some content".to_string(),
            published,
        }
    }

    #[tokio::test]
    async fn test_create_requires_existing_author() {
        let f = setup().await;
        let result = f.service.create(Uuid::new_v4(), input("Hello", false)).await;
        assert!(matches!(result, Err(PostServiceError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_create_validates_title() {
        let f = setup().await;
        let author = add_user(&f.users, "writer").await;

        let empty = f.service.create(author.id, input("", false)).await;
        assert!(matches!(empty, Err(PostServiceError::ValidationError(_))));

        let long = f
            .service
            .create(author.id, input(&"t".repeat(201), false))
            .await;
        assert!(matches!(long, Err(PostServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_list_filters_published() {
        let f = setup().await;
        let author = add_user(&f.users, "writer").await;
        f.service.create(author.id, input("Draft", false)).await.unwrap();
        f.service.create(author.id, input("Live", true)).await.unwrap();

        assert_eq!(f.service.list(0, 100, None).await.unwrap().len(), 2);
        let live = f.service.list(0, 100, Some(true)).await.unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].title, "Live");
        assert_eq!(f.service.list(1, 100, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_includes_author_and_comment_authors() {
        let f = setup().await;
        let author = add_user(&f.users, "writer").await;
        let reader = add_user(&f.users, "reader").await;
        let post = f.service.create(author.id, input("Hello", true)).await.unwrap();
        f.comments
            .create(&Comment::new(post.id, reader.id, "Great".into()))
            .await
            .unwrap();

        let full = f.service.get(post.id).await.expect("Failed to get post");
        assert_eq!(full.author.id, author.id);
        assert_eq!(full.comments.len(), 1);
        assert_eq!(full.comments[0].author.username, "reader");
    }

    #[tokio::test]
    async fn test_update_partial() {
        let f = setup().await;
        let author = add_user(&f.users, "writer").await;
        let post = f.service.create(author.id, input("Hello", false)).await.unwrap();

        let updated = f
            .service
            .update(
                post.id,
                UpdatePostInput {
                    published: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Hello");
        assert!(updated.published);
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_list_by_author_and_delete() {
        let f = setup().await;
        let author = add_user(&f.users, "writer").await;
        let post = f.service.create(author.id, input("Hello", false)).await.unwrap();

        assert_eq!(f.service.list_by_author(author.id).await.unwrap().len(), 1);
        assert!(matches!(
            f.service.list_by_author(Uuid::new_v4()).await,
            Err(PostServiceError::UserNotFound)
        ));

        f.service.delete(post.id).await.unwrap();
        assert!(matches!(
            f.service.get(post.id).await,
            Err(PostServiceError::PostNotFound)
        ));
        assert!(matches!(
            f.service.delete(post.id).await,
            Err(PostServiceError::PostNotFound)
        ));
    }
}
