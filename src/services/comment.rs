//! Comment service

use std::sync::Arc;
use uuid::Uuid;

use crate::db::repositories::{CommentRepository, PostRepository, UserRepository};
use crate::models::{Comment, CreateCommentInput};
use crate::services::validation;

#[derive(Debug, thiserror::Error)]
pub enum CommentServiceError {
    #[error("Comment not found")]
    CommentNotFound,

    #[error("Post not found")]
    PostNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Comment service
pub struct CommentService {
    repo: Arc<dyn CommentRepository>,
    post_repo: Arc<dyn PostRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl CommentService {
    pub fn new(
        repo: Arc<dyn CommentRepository>,
        post_repo: Arc<dyn PostRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            repo,
            post_repo,
            user_repo,
        }
    }

    /// Comment on a post. The post is checked before the author.
    pub async fn create(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        input: CreateCommentInput,
    ) -> Result<Comment, CommentServiceError> {
        validation::length_between("content", &input.content, 1, 1000)
            .map_err(CommentServiceError::ValidationError)?;

        self.require_post(post_id).await?;
        if self.user_repo.get_by_id(author_id).await?.is_none() {
            return Err(CommentServiceError::UserNotFound);
        }

        let comment = self
            .repo
            .create(&Comment::new(post_id, author_id, input.content))
            .await?;
        tracing::debug!(comment_id = %comment.id, post_id = %post_id, "Comment created");
        Ok(comment)
    }

    /// Comments on a post, oldest first
    pub async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, CommentServiceError> {
        self.require_post(post_id).await?;
        Ok(self.repo.list_by_post(post_id).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Comment, CommentServiceError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(CommentServiceError::CommentNotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), CommentServiceError> {
        if !self.repo.delete(id).await? {
            return Err(CommentServiceError::CommentNotFound);
        }
        Ok(())
    }

    async fn require_post(&self, post_id: Uuid) -> Result<(), CommentServiceError> {
        match self.post_repo.get_by_id(post_id).await? {
            Some(_) => Ok(()),
            None => Err(CommentServiceError::PostNotFound),
        }
    }
}
