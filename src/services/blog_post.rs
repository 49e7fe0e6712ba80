//! Blog post service
//!
//! Business rules for the in-memory blog board:
//! - titles are unique, ignoring case
//! - every read of a single post counts as a view
//! - an archived post stays archived

use std::sync::Arc;

use chrono::Utc;

use crate::models::{BlogPost, CreateBlogPostInput, PostStatus, UpdateBlogPostInput};
use crate::services::validation;
use crate::store::BlogPostStore;

const DUPLICATE_TITLE: &str = "A post with this title already exists";

/// Error types for blog post operations
#[derive(Debug, thiserror::Error)]
pub enum BlogPostServiceError {
    #[error("Post not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{0}")]
    DuplicateTitle(String),

    /// Status change out of `archived`
    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: PostStatus, to: PostStatus },
}

pub struct BlogPostService {
    store: Arc<BlogPostStore>,
}

impl BlogPostService {
    pub fn new(store: Arc<BlogPostStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: CreateBlogPostInput) -> Result<BlogPost, BlogPostServiceError> {
        validate_title(&input.title)?;
        validate_content(&input.content)?;
        validation::length_between("author", &input.author, 2, 50)
            .map_err(BlogPostServiceError::ValidationError)?;

        let post = self
            .store
            .write(|board| {
                if board.title_taken(&input.title, None) {
                    return Err(BlogPostServiceError::DuplicateTitle(
                        DUPLICATE_TITLE.to_string(),
                    ));
                }
                Ok(board.insert(input.title, input.content, input.author, input.status))
            })
            .await?;

        tracing::info!(blog_post_id = post.id, title = %post.title, "Blog post created");
        Ok(post)
    }

    /// One page of posts in creation order, optionally only those with
    /// `status`, plus the number of posts matching the filter before paging
    pub async fn list(
        &self,
        skip: usize,
        limit: usize,
        status: Option<PostStatus>,
    ) -> (Vec<BlogPost>, usize) {
        self.store
            .read(|board| {
                let matched: Vec<&BlogPost> = board
                    .iter()
                    .filter(|post| status.map_or(true, |s| post.status == s))
                    .collect();
                let total = matched.len();
                let page: Vec<BlogPost> = matched
                    .into_iter()
                    .skip(skip)
                    .take(limit)
                    .cloned()
                    .collect();
                (page, total)
            })
            .await
    }

    /// Read a post, counting the read as a view
    pub async fn get(&self, id: i64) -> Result<BlogPost, BlogPostServiceError> {
        self.store
            .write(|board| {
                let post = board.get_mut(id).ok_or(BlogPostServiceError::NotFound)?;
                post.views += 1;
                Ok(post.clone())
            })
            .await
    }

    /// Apply the fields present in `input`
    pub async fn update(
        &self,
        id: i64,
        input: UpdateBlogPostInput,
    ) -> Result<BlogPost, BlogPostServiceError> {
        if let Some(ref title) = input.title {
            validate_title(title)?;
        }
        if let Some(ref content) = input.content {
            validate_content(content)?;
        }

        self.store
            .write(|board| {
                let current = board.get(id).ok_or(BlogPostServiceError::NotFound)?;

                if let Some(ref title) = input.title {
                    if board.title_taken(title, Some(id)) {
                        return Err(BlogPostServiceError::DuplicateTitle(
                            DUPLICATE_TITLE.to_string(),
                        ));
                    }
                }
                if let Some(next) = input.status {
                    if !current.status.can_transition_to(next) {
                        return Err(BlogPostServiceError::InvalidTransition {
                            from: current.status,
                            to: next,
                        });
                    }
                }

                let post = board.get_mut(id).ok_or(BlogPostServiceError::NotFound)?;
                if let Some(title) = input.title {
                    post.title = title;
                }
                if let Some(content) = input.content {
                    post.content = content;
                }
                if let Some(status) = input.status {
                    post.status = status;
                }
                post.updated_at = Utc::now();
                Ok(post.clone())
            })
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), BlogPostServiceError> {
        self.store
            .write(|board| board.remove(id))
            .await
            .map(|_| ())
            .ok_or(BlogPostServiceError::NotFound)
    }
}

fn validate_title(title: &str) -> Result<(), BlogPostServiceError> {
    validation::length_between("title", title, 5, 100).map_err(BlogPostServiceError::ValidationError)
}

fn validate_content(content: &str) -> Result<(), BlogPostServiceError> {
    validation::min_length("content", content, 50).map_err(BlogPostServiceError::ValidationError)
}
