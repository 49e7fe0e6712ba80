//! Shared API state and error rendering
//!
//! `AppState` carries the services every handler needs; `ApiError` is the
//! JSON error body returned by all endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::db::repositories::{SqlxCommentRepository, SqlxPostRepository, SqlxUserRepository};
use crate::services::{
    BlogPostService, CatalogService, CommentService, PostService, UserService, VideoService,
};
use crate::store::{BlogPostStore, ItemCatalog, VideoLibrary};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub post_service: Arc<PostService>,
    pub comment_service: Arc<CommentService>,
    pub blog_post_service: Arc<BlogPostService>,
    pub video_service: Arc<VideoService>,
    pub catalog_service: Arc<CatalogService>,
}

impl AppState {
    /// Wire the services over a migrated pool and freshly seeded in-memory stores
    pub fn new(pool: SqlitePool) -> Self {
        let user_repo = SqlxUserRepository::boxed(pool.clone());
        let post_repo = SqlxPostRepository::boxed(pool.clone());
        let comment_repo = SqlxCommentRepository::boxed(pool);

        Self {
            user_service: Arc::new(UserService::new(
                user_repo.clone(),
                post_repo.clone(),
                comment_repo.clone(),
            )),
            post_service: Arc::new(PostService::new(
                user_repo.clone(),
                post_repo.clone(),
                comment_repo.clone(),
            )),
            comment_service: Arc::new(CommentService::new(comment_repo, post_repo, user_repo)),
            blog_post_service: Arc::new(BlogPostService::new(Arc::new(BlogPostStore::new()))),
            video_service: Arc::new(VideoService::new(Arc::new(VideoLibrary::seeded()))),
            catalog_service: Arc::new(CatalogService::new(Arc::new(ItemCatalog::seeded()))),
        }
    }
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    /// Request is well-formed but conflicts with current state
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Logs the cause; the client only sees a generic message
    pub fn internal_error(cause: impl std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "Request failed");
        Self::new("INTERNAL_ERROR", "Internal server error")
    }

    pub fn status(&self) -> StatusCode {
        match self.error.code.as_str() {
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "BAD_REQUEST" => StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR" => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::validation_error("x").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::new("SOMETHING_ELSE", "x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_error_hides_cause() {
        let error = ApiError::internal_error("disk I/O error at /var/lib/db");
        assert_eq!(error.error.code, "INTERNAL_ERROR");
        assert_eq!(error.error.message, "Internal server error");
    }

    #[test]
    fn test_error_body_shape() {
        let plain = serde_json::to_value(ApiError::not_found("User not found")).unwrap();
        assert_eq!(
            plain,
            serde_json::json!({"error": {"code": "NOT_FOUND", "message": "User not found"}})
        );
    }
}
