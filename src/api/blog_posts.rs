//! Blog board API endpoints
//!
//! - POST /blog/posts - Create a blog post
//! - GET /blog/posts - List posts (204 when no post matches the status filter)
//! - GET /blog/posts/{id} - Read a post, counting a view
//! - PATCH /blog/posts/{id} - Partial update
//! - DELETE /blog/posts/{id} - Remove a post

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::api::common::default_small_limit;
use crate::api::middleware::{ApiError, AppState};
use crate::models::{BlogPost, CreateBlogPostInput, PostStatus, UpdateBlogPostInput};
use crate::services::BlogPostServiceError;

/// Query parameters for listing blog posts
#[derive(Debug, Deserialize)]
pub struct ListBlogPostsQuery {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_small_limit")]
    pub limit: usize,
    pub status: Option<PostStatus>,
}

/// Build the blog board router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_blog_posts).post(create_blog_post))
        .route(
            "/{id}",
            get(get_blog_post)
                .patch(update_blog_post)
                .delete(delete_blog_post),
        )
}

fn blog_error(e: BlogPostServiceError) -> ApiError {
    match e {
        BlogPostServiceError::NotFound => ApiError::not_found("Post not found"),
        BlogPostServiceError::ValidationError(msg) => ApiError::validation_error(msg),
        BlogPostServiceError::DuplicateTitle(msg) => ApiError::bad_request(msg),
        e @ BlogPostServiceError::InvalidTransition { .. } => ApiError::bad_request(e.to_string()),
    }
}

async fn create_blog_post(
    State(state): State<AppState>,
    Json(body): Json<CreateBlogPostInput>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    let post = state.blog_post_service.create(body).await.map_err(blog_error)?;
    Ok((StatusCode::CREATED, Json(post)))
}

async fn list_blog_posts(
    State(state): State<AppState>,
    Query(query): Query<ListBlogPostsQuery>,
) -> Response {
    let (posts, matched) = state
        .blog_post_service
        .list(query.skip, query.limit, query.status)
        .await;

    if matched == 0 {
        return StatusCode::NO_CONTENT.into_response();
    }
    Json(posts).into_response()
}

async fn get_blog_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BlogPost>, ApiError> {
    let post = state.blog_post_service.get(id).await.map_err(blog_error)?;
    Ok(Json(post))
}

async fn update_blog_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateBlogPostInput>,
) -> Result<Json<BlogPost>, ApiError> {
    let post = state
        .blog_post_service
        .update(id, body)
        .await
        .map_err(blog_error)?;
    Ok(Json(post))
}

async fn delete_blog_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.blog_post_service.delete(id).await.map_err(blog_error)?;
    Ok(StatusCode::NO_CONTENT)
}
