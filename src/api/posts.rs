//! Post API endpoints
//!
//! - POST /posts?user_id= - Create a post for a user
//! - GET /posts - List posts, optionally by `published`
//! - GET /posts/{id} - Post with author and comments
//! - PATCH /posts/{id} - Partial update
//! - DELETE /posts/{id} - Remove a post and its comments

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::common::{default_limit, ActingUserQuery};
use crate::api::middleware::{ApiError, AppState};
use crate::models::{CreatePostInput, Post, PostWithRelations, UpdatePostInput};
use crate::services::PostServiceError;

/// Query parameters for listing posts
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub published: Option<bool>,
}

/// Build the posts router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/{id}", get(get_post).patch(update_post).delete(delete_post))
}

fn post_error(e: PostServiceError) -> ApiError {
    match e {
        PostServiceError::PostNotFound => ApiError::not_found("Post not found"),
        PostServiceError::UserNotFound => ApiError::not_found("User not found"),
        PostServiceError::ValidationError(msg) => ApiError::validation_error(msg),
        PostServiceError::InternalError(e) => ApiError::internal_error(e),
    }
}

async fn create_post(
    State(state): State<AppState>,
    Query(query): Query<ActingUserQuery>,
    Json(body): Json<CreatePostInput>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let post = state
        .post_service
        .create(query.user_id, body)
        .await
        .map_err(post_error)?;
    Ok((StatusCode::CREATED, Json(post)))
}

async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = state
        .post_service
        .list(query.skip, query.limit, query.published)
        .await
        .map_err(post_error)?;
    Ok(Json(posts))
}

async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostWithRelations>, ApiError> {
    let post = state.post_service.get(id).await.map_err(post_error)?;
    Ok(Json(post))
}

async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePostInput>,
) -> Result<Json<Post>, ApiError> {
    let post = state.post_service.update(id, body).await.map_err(post_error)?;
    Ok(Json(post))
}

async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.post_service.delete(id).await.map_err(post_error)?;
    Ok(StatusCode::NO_CONTENT)
}
