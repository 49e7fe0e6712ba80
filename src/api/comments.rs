//! Comment API endpoints
//!
//! - POST /posts/{id}/comments?user_id= - Comment on a post
//! - GET /posts/{id}/comments - Comments on a post
//! - GET /comments/{id} - A single comment
//! - DELETE /comments/{id} - Remove a comment

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::api::common::ActingUserQuery;
use crate::api::middleware::{ApiError, AppState};
use crate::models::{Comment, CreateCommentInput};
use crate::services::CommentServiceError;

/// Build the comments router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts/{id}/comments", get(list_comments).post(create_comment))
        .route("/comments/{id}", get(get_comment).delete(delete_comment))
}

fn comment_error(e: CommentServiceError) -> ApiError {
    match e {
        CommentServiceError::CommentNotFound => ApiError::not_found("Comment not found"),
        CommentServiceError::PostNotFound => ApiError::not_found("Post not found"),
        CommentServiceError::UserNotFound => ApiError::not_found("User not found"),
        CommentServiceError::ValidationError(msg) => ApiError::validation_error(msg),
        CommentServiceError::InternalError(e) => ApiError::internal_error(e),
    }
}

async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Query(query): Query<ActingUserQuery>,
    Json(body): Json<CreateCommentInput>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let comment = state
        .comment_service
        .create(post_id, query.user_id, body)
        .await
        .map_err(comment_error)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = state
        .comment_service
        .list_for_post(post_id)
        .await
        .map_err(comment_error)?;
    Ok(Json(comments))
}

async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Comment>, ApiError> {
    let comment = state.comment_service.get(id).await.map_err(comment_error)?;
    Ok(Json(comment))
}

async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.comment_service.delete(id).await.map_err(comment_error)?;
    Ok(StatusCode::NO_CONTENT)
}
