//! User API endpoints
//!
//! - POST /users - Register a user
//! - GET /users - List users
//! - GET /users/{id} - User with their posts and comments
//! - PUT /users/{id} - Partial update
//! - DELETE /users/{id} - Remove a user and everything they wrote
//! - GET /users/{id}/posts - Posts written by a user

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::api::common::SkipLimitQuery;
use crate::api::middleware::{ApiError, AppState};
use crate::models::{CreateUserInput, Post, UpdateUserInput, User, UserDetail};
use crate::services::{PostServiceError, UserServiceError};

/// Build the users router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/{id}/posts", get(list_user_posts))
}

fn user_error(e: UserServiceError) -> ApiError {
    match e {
        UserServiceError::NotFound => ApiError::not_found("User not found"),
        UserServiceError::ValidationError(msg) => ApiError::validation_error(msg),
        UserServiceError::UserExists(msg) => ApiError::bad_request(msg),
        UserServiceError::InternalError(e) => ApiError::internal_error(e),
    }
}

async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserInput>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.user_service.create(body).await.map_err(user_error)?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<SkipLimitQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .user_service
        .list(query.skip, query.limit)
        .await
        .map_err(user_error)?;
    Ok(Json(users))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserDetail>, ApiError> {
    let detail = state.user_service.get_detail(id).await.map_err(user_error)?;
    Ok(Json(detail))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserInput>,
) -> Result<Json<User>, ApiError> {
    let user = state.user_service.update(id, body).await.map_err(user_error)?;
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.user_service.delete(id).await.map_err(user_error)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_user_posts(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = state
        .post_service
        .list_by_author(id)
        .await
        .map_err(|e| match e {
            PostServiceError::UserNotFound => ApiError::not_found("User not found"),
            other => ApiError::internal_error(other),
        })?;
    Ok(Json(posts))
}
