//! Video API endpoints

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::api::common::SmallPageQuery;
use crate::api::middleware::{ApiError, AppState};
use crate::models::{Video, VideoCategory, VideoStats};
use crate::services::VideoServiceError;

/// Build the videos router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/videos/{id}", get(get_video).post(create_video))
        .route("/videos/{id}/stats", get(get_video_stats))
        .route("/categories/{category}/videos", get(list_category_videos))
}

fn video_error(e: VideoServiceError) -> ApiError {
    match e {
        VideoServiceError::NotFound => ApiError::not_found("Video not found"),
        VideoServiceError::AlreadyExists => ApiError::bad_request("Video ID already exists"),
        VideoServiceError::ValidationError(msg) => ApiError::validation_error(msg),
    }
}

async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Video>, ApiError> {
    let video = state.video_service.get(id).await.map_err(video_error)?;
    Ok(Json(video))
}

async fn create_video(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Video>,
) -> Result<Json<Video>, ApiError> {
    let video = state
        .video_service
        .create(id, body)
        .await
        .map_err(video_error)?;
    Ok(Json(video))
}

async fn get_video_stats(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VideoStats>, ApiError> {
    let stats = state.video_service.stats(id).await.map_err(video_error)?;
    Ok(Json(stats))
}

async fn list_category_videos(
    State(state): State<AppState>,
    Path(category): Path<VideoCategory>,
    Query(query): Query<SmallPageQuery>,
) -> Json<Vec<Video>> {
    Json(
        state
            .video_service
            .list_by_category(category, query.skip, query.limit)
            .await,
    )
}
