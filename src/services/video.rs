//! Video service

use std::sync::Arc;

use crate::models::{Video, VideoCategory, VideoStats};
use crate::store::VideoLibrary;

#[derive(Debug, thiserror::Error)]
pub enum VideoServiceError {
    #[error("Video not found")]
    NotFound,

    #[error("Video ID already exists")]
    AlreadyExists,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub struct VideoService {
    library: Arc<VideoLibrary>,
}

impl VideoService {
    pub fn new(library: Arc<VideoLibrary>) -> Self {
        Self { library }
    }

    pub async fn get(&self, id: i64) -> Result<Video, VideoServiceError> {
        check_id(id)?;
        self.library.get(id).await.ok_or(VideoServiceError::NotFound)
    }

    pub async fn list_by_category(
        &self,
        category: VideoCategory,
        skip: usize,
        limit: usize,
    ) -> Vec<Video> {
        self.library
            .by_category(category)
            .await
            .into_iter()
            .skip(skip)
            .take(limit)
            .collect()
    }

    pub async fn stats(&self, id: i64) -> Result<VideoStats, VideoServiceError> {
        let video = self.get(id).await?;
        Ok(VideoStats::from(&video))
    }

    /// Store a video under a caller-chosen id
    pub async fn create(&self, id: i64, video: Video) -> Result<Video, VideoServiceError> {
        check_id(id)?;
        if !self.library.insert_new(id, video.clone()).await {
            return Err(VideoServiceError::AlreadyExists);
        }
        tracing::info!(video_id = id, category = %video.category, "Video added");
        Ok(video)
    }
}

fn check_id(id: i64) -> Result<(), VideoServiceError> {
    if id < 1 {
        return Err(VideoServiceError::ValidationError(
            "video id must be greater than or equal to 1".to_string(),
        ));
    }
    Ok(())
}
