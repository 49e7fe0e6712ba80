//! Video library

use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::models::{Video, VideoCategory};

/// Videos keyed by their caller-chosen id
#[derive(Debug)]
pub struct VideoLibrary {
    videos: RwLock<BTreeMap<i64, Video>>,
}

impl VideoLibrary {
    /// An empty library
    pub fn empty() -> Self {
        Self {
            videos: RwLock::new(BTreeMap::new()),
        }
    }

    /// The library with its sample video under id 1
    pub fn seeded() -> Self {
        let mut videos = BTreeMap::new();
        videos.insert(
            1,
            Video {
                title: "Rust Web Services".to_string(),
                description: "Learn path parameters with axum".to_string(),
                category: VideoCategory::Tech,
                views: 1000,
                likes: 100,
            },
        );
        Self {
            videos: RwLock::new(videos),
        }
    }

    pub async fn get(&self, id: i64) -> Option<Video> {
        self.videos.read().await.get(&id).cloned()
    }

    /// Videos in a category, ordered by id
    pub async fn by_category(&self, category: VideoCategory) -> Vec<Video> {
        self.videos
            .read()
            .await
            .values()
            .filter(|video| video.category == category)
            .cloned()
            .collect()
    }

    /// Store `video` under `id` unless the id is taken; returns whether it was stored
    pub async fn insert_new(&self, id: i64, video: Video) -> bool {
        let mut videos = self.videos.write().await;
        if videos.contains_key(&id) {
            return false;
        }
        videos.insert(id, video);
        true
    }
}

impl Default for VideoLibrary {
    fn default() -> Self {
        Self::seeded()
    }
}
