//! Video model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Video category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCategory {
    Tech,
    Gaming,
    Music,
    Education,
}

impl fmt::Display for VideoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tech => write!(f, "tech"),
            Self::Gaming => write!(f, "gaming"),
            Self::Music => write!(f, "music"),
            Self::Education => write!(f, "education"),
        }
    }
}

/// Video entity; the id is the key it is stored under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub title: String,
    pub description: String,
    pub category: VideoCategory,
    pub views: u64,
    pub likes: u64,
}

/// Engagement figures for a video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoStats {
    pub views: u64,
    pub likes: u64,
    /// likes / views as a percentage, two decimals; 0 with no views
    pub engagement_rate: f64,
}

impl From<&Video> for VideoStats {
    fn from(video: &Video) -> Self {
        let engagement_rate = if video.views > 0 {
            let rate = video.likes as f64 / video.views as f64 * 100.0;
            (rate * 100.0).round() / 100.0
        } else {
            0.0
        };
        Self {
            views: video.views,
            likes: video.likes,
            engagement_rate,
        }
    }
}
