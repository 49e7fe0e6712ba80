//! Blog post model
//!
//! The simpler post variant kept on the in-memory board: the author is a plain
//! name rather than a user, titles are unique, and every post moves through a
//! small publication lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Blog post entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    /// Sequential identifier, starting at 1
    pub id: i64,
    /// Title (unique, compared case-insensitively)
    pub title: String,
    pub content: String,
    /// Author display name
    pub author: String,
    pub status: PostStatus,
    /// Number of times the post has been read
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Publication status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Draft - not yet visible
    #[default]
    Draft,
    /// Published - visible to readers
    Published,
    /// Archived - frozen, cannot move back
    Archived,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        }
    }

    /// Whether a post in this status may move to `next`.
    ///
    /// Archived is terminal: the only transition out of it is to itself.
    pub fn can_transition_to(&self, next: PostStatus) -> bool {
        *self != PostStatus::Archived || next == PostStatus::Archived
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "archived" => Ok(PostStatus::Archived),
            _ => Err(format!("Invalid post status: {}", s)),
        }
    }
}

/// Input for creating a blog post
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlogPostInput {
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub status: PostStatus,
}

/// Input for updating a blog post; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBlogPostInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<PostStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default_is_draft() {
        assert_eq!(PostStatus::default(), PostStatus::Draft);
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [PostStatus::Draft, PostStatus::Published, PostStatus::Archived] {
            assert_eq!(status.to_string().parse::<PostStatus>(), Ok(status));
        }
        assert_eq!("PUBLISHED".parse::<PostStatus>(), Ok(PostStatus::Published));
        assert!("deleted".parse::<PostStatus>().is_err());
    }

    #[test]
    fn test_archived_is_terminal() {
        assert!(PostStatus::Archived.can_transition_to(PostStatus::Archived));
        assert!(!PostStatus::Archived.can_transition_to(PostStatus::Draft));
        assert!(!PostStatus::Archived.can_transition_to(PostStatus::Published));
    }

    #[test]
    fn test_non_archived_can_move_anywhere() {
        for from in [PostStatus::Draft, PostStatus::Published] {
            for to in [PostStatus::Draft, PostStatus::Published, PostStatus::Archived] {
                assert!(from.can_transition_to(to), "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&PostStatus::Archived).unwrap();
        assert_eq!(json, "\"archived\"");
        let input: CreateBlogPostInput =
            serde_json::from_str(r#"{"title": "t", "content": "c", "author": "a"}"#).unwrap();
        assert_eq!(input.status, PostStatus::Draft);
    }
}
