//! Blog post board

use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::models::{BlogPost, PostStatus};

/// The board's data: posts keyed by id plus the next id to hand out
#[derive(Debug)]
pub struct BlogBoard {
    posts: BTreeMap<i64, BlogPost>,
    next_id: i64,
}

impl Default for BlogBoard {
    fn default() -> Self {
        Self {
            posts: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl BlogBoard {
    /// Whether another post already uses `title`, ignoring case.
    ///
    /// `exclude` skips one post so an update can keep its own title.
    pub fn title_taken(&self, title: &str, exclude: Option<i64>) -> bool {
        let wanted = title.to_lowercase();
        self.posts
            .values()
            .any(|post| Some(post.id) != exclude && post.title.to_lowercase() == wanted)
    }

    /// Add a post under the next id
    pub fn insert(
        &mut self,
        title: String,
        content: String,
        author: String,
        status: PostStatus,
    ) -> BlogPost {
        let now = Utc::now();
        let post = BlogPost {
            id: self.next_id,
            title,
            content,
            author,
            status,
            views: 0,
            created_at: now,
            updated_at: now,
        };
        self.next_id += 1;
        self.posts.insert(post.id, post.clone());
        post
    }

    pub fn get(&self, id: i64) -> Option<&BlogPost> {
        self.posts.get(&id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut BlogPost> {
        self.posts.get_mut(&id)
    }

    pub fn remove(&mut self, id: i64) -> Option<BlogPost> {
        self.posts.remove(&id)
    }

    /// Posts in id (insertion) order
    pub fn iter(&self) -> impl Iterator<Item = &BlogPost> {
        self.posts.values()
    }
}

/// Shared, lock-guarded blog board
#[derive(Debug, Default)]
pub struct BlogPostStore {
    board: RwLock<BlogBoard>,
}

impl BlogPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with shared access to the board
    pub async fn read<R>(&self, f: impl FnOnce(&BlogBoard) -> R) -> R {
        let board = self.board.read().await;
        f(&board)
    }

    /// Run `f` with exclusive access to the board
    pub async fn write<R>(&self, f: impl FnOnce(&mut BlogBoard) -> R) -> R {
        let mut board = self.board.write().await;
        f(&mut board)
    }
}
