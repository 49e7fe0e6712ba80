//! Data models
//!
//! This module contains the data structures used throughout blogdesk:
//! - Database entities (User, Post, Comment)
//! - In-memory entities (BlogPost, Video, Item)
//! - Request input types and composed detail views

mod blog_post;
mod comment;
mod item;
mod post;
mod user;
mod video;

pub use blog_post::{BlogPost, CreateBlogPostInput, PostStatus, UpdateBlogPostInput};
pub use comment::{Comment, CommentWithAuthor, CreateCommentInput};
pub use item::{CreateItemInput, Item, ItemPage, SortBy};
pub use post::{CreatePostInput, Post, PostWithRelations, UpdatePostInput};
pub use user::{CreateUserInput, UpdateUserInput, User, UserDetail};
pub use video::{Video, VideoCategory, VideoStats};
