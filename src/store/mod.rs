//! In-memory stores
//!
//! Process-local state that is not worth a table: the blog post board, the
//! video library and the product catalog. Each store is shared behind an
//! `Arc` and guards its data with a `tokio::sync::RwLock`; anything that has
//! to check-then-write does so under a single write guard.

pub mod blog_post;
pub mod catalog;
pub mod video;

pub use blog_post::{BlogBoard, BlogPostStore};
pub use catalog::ItemCatalog;
pub use video::VideoLibrary;
