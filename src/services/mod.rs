//! Services layer - Business logic
//!
//! Services enforce the business rules and validation for each resource and
//! coordinate between the SQLite repositories and the in-memory stores.

pub mod blog_post;
pub mod catalog;
pub mod comment;
pub mod password;
pub mod post;
pub mod user;
pub mod validation;
pub mod video;

pub use blog_post::{BlogPostService, BlogPostServiceError};
pub use catalog::{CatalogService, CatalogServiceError};
pub use comment::{CommentService, CommentServiceError};
pub use password::{hash_password, verify_password};
pub use post::{PostService, PostServiceError};
pub use user::{UserService, UserServiceError};
pub use video::{VideoService, VideoServiceError};
