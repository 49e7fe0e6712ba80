//! blogdesk - a small blogging REST service
//!
//! Users, posts and comments persisted in SQLite, plus an in-memory blog
//! board, video library and product catalog.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod store;
