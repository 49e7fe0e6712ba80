//! API layer - HTTP handlers and routing
//!
//! - Users, posts and comments (SQLite-backed)
//! - Blog board, videos and product catalog (in-memory)
//! - HTML landing page

pub mod blog_posts;
pub mod comments;
pub mod common;
pub mod items;
pub mod middleware;
pub mod posts;
pub mod site;
pub mod users;
pub mod videos;

use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use middleware::{ApiError, AppState};

/// Build the API routes
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .merge(site::router())
        .nest("/users", users::router())
        .nest("/posts", posts::router())
        .merge(comments::router())
        .nest("/blog/posts", blog_posts::router())
        .merge(videos::router())
        .nest("/items", items::router())
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any);
    let cors = match cors_origin {
        "*" => cors.allow_origin(Any),
        origin => match HeaderValue::from_str(origin) {
            Ok(value) => cors.allow_origin(value),
            Err(e) => {
                tracing::warn!(origin, error = %e, "Invalid CORS origin, allowing any origin");
                cors.allow_origin(Any)
            }
        },
    };

    build_api_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn server() -> TestServer {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        TestServer::new(build_router(AppState::new(pool), "*")).expect("Failed to start server")
    }

    async fn register(server: &TestServer, username: &str) -> Value {
        let response = server
            .post("/users")
            .json(&json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "full_name": "Test User",
                "password": "password123"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()
    }

    #[tokio::test]
    async fn test_welcome_page() {
        let server = server().await;
        let response = server.get("/").await;
        response.assert_status_ok();
        assert!(response.text().contains("Welcome to blogdesk"));
    }

    #[tokio::test]
    async fn test_user_lifecycle() {
        let server = server().await;
        let user = register(&server, "alice").await;
        assert!(user.get("password").is_none());
        assert!(user.get("password_hash").is_none());
        let id = user["id"].as_str().unwrap().to_string();

        let dup = server
            .post("/users")
            .json(&json!({
                "username": "alice",
                "email": "other@example.com",
                "full_name": "Other",
                "password": "pw"
            }))
            .await;
        dup.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            dup.json::<Value>()["error"]["message"],
            "Username or email already registered"
        );

        let updated = server
            .put(&format!("/users/{}", id))
            .json(&json!({"bio": "Hi there"}))
            .await;
        updated.assert_status_ok();
        assert_eq!(updated.json::<Value>()["bio"], "Hi there");

        let detail = server.get(&format!("/users/{}", id)).await;
        detail.assert_status_ok();
        assert_eq!(detail.json::<Value>()["posts"], json!([]));

        server
            .delete(&format!("/users/{}", id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        let gone = server.get(&format!("/users/{}", id)).await;
        gone.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(gone.json::<Value>()["error"]["message"], "User not found");
    }

    #[tokio::test]
    async fn test_user_validation_is_422() {
        let server = server().await;
        server
            .post("/users")
            .json(&json!({
                "username": "al",
                "email": "al@example.com",
                "full_name": "Al",
                "password": "pw"
            }))
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_posts_and_comments() {
        let server = server().await;
        let user = register(&server, "writer").await;
        let user_id = user["id"].as_str().unwrap().to_string();

        let created = server
            .post("/posts")
            .add_query_param("user_id", &user_id)
            .json(&json!({"title": "Hello", "content": "World", "published": true}))
            .await;
        created.assert_status(StatusCode::CREATED);
        let post_id = created.json::<Value>()["id"].as_str().unwrap().to_string();

        let comment = server
            .post(&format!("/posts/{}/comments", post_id))
            .add_query_param("user_id", &user_id)
            .json(&json!({"content": "First!"}))
            .await;
        comment.assert_status(StatusCode::CREATED);
        let comment_id = comment.json::<Value>()["id"].as_str().unwrap().to_string();

        let single = server.get(&format!("/comments/{}", comment_id)).await;
        single.assert_status_ok();
        assert_eq!(single.json::<Value>()["content"], "First!");

        let full = server.get(&format!("/posts/{}", post_id)).await.json::<Value>();
        assert_eq!(full["author"]["username"], "writer");
        assert_eq!(full["comments"][0]["content"], "First!");
        assert_eq!(full["comments"][0]["author"]["username"], "writer");

        let drafts = server
            .get("/posts")
            .add_query_param("published", "false")
            .await
            .json::<Vec<Value>>();
        assert!(drafts.is_empty());

        let patched = server
            .patch(&format!("/posts/{}", post_id))
            .json(&json!({"title": "Hello again"}))
            .await;
        patched.assert_status_ok();
        assert_eq!(patched.json::<Value>()["content"], "World");

        let mine = server
            .get(&format!("/users/{}/posts", user_id))
            .await
            .json::<Vec<Value>>();
        assert_eq!(mine.len(), 1);

        server
            .delete(&format!("/comments/{}", comment_id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        let gone = server.get(&format!("/comments/{}", comment_id)).await;
        gone.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(gone.json::<Value>()["error"]["message"], "Comment not found");

        server
            .delete(&format!("/posts/{}", post_id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&format!("/posts/{}/comments", post_id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_for_missing_user_is_404() {
        let server = server().await;
        let response = server
            .post("/posts")
            .add_query_param("user_id", uuid::Uuid::new_v4().to_string())
            .json(&json!({"title": "Hello", "content": "World"}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["error"]["message"], "User not found");
    }

    #[tokio::test]
    async fn test_blog_board() {
        let server = server().await;

        server
            .get("/blog/posts")
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let body = json!({
            "title": "Rust on the server",
            "content": "A long enough body to clear the fifty character minimum easily.",
            "author": "Jane"
        });
        let created = server.post("/blog/posts").json(&body).await;
        created.assert_status(StatusCode::CREATED);
        let created = created.json::<Value>();
        assert_eq!(created["status"], "draft");
        assert_eq!(created["views"], 0);

        let mut upper = body.clone();
        upper["title"] = json!("RUST ON THE SERVER");
        let dup = server.post("/blog/posts").json(&upper).await;
        dup.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            dup.json::<Value>()["error"]["message"],
            "A post with this title already exists"
        );

        let read = server.get("/blog/posts/1").await.json::<Value>();
        assert_eq!(read["views"], 1);

        let past_end = server
            .get("/blog/posts")
            .add_query_param("skip", "5")
            .await;
        past_end.assert_status_ok();
        assert_eq!(past_end.json::<Value>(), json!([]));

        let mut second = body.clone();
        second["title"] = json!("Second story");
        server
            .post("/blog/posts")
            .json(&second)
            .await
            .assert_status(StatusCode::CREATED);

        server
            .patch("/blog/posts/1")
            .json(&json!({"status": "archived"}))
            .await
            .assert_status_ok();
        let locked = server
            .patch("/blog/posts/1")
            .json(&json!({"status": "draft"}))
            .await;
        locked.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            locked.json::<Value>()["error"]["message"],
            "Cannot transition from archived to draft"
        );

        let clash = server
            .patch("/blog/posts/1")
            .json(&json!({"title": "second STORY", "status": "draft"}))
            .await;
        clash.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            clash.json::<Value>()["error"]["message"],
            "A post with this title already exists"
        );

        server
            .get("/blog/posts")
            .add_query_param("status", "published")
            .await
            .assert_status(StatusCode::NO_CONTENT);
        let archived_past_end = server
            .get("/blog/posts")
            .add_query_param("status", "archived")
            .add_query_param("skip", "1")
            .await;
        archived_past_end.assert_status_ok();
        assert_eq!(archived_past_end.json::<Value>(), json!([]));

        server
            .delete("/blog/posts/1")
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get("/blog/posts/1")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_videos() {
        let server = server().await;

        let stats = server.get("/videos/1/stats").await.json::<Value>();
        assert_eq!(stats["engagement_rate"], 10.0);

        let video = json!({
            "title": "Speedrun",
            "description": "Any%",
            "category": "gaming",
            "views": 0,
            "likes": 0
        });
        server.post("/videos/2").json(&video).await.assert_status_ok();
        let dup = server.post("/videos/2").json(&video).await;
        dup.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(dup.json::<Value>()["error"]["message"], "Video ID already exists");

        let zero = server.get("/videos/2/stats").await.json::<Value>();
        assert_eq!(zero["engagement_rate"], 0.0);

        let gaming = server
            .get("/categories/gaming/videos")
            .await
            .json::<Vec<Value>>();
        assert_eq!(gaming.len(), 1);
        server
            .get("/videos/0")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        server
            .get("/videos/99")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_items() {
        let server = server().await;

        let first_page = server.get("/items").await.json::<Vec<Value>>();
        assert_eq!(first_page.len(), 10);

        let found = server
            .get("/items/search")
            .add_query_param("q", "phone")
            .await
            .json::<Vec<Value>>();
        let names: Vec<&str> = found.iter().map(|i| i["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Headphones", "Smartphone"]);

        let furniture = server
            .get("/items/filter")
            .add_query_param("category", "FURNITURE")
            .add_query_param("max_price", "299.99")
            .await
            .json::<Vec<Value>>();
        assert_eq!(furniture.len(), 2);

        let sorted = server
            .get("/items/sort")
            .add_query_param("sort_by", "price")
            .add_query_param("descending", "true")
            .await
            .json::<Vec<Value>>();
        assert_eq!(sorted[0]["name"], "Laptop");

        let page = server
            .get("/items/validate")
            .add_query_param("page", "1")
            .add_query_param("size", "2")
            .await
            .json::<Value>();
        assert_eq!(page["total"], 10);
        assert_eq!(page["items"].as_array().unwrap().len(), 2);

        server
            .get("/items/validate")
            .add_query_param("page", "0")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let far = server
            .get("/items/validate")
            .add_query_param("page", "4294967297")
            .await
            .json::<Value>();
        assert_eq!(far["page"], 4_294_967_297_i64);
        assert_eq!(far["items"], json!([]));

        let created = server
            .post("/items")
            .json(&json!({"name": "Lamp", "price": 25.0}))
            .await;
        created.assert_status(StatusCode::CREATED);
        let created = created.json::<Value>();
        assert_eq!(created["message"], "Item created successfully");
        assert_eq!(created["item"]["id"], 11);
        assert_eq!(created["item"]["category"], "other");
        assert!(created.get("price_with_tax").is_none());

        let taxed = server
            .post("/items")
            .json(&json!({"name": "Lamp", "price": 10.0, "tax": 1.5}))
            .await;
        taxed.assert_status(StatusCode::CREATED);
        let taxed = taxed.json::<Value>();
        assert_eq!(taxed["price_with_tax"], 11.5);
        assert_eq!(taxed["item"]["tax"], 1.5);
    }
}
