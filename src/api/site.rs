//! Landing page

use axum::{response::Html, routing::get, Router};

use crate::api::middleware::AppState;

const WELCOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
    <head>
        <title>blogdesk</title>
    </head>
    <body>
        <h1>Welcome to blogdesk</h1>
        <p>Users, posts and comments live under <code>/users</code>, <code>/posts</code> and <code>/comments</code>.</p>
        <p>The blog board is at <code>/blog/posts</code>, videos at <code>/videos</code> and the product catalog at <code>/items</code>.</p>
    </body>
</html>
"#;

/// Build the landing page router
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(welcome))
}

async fn welcome() -> Html<&'static str> {
    Html(WELCOME_PAGE)
}
