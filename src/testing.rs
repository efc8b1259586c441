//! Local page server and config helpers shared by the async tests.

use std::net::SocketAddr;

use axum::{
    http::StatusCode,
    response::{Html, Redirect},
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::config::Config;

pub const POST_PAGE: &str = r#"<html><head>
<meta property="og:image" content="https://cdn.example.com/post.jpg">
</head><body>
<script type="application/ld+json">{"video":{"contentUrl":"https://cdn.example.com/post.mp4"}}</script>
</body></html>"#;

pub const BARE_PAGE: &str = "<html><head><title>Post</title></head><body><p>nothing here</p></body></html>";

pub fn config_allowing(hosts: &str) -> Config {
    let hosts = hosts.to_string();
    Config::from_lookup(move |key| (key == "POST_MEDIA_API_ALLOWED_HOSTS").then(|| hosts.clone()))
}

/// Serve canned pages on an ephemeral loopback port:
/// `/post`, `/bare`, `/gone` (404), `/json`, `/hop-localhost`,
/// `/hop-loopback` and `/loop`.
pub async fn spawn_page_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let port = addr.port();

    let app = Router::new()
        .route("/post", get(|| async { Html(POST_PAGE) }))
        .route("/bare", get(|| async { Html(BARE_PAGE) }))
        .route("/gone", get(|| async { (StatusCode::NOT_FOUND, Html(POST_PAGE)) }))
        .route("/json", get(|| async { Json(json!({"image": "https://cdn.example.com/a.jpg"})) }))
        .route(
            "/hop-localhost",
            get(move || async move { Redirect::temporary(&format!("http://localhost:{port}/post")) }),
        )
        .route(
            "/hop-loopback",
            get(move || async move { Redirect::temporary(&format!("http://127.0.0.1:{port}/post")) }),
        )
        .route("/loop", get(|| async { Redirect::temporary("/loop") }));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
