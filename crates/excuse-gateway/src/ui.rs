use axum::{http::StatusCode, response::Html, response::IntoResponse};

const INDEX_HTML: &str = include_str!("../static/index.html");

pub async fn index() -> impl IntoResponse {
    (StatusCode::OK, Html(INDEX_HTML))
}
