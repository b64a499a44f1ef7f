//! Web mini-app files compiled into the binary.

use axum::http::header::CONTENT_TYPE;
use axum::response::{Html, IntoResponse};

const INDEX_HTML: &str = include_str!("../../../../public/index.html");
const APP_JS: &str = include_str!("../../../../public/app.js");
const STYLE_CSS: &str = include_str!("../../../../public/style.css");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn script() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/javascript; charset=utf-8")], APP_JS)
}

pub async fn stylesheet() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}
