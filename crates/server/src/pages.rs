//! The two HTML pages and their stylesheet, compiled into the binary.

use axum::http::header;
use axum::response::{Html, IntoResponse};

const OPTIMIZER: &str = include_str!("../assets/index.html");
const HELPER: &str = include_str!("../assets/helper.html");
const STYLE: &str = include_str!("../assets/style.css");

pub async fn optimizer() -> Html<&'static str> {
    Html(OPTIMIZER)
}

pub async fn helper() -> Html<&'static str> {
    Html(HELPER)
}

pub async fn style() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE)
}
