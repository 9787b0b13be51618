//! Response helpers shared by handlers.
//!
//! # Design Decisions
//! - Scraped pages are relayed byte-for-byte and always labelled UTF-8 HTML,
//!   whatever the upstream declared
//! - Errors are rendered by `ProxyError`'s `IntoResponse`

use axum::body::Bytes;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

pub const HTML_UTF8: &str = "text/html; charset=utf-8";

/// A 200 response carrying `body` as UTF-8 HTML.
pub fn html(body: Bytes) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, HeaderValue::from_static(HTML_UTF8))], body).into_response()
}
