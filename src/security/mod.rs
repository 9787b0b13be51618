//! Security-related request/response handling.
//!
//! - headers.rs: hop-by-hop filtering and upstream CORS header removal
//!
//! Cross-origin allowance itself is `tower_http::cors::CorsLayer::permissive()`,
//! installed as the outermost layer in `http::server`.

pub mod headers;
