//! Development CORS proxy for fund and stock data endpoints.
//!
//! Forwards browser requests to a fixed set of upstream origins by path
//! prefix, and serves a few "fetch this news page for me" scrape endpoints,
//! adding permissive CORS headers to every response.

pub mod config;
pub mod error;
pub mod forwarding;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;
pub mod scrape;
pub mod security;

pub use config::schema::ProxyConfig;
pub use error::{ProxyError, StartupError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
