//! Scrape subsystem.
//!
//! # Data Flow
//! ```text
//! GET <exact path>?<param>=<code>
//!     → endpoint.rs (look up endpoint, extract + check code, render URL)
//!     → handler.rs (one GET with browser-like headers)
//!     → 200 text/html; charset=utf-8 with the page bytes
//!       | upstream status relayed | 500 on transport failure
//! ```
//!
//! # Design Decisions
//! - Missing or empty parameter fails before any network call
//! - Single attempt, no retries; the client's deadline bounds the call
//! - The page is never parsed or re-encoded

pub mod endpoint;
pub mod handler;

pub use endpoint::{ScrapeEndpoint, ScrapeError, ScrapeRegistry};
pub use handler::Scraper;

/// Placeholder substituted with the requested code in URL templates.
pub const CODE_PLACEHOLDER: &str = "{code}";
