//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Forwarding engine / scrape handler
//!     → client.rs (shared outbound client: timeouts, TLS policy)
//!     → Upstream origin
//! ```
//!
//! # Design Decisions
//! - One pooled client per role (forward, scrape), cloned cheaply into handlers
//! - Every outbound call has a deadline (connect + total)
//! - Certificate verification is relaxed only when configured

pub mod client;

pub use client::{build_client, ClientError, ClientRole};
