//! Forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request + matched Route
//!     → engine.rs (rewrite URL, filter headers, buffer body)
//!     → outbound client (Host derived from upstream origin)
//!     → upstream response: status + filtered headers + streamed body
//! ```
//!
//! # Design Decisions
//! - Method and body bytes are preserved exactly
//! - The response body is streamed, never buffered
//! - Transport failures become 502; the caller never sees a dropped connection
//! - Dropping the inbound response drops the upstream stream (cancellation)

pub mod engine;

pub use engine::Forwarder;
