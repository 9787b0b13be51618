//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and middleware produce:
//!     → tracing events (request id, method, target URL, upstream status)
//!     → logging.rs subscriber (env filter + fmt to stdout)
//! ```

pub mod logging;
