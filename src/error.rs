//! Request-level error taxonomy.
//!
//! Every variant terminates at the handler boundary and becomes a short
//! plain-text response; nothing here can take the server down.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors produced while serving a single request.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Missing required query parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid value for query parameter {name}: {value:?}")]
    InvalidParameter { name: String, value: String },

    #[error("Upstream responded with status {0}")]
    UpstreamStatus(StatusCode),

    #[error("Failed to fetch remote page")]
    Fetch(#[source] reqwest::Error),

    #[error("Upstream request failed")]
    Gateway(#[source] reqwest::Error),

    #[error("Request body exceeds {limit} bytes or could not be read")]
    BodyRejected { limit: usize },

    #[error("No matching route for {0}")]
    NotFound(String),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingParameter(_) | ProxyError::InvalidParameter { .. } => {
                StatusCode::BAD_REQUEST
            }
            ProxyError::UpstreamStatus(status) => *status,
            ProxyError::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Gateway(_) => StatusCode::BAD_GATEWAY,
            ProxyError::BodyRejected { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = match &self {
            ProxyError::Gateway(e) if e.is_timeout() => "Upstream request timed out".to_string(),
            ProxyError::Gateway(e) if e.is_connect() => "Upstream connection failed".to_string(),
            other => other.to_string(),
        };
        (self.status(), body).into_response()
    }
}

/// Errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    #[error(transparent)]
    Route(#[from] crate::routing::RouteError),
    #[error(transparent)]
    Scrape(#[from] crate::scrape::ScrapeError),
    #[error(transparent)]
    Client(#[from] crate::net::ClientError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
