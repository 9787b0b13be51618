//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate upstream origins and scrape URL templates
//! - Validate value ranges (timeouts > 0, bind address parses)
//! - Detect duplicate scrape paths and paths the router would treat as captures
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::ProxyConfig;
use crate::scrape::CODE_PLACEHOLDER;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration, collecting every error found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    for (i, route) in config.routes.iter().enumerate() {
        let field = format!("routes[{}]", i);
        if !route.prefix.starts_with('/') {
            errors.push(ValidationError::new(
                format!("{}.prefix", field),
                "must start with '/'",
            ));
        }
        if let Err(message) = check_origin(&route.upstream) {
            errors.push(ValidationError::new(format!("{}.upstream", field), message));
        }
    }

    let mut seen_paths = HashSet::new();
    for (i, scrape) in config.scrapes.iter().enumerate() {
        let field = format!("scrapes[{}]", i);
        if !scrape.path.starts_with('/') {
            errors.push(ValidationError::new(
                format!("{}.path", field),
                "must start with '/'",
            ));
        }
        if scrape.path.contains(['{', '}', '*'])
            || scrape.path.split('/').any(|segment| segment.starts_with(':'))
        {
            errors.push(ValidationError::new(
                format!("{}.path", field),
                "must be a literal path without '{', '}', '*' or ':'-prefixed segments",
            ));
        }
        if !seen_paths.insert(scrape.path.as_str()) {
            errors.push(ValidationError::new(
                format!("{}.path", field),
                format!("duplicate scrape path '{}'", scrape.path),
            ));
        }
        if scrape.param.is_empty() {
            errors.push(ValidationError::new(format!("{}.param", field), "must not be empty"));
        }
        if !scrape.url_template.contains(CODE_PLACEHOLDER) {
            errors.push(ValidationError::new(
                format!("{}.url_template", field),
                format!("must contain the {} placeholder", CODE_PLACEHOLDER),
            ));
        } else if Url::parse(&scrape.url_template.replace(CODE_PLACEHOLDER, "0")).is_err() {
            errors.push(ValidationError::new(
                format!("{}.url_template", field),
                "does not render to a valid URL",
            ));
        }
    }

    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::new("upstream.connect_timeout_secs", "must be > 0"));
    }
    if config.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::new("upstream.request_timeout_secs", "must be > 0"));
    }
    if config.upstream.max_body_bytes == 0 {
        errors.push(ValidationError::new("upstream.max_body_bytes", "must be > 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// An upstream must be a bare http(s) origin: scheme, host, optional port.
fn check_origin(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| format!("'{}' is not a URL: {}", raw, e))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    if url.path() != "/" || url.query().is_some() {
        return Err("must be an origin without path or query".to_string());
    }
    Ok(())
}
